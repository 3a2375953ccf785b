use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::ViewMode;

pub mod commands;

use crate::config::{DEFAULT_BIND_ADDRESS, DEFAULT_DIST_DIR, DEFAULT_RENDER_WIDTH, HostConfig};
use commands::{RenderOptions, render, serve};

#[derive(Parser)]
#[command(name = "roadsafe")]
#[command(about = "Road safety dashboard host and chart renderer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the compiled dashboard
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind_address: String,

        /// Directory with the compiled dashboard (index.html, .wasm and .js files)
        #[arg(short, long, env = "DIST_DIR", default_value = DEFAULT_DIST_DIR)]
        dist_dir: PathBuf,
    },
    /// Render the travel mode chart to an SVG file
    ///
    /// Records are read from --input when given, otherwise fetched from
    /// {BACKEND_URL}/api/travel_mode.
    ///
    /// Examples:
    ///   roadsafe render --input travel_mode.json --output deaths.svg
    ///   roadsafe render --backend-url http://localhost:5000 --view injury --output injuries.svg
    Render {
        /// JSON file holding the travel mode records, takes precedence over --backend-url
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Base URL of the statistics backend
        #[arg(short, long, env = "BACKEND_URL")]
        backend_url: Option<String>,

        /// Metric group to chart: death or injury
        #[arg(long, default_value = "death")]
        view: ViewMode,

        /// Container width in pixels
        #[arg(short, long, default_value_t = DEFAULT_RENDER_WIDTH)]
        width: f64,

        /// Where to write the SVG document
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                dist_dir,
            } => {
                serve(HostConfig::new(bind_address, dist_dir)).await?;
            }
            Commands::Render {
                input,
                backend_url,
                view,
                width,
                output,
            } => {
                render(RenderOptions {
                    input,
                    backend_url,
                    view,
                    width,
                    output,
                })
                .await?;
            }
        }
        Ok(())
    }
}
