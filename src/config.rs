use std::path::{Path, PathBuf};

/// Default address the dashboard host binds to
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Default directory holding the compiled dashboard (index.html, wasm, js)
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Default width in pixels of a rendered chart snapshot
pub const DEFAULT_RENDER_WIDTH: f64 = 800.0;

/// Load variables from a `.env` file if one exists, returning its path
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Settings of the static dashboard host
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub bind_address: String,
    pub dist_dir: PathBuf,
}

impl HostConfig {
    pub fn new(bind_address: impl Into<String>, dist_dir: impl AsRef<Path>) -> Self {
        Self {
            bind_address: bind_address.into(),
            dist_dir: dist_dir.as_ref().to_path_buf(),
        }
    }

    /// Page served for every path that is not a file in the dist directory
    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}
