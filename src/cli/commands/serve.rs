use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::config::HostConfig;
use crate::router::create_router;

pub async fn serve(config: HostConfig) -> Result<()> {
    trace!("Entering serve function");
    info!("Road safety dashboard host starting up");
    debug!("Dist directory: {}", config.dist_dir.display());
    debug!("Bind address: {}", config.bind_address);

    if !config.index_file().is_file() {
        warn!(
            "No index.html in {}, only /health will answer until the dashboard is built",
            config.dist_dir.display()
        );
    }

    let bind_address = config.bind_address.clone();

    // Create router
    trace!("Creating application router");
    let app = create_router(config);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Dashboard running on http://{}", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
