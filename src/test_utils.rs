#[cfg(test)]
pub mod test_utils {
    use std::path::Path;

    use axum::Router;
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::config::HostConfig;
    use crate::router::create_router;

    pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body><div id=\"travel-mode\"></div></body></html>";

    /// Initialize tracing for tests, ignoring repeated initialization
    pub fn init_test_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Create a dist directory holding a built dashboard
    pub fn setup_dist_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dist dir");
        std::fs::write(dir.path().join("index.html"), INDEX_HTML).expect("Failed to write index.html");
        std::fs::write(dir.path().join("app.js"), "console.log('dashboard');")
            .expect("Failed to write app.js");
        dir
    }

    /// Create the host router serving `dist_dir`
    pub fn setup_test_app(dist_dir: &Path) -> Router {
        init_test_tracing();
        create_router(HostConfig::new("127.0.0.1:0", dist_dir))
    }
}
