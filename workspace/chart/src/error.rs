use thiserror::Error;

/// Error types for the chart engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The container is too small to hold the plot area once margins are removed
    #[error("Invalid dimensions: plot area would be {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// The drawing backend refused an operation
    #[error("Surface error: {0}")]
    Surface(String),
}

impl ChartError {
    pub fn surface(message: impl Into<String>) -> Self {
        ChartError::Surface(message.into())
    }
}

/// Type alias for Result with ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
