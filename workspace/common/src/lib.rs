//! Common transport-layer types shared between the dashboard frontend, the
//! chart engine and the command line tools.
//! These mirror the payload of the backend's `/api/travel_mode` endpoint so
//! every consumer deserializes the same shape.

mod metric;
mod record;
mod view;

pub use metric::Metric;
pub use record::MetricRecord;
pub use view::{ParseViewModeError, ViewMode};

/// Path of the travel mode endpoint, relative to the backend base URL.
pub const TRAVEL_MODE_ENDPOINT: &str = "/api/travel_mode";

/// Joins a backend base URL and an endpoint path without doubling slashes.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
