pub mod travel_mode;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// Common GET request handler.
///
/// The statistics backend answers with bare JSON (no response envelope), so
/// the body is decoded straight into `T`.
pub async fn get<T>(base_url: &str, endpoint: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let url = common::endpoint_url(base_url, endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("GET {} - {}", endpoint, error_msg);
            error_msg
        })?;

    if !response.ok() {
        let error_msg = format!("HTTP error: {}", response.status());
        log::error!("GET {} - {}", endpoint, error_msg);
        return Err(error_msg);
    }

    log::trace!("GET {} - Response received, parsing JSON", endpoint);
    let body: T = response
        .json()
        .await
        .map_err(|e| {
            let error_msg = format!("Failed to parse response: {}", e);
            log::error!("GET {} - {}", endpoint, error_msg);
            error_msg
        })?;

    log::info!("GET {} - Success", endpoint);
    Ok(body)
}
