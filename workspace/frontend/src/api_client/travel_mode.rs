use common::{MetricRecord, TRAVEL_MODE_ENDPOINT};

/// Fetches the per-year travel mode counts from `{base_url}/api/travel_mode`.
pub async fn get_travel_mode(base_url: &str) -> Result<Vec<MetricRecord>, String> {
    let records: Vec<MetricRecord> = super::get(base_url, TRAVEL_MODE_ENDPOINT).await?;
    log::debug!("Received {} travel mode records", records.len());
    Ok(records)
}
