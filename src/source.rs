use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use common::{MetricRecord, TRAVEL_MODE_ENDPOINT, endpoint_url};
use tracing::{debug, info, instrument};

/// Read travel mode records from a JSON file shaped like the backend response
#[instrument]
pub async fn load_records(path: &Path) -> Result<Vec<MetricRecord>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<MetricRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse travel mode records from {}", path.display()))?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Fetch travel mode records from `{base_url}/api/travel_mode`
#[instrument]
pub async fn fetch_records(base_url: &str) -> Result<Vec<MetricRecord>> {
    let url = endpoint_url(base_url, TRAVEL_MODE_ENDPOINT);
    info!("Fetching travel mode records from {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let records: Vec<MetricRecord> = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Backend rejected request to {}", url))?
        .json()
        .await
        .with_context(|| format!("Failed to parse response from {}", url))?;

    debug!("Fetched {} records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Metric;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"crash_year": 2019, "motor_vehicle_death": 5}}, {{"crash_year": 2020, "motor_vehicle_death": "6"}}]"#
        )
        .unwrap();

        let records = load_records(file.path()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].value(Metric::MotorVehicleDeath), Some(6.0));
    }

    #[tokio::test]
    async fn test_load_records_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = load_records(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse travel mode records"));
    }

    #[tokio::test]
    async fn test_fetch_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/travel_mode"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"crash_year": 2021, "bicycle_serious_injury": 12}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let records = fetch_records(&format!("{}/", server.uri())).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].crash_year, "2021");
        assert_eq!(records[0].value(Metric::BicycleSeriousInjury), Some(12.0));
    }

    #[tokio::test]
    async fn test_fetch_records_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/travel_mode"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(fetch_records(&server.uri()).await.is_err());
    }
}
