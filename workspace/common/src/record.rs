use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Metric;

/// One crash year of incident counts, as returned by `/api/travel_mode`.
///
/// Counts arrive as numbers or numeric strings depending on the backend's
/// database driver. Anything that does not read as a number (missing key,
/// `null`, free text) is kept as `None` instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Category label of the year; never treated as a number.
    #[serde(default, deserialize_with = "year_label")]
    pub crash_year: String,

    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub motor_vehicle_death: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub bicycle_death: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub pedestrian_death: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub motorcycle_death: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub micromobility_death: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub other_death: Option<f64>,

    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub motor_vehicle_serious_injury: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub bicycle_serious_injury: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub pedestrian_serious_injury: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub motorcycle_serious_injury: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub micromobility_serious_injury: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub other_serious_injury: Option<f64>,
}

impl MetricRecord {
    /// Creates a record for `crash_year` with every counter absent.
    pub fn new(crash_year: impl Into<String>) -> Self {
        Self {
            crash_year: crash_year.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter used by fixtures and the CLI.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        *self.slot_mut(metric) = Some(value);
        self
    }

    /// The counter for `metric`, `None` when the backend did not provide a number.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::MotorVehicleDeath => self.motor_vehicle_death,
            Metric::BicycleDeath => self.bicycle_death,
            Metric::PedestrianDeath => self.pedestrian_death,
            Metric::MotorcycleDeath => self.motorcycle_death,
            Metric::MicromobilityDeath => self.micromobility_death,
            Metric::OtherDeath => self.other_death,
            Metric::MotorVehicleSeriousInjury => self.motor_vehicle_serious_injury,
            Metric::BicycleSeriousInjury => self.bicycle_serious_injury,
            Metric::PedestrianSeriousInjury => self.pedestrian_serious_injury,
            Metric::MotorcycleSeriousInjury => self.motorcycle_serious_injury,
            Metric::MicromobilitySeriousInjury => self.micromobility_serious_injury,
            Metric::OtherSeriousInjury => self.other_serious_injury,
        }
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::MotorVehicleDeath => &mut self.motor_vehicle_death,
            Metric::BicycleDeath => &mut self.bicycle_death,
            Metric::PedestrianDeath => &mut self.pedestrian_death,
            Metric::MotorcycleDeath => &mut self.motorcycle_death,
            Metric::MicromobilityDeath => &mut self.micromobility_death,
            Metric::OtherDeath => &mut self.other_death,
            Metric::MotorVehicleSeriousInjury => &mut self.motor_vehicle_serious_injury,
            Metric::BicycleSeriousInjury => &mut self.bicycle_serious_injury,
            Metric::PedestrianSeriousInjury => &mut self.pedestrian_serious_injury,
            Metric::MotorcycleSeriousInjury => &mut self.motorcycle_serious_injury,
            Metric::MicromobilitySeriousInjury => &mut self.micromobility_serious_injury,
            Metric::OtherSeriousInjury => &mut self.other_serious_injury,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Integer(i64),
    Float(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn year_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawYear>::deserialize(deserializer)? {
        Some(RawYear::Integer(year)) => year.to_string(),
        Some(RawYear::Float(year)) => year.to_string(),
        Some(RawYear::Text(year)) => year,
        None => String::new(),
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Number(n)) => Some(n),
        Some(RawCount::Text(text)) => {
            let parsed = text.trim().parse::<f64>().ok().filter(|n| n.is_finite());
            if parsed.is_none() {
                trace!(value = %text, "non-numeric count treated as absent");
            }
            parsed
        }
        Some(RawCount::Other(_)) | None => None,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let json = r#"[
            {"crash_year": 2019, "motor_vehicle_death": 5, "bicycle_death": "2",
             "pedestrian_serious_injury": " 14 "},
            {"crash_year": "2020", "motor_vehicle_death": 7.0}
        ]"#;
        let records: Vec<MetricRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].crash_year, "2019");
        assert_eq!(records[0].value(Metric::MotorVehicleDeath), Some(5.0));
        assert_eq!(records[0].value(Metric::BicycleDeath), Some(2.0));
        assert_eq!(records[0].value(Metric::PedestrianSeriousInjury), Some(14.0));
        assert_eq!(records[1].crash_year, "2020");
        assert_eq!(records[1].value(Metric::MotorVehicleDeath), Some(7.0));
    }

    #[test]
    fn test_missing_and_garbage_counts_are_absent() {
        let json = r#"{"crash_year": 2021, "other_death": null, "bicycle_death": "n/a",
                       "pedestrian_death": {"nested": true}, "unrelated": 1}"#;
        let record: MetricRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.value(Metric::OtherDeath), None);
        assert_eq!(record.value(Metric::BicycleDeath), None);
        assert_eq!(record.value(Metric::PedestrianDeath), None);
        assert_eq!(record.value(Metric::MotorVehicleDeath), None);
    }

    #[test]
    fn test_builder_sets_slots() {
        let record = MetricRecord::new("2018")
            .with(Metric::MotorcycleSeriousInjury, 3.0)
            .with(Metric::OtherDeath, 1.0);

        assert_eq!(record.value(Metric::MotorcycleSeriousInjury), Some(3.0));
        assert_eq!(record.value(Metric::OtherDeath), Some(1.0));
        assert_eq!(record.value(Metric::OtherSeriousInjury), None);
    }

    #[test]
    fn test_every_metric_has_its_own_slot() {
        for (i, metric) in Metric::ALL.into_iter().enumerate() {
            let record = MetricRecord::new("2000").with(metric, i as f64);
            for other in Metric::ALL {
                let expected = (other == metric).then_some(i as f64);
                assert_eq!(record.value(other), expected, "{other} after setting {metric}");
            }
        }
    }
}
