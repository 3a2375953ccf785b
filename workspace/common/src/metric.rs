use serde::{Deserialize, Serialize};
use std::fmt;

/// One counter reported per crash year by the travel mode endpoint.
///
/// The serde names are the JSON keys the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MotorVehicleDeath,
    BicycleDeath,
    PedestrianDeath,
    MotorcycleDeath,
    MicromobilityDeath,
    OtherDeath,
    MotorVehicleSeriousInjury,
    BicycleSeriousInjury,
    PedestrianSeriousInjury,
    MotorcycleSeriousInjury,
    MicromobilitySeriousInjury,
    OtherSeriousInjury,
}

impl Metric {
    /// Every metric, deaths first, in chart order.
    pub const ALL: [Metric; 12] = [
        Metric::MotorVehicleDeath,
        Metric::BicycleDeath,
        Metric::PedestrianDeath,
        Metric::MotorcycleDeath,
        Metric::MicromobilityDeath,
        Metric::OtherDeath,
        Metric::MotorVehicleSeriousInjury,
        Metric::BicycleSeriousInjury,
        Metric::PedestrianSeriousInjury,
        Metric::MotorcycleSeriousInjury,
        Metric::MicromobilitySeriousInjury,
        Metric::OtherSeriousInjury,
    ];

    /// JSON key of this metric in a travel mode record.
    pub fn key(self) -> &'static str {
        match self {
            Metric::MotorVehicleDeath => "motor_vehicle_death",
            Metric::BicycleDeath => "bicycle_death",
            Metric::PedestrianDeath => "pedestrian_death",
            Metric::MotorcycleDeath => "motorcycle_death",
            Metric::MicromobilityDeath => "micromobility_death",
            Metric::OtherDeath => "other_death",
            Metric::MotorVehicleSeriousInjury => "motor_vehicle_serious_injury",
            Metric::BicycleSeriousInjury => "bicycle_serious_injury",
            Metric::PedestrianSeriousInjury => "pedestrian_serious_injury",
            Metric::MotorcycleSeriousInjury => "motorcycle_serious_injury",
            Metric::MicromobilitySeriousInjury => "micromobility_serious_injury",
            Metric::OtherSeriousInjury => "other_serious_injury",
        }
    }

    /// Human readable travel mode: the key without its death/injury suffix,
    /// underscores turned into spaces.
    pub fn label(self) -> String {
        let key = self.key();
        let mode = key
            .strip_suffix("_serious_injury")
            .or_else(|| key.strip_suffix("_death"))
            .unwrap_or(key);
        mode.replace('_', " ")
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
