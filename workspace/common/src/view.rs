use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Metric;

/// Which metric group the travel mode chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Death,
    Injury,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Death, ViewMode::Injury];

    /// The six metrics charted in this view, in legend and palette order.
    pub fn metrics(self) -> [Metric; 6] {
        match self {
            ViewMode::Death => [
                Metric::MotorVehicleDeath,
                Metric::BicycleDeath,
                Metric::PedestrianDeath,
                Metric::MotorcycleDeath,
                Metric::MicromobilityDeath,
                Metric::OtherDeath,
            ],
            ViewMode::Injury => [
                Metric::MotorVehicleSeriousInjury,
                Metric::BicycleSeriousInjury,
                Metric::PedestrianSeriousInjury,
                Metric::MotorcycleSeriousInjury,
                Metric::MicromobilitySeriousInjury,
                Metric::OtherSeriousInjury,
            ],
        }
    }

    /// Text of the toggle button, also used in the widget heading.
    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Death => "Deaths",
            ViewMode::Injury => "Serious Injuries",
        }
    }

    pub fn heading(self) -> String {
        format!("{} by Travel Mode", self.title())
    }

    /// Label of the vertical axis.
    pub fn axis_label(self) -> &'static str {
        match self {
            ViewMode::Death => "Number of Deaths",
            ViewMode::Injury => "Number of Serious Injuries",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Death => "death",
            ViewMode::Injury => "injury",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view mode `{0}`, expected `death` or `injury`")]
pub struct ParseViewModeError(pub String);

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "death" | "deaths" => Ok(ViewMode::Death),
            "injury" | "injuries" | "serious_injury" => Ok(ViewMode::Injury),
            other => Err(ParseViewModeError(other.to_string())),
        }
    }
}
