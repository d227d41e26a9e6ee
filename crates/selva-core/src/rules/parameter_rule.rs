//! Per-station/parameter rules over station readings.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::RuleTier;
use crate::types::Reading;

/// Watches one attribute key across readings, optionally pinned to a
/// single station. `station_id = None` is the wildcard: the rule applies
/// to readings from every station. Unique per (user, station, parameter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRule {
    pub id: i64,
    pub user_id: i64,
    pub station_id: Option<i64>,
    /// Station name resolved at load time, used only for descriptions.
    pub station_name: Option<String>,
    pub parameter: String,
    pub is_absolute: bool,
    pub valid_min: f64,
    pub valid_max: f64,
}

impl RuleTier for ParameterRule {
    type Candidate = Reading;

    fn narrow<'a>(&self, all: &'a [Reading]) -> Vec<&'a Reading> {
        match self.station_id {
            Some(station_id) => all.iter().filter(|r| r.station_id == station_id).collect(),
            None => all.iter().collect(),
        }
    }

    fn metric(&self, candidate: &Reading) -> Option<f64> {
        candidate.attribute(&self.parameter)
    }

    fn is_absolute(&self) -> bool {
        self.is_absolute
    }

    fn bounds(&self) -> (f64, f64) {
        (self.valid_min, self.valid_max)
    }

    fn owner(&self) -> i64 {
        self.user_id
    }

    fn describe(&self, value: f64) -> String {
        let station = match &self.station_name {
            Some(name) => format!("station '{name}'"),
            None => "any station".to_string(),
        };
        if value > 0.0 {
            format!(
                "Parameter '{}' at {} increased to {}, exceeding the allowed maximum of {}",
                self.parameter, station, value, self.valid_max
            )
        } else {
            format!(
                "Parameter '{}' at {} decreased to {}, falling below the allowed minimum of {}",
                self.parameter, station, value, self.valid_min
            )
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "tier": "parameter",
            "station_id": self.station_id,
            "station_name": self.station_name,
            "parameter": self.parameter,
            "is_absolute": self.is_absolute,
            "valid_min": self.valid_min,
            "valid_max": self.valid_max,
        })
    }
}
