//! Station readings: free-form numeric attribute maps.

use serde::{Deserialize, Serialize};

/// A ground station producing periodic readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
}

/// One reading from a station.
///
/// `attributes` is a free-form JSON object; parameter rules index into it
/// by key. Window selection uses `created_at` (epoch microseconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub station_id: i64,
    pub attributes: serde_json::Map<String, serde_json::Value>,
    pub created_at: i64,
}

impl Reading {
    /// Numeric value of one attribute, if present and numeric.
    pub fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(serde_json::Value::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(attrs: serde_json::Value) -> Reading {
        let serde_json::Value::Object(attributes) = attrs else {
            panic!("attrs must be an object");
        };
        Reading { id: 1, station_id: 1, attributes, created_at: 0 }
    }

    #[test]
    fn attribute_lookup() {
        let r = reading(json!({"temperature": 21.5, "label": "ok"}));
        assert_eq!(r.attribute("temperature"), Some(21.5));
        // Non-numeric and missing keys are both None.
        assert_eq!(r.attribute("label"), None);
        assert_eq!(r.attribute("humidity"), None);
    }
}
