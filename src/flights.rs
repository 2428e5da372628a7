use crate::error::FlightsError;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// One pilot's result for the day, as returned by the flights endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FlightRecord {
    #[serde(default, rename = "firstname", deserialize_with = "text")]
    pub first_name: String,
    #[serde(default, rename = "lastname", deserialize_with = "text")]
    pub last_name: String,
    /// XC points, sent by the API as decimal text.
    #[serde(default, rename = "besttaskpoints", deserialize_with = "text")]
    pub points: String,
    #[serde(default, rename = "takeofflocation", deserialize_with = "text")]
    pub takeoff_location: String,
    #[serde(default, rename = "takeoffwaypointname", deserialize_with = "text")]
    pub takeoff_waypoint: String,
    #[serde(default, rename = "landinglocation", deserialize_with = "text")]
    pub landing_location: String,
    #[serde(default, rename = "idflight", deserialize_with = "text")]
    pub flight_id: String,
}

impl FlightRecord {
    pub fn pilot(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Takeoff name for display: the waypoint if known, else the location.
    pub fn takeoff(&self) -> &str {
        if self.takeoff_waypoint.is_empty() {
            &self.takeoff_location
        } else {
            &self.takeoff_waypoint
        }
    }
}

/// Decoded response body of one request.
#[derive(Debug, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default, deserialize_with = "records")]
    pub data: Vec<FlightRecord>,
    #[serde(default, deserialize_with = "flag")]
    pub success: bool,
    #[serde(default, deserialize_with = "text")]
    pub message: String,
}

impl ResultSet {
    /// Hand out the records, or the API's own failure message.
    pub fn into_records(self) -> Result<Vec<FlightRecord>, FlightsError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(FlightsError::Api(self.message))
        }
    }
}

/// Decode a raw response body. Malformed JSON is an error, unknown fields are ignored.
pub fn decode(body: &[u8]) -> Result<ResultSet, FlightsError> {
    Ok(serde_json::from_slice(body)?)
}

// ── Lenient field decoding ──────────────────────────────────────────────────

/// Text field: strings as-is, numbers as their decimal text, null as empty.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("expected string, found {}", other))),
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

fn records<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FlightRecord>, D::Error> {
    Ok(Option::<Vec<FlightRecord>>::deserialize(deserializer)?.unwrap_or_default())
}
