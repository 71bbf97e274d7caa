use crate::error::{Error, Result, API_FAILED_MESSAGE};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// What the user asked for, validated and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    FlightNumber { code: String },
    Route {
        departure: String,
        arrival: Option<String>,
    },
}

impl SearchIntent {
    pub fn flight_number(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::invalid_intent("flight number is required"));
        }
        Ok(Self::FlightNumber {
            code: code.to_string(),
        })
    }

    /// A blank arrival is treated as "any arrival airport".
    pub fn route(departure: &str, arrival: Option<&str>) -> Result<Self> {
        let departure = departure.trim();
        if departure.is_empty() {
            return Err(Error::invalid_intent("departure airport is required"));
        }
        let arrival = arrival
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        Ok(Self::Route {
            departure: departure.to_string(),
            arrival,
        })
    }
}

/// AirLabs resources this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Flight,
    Schedules,
    Flights,
    Airlines,
    Airports,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Flight => "flight",
            Endpoint::Schedules => "schedules",
            Endpoint::Flights => "flights",
            Endpoint::Airlines => "airlines",
            Endpoint::Airports => "airports",
        }
    }
}

/// Query string parameters, kept sorted so requests are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters(BTreeMap<String, String>);

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parameter names with values, minus `secret_key`. For logging.
    pub fn redacted(&self, secret_key: &str) -> Vec<(&str, &str)> {
        self.iter().filter(|(k, _)| *k != secret_key).collect()
    }
}

/// Shape of `response` as AirLabs sends it: a list, a lone object, or
/// something unusable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Many(Vec<Value>),
    One(Map<String, Value>),
    Other(Value),
}

/// Decoded AirLabs envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub response: Option<ResponsePayload>,
}

impl ApiResponse {
    /// Returns the upstream error message when the `error` field is set.
    pub fn error_message(&self) -> Option<String> {
        let err = self.error.as_ref().filter(|e| is_truthy(e))?;
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(API_FAILED_MESSAGE);
        Some(message.to_string())
    }
}

// JSON values AirLabs uses to mean "no error": null, false, "" and 0.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One flight as shown on a card. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightRecord {
    pub flight: Option<String>,
    pub airline: Option<String>,
    pub aircraft: Option<String>,
    pub dep_code: Option<String>,
    pub dep_name: Option<String>,
    pub dep_time: Option<String>,
    pub arr_code: Option<String>,
    pub arr_name: Option<String>,
    pub arr_time: Option<String>,
    pub duration: Option<i64>,
    pub delay: Option<i64>,
    pub status: Option<String>,
}

/// First non-empty string among `keys`, in order.
pub fn first_present(data: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| data.get(*k))
        .filter_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .next()
}

fn minutes(data: &Value, key: &str) -> Option<i64> {
    match data.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

// Non-object elements yield a record with every field absent.
impl From<&Value> for FlightRecord {
    fn from(data: &Value) -> Self {
        Self {
            flight: first_present(data, &["flight_iata", "flight_icao"]),
            airline: first_present(data, &["airline_iata", "airline_icao"]),
            aircraft: first_present(data, &["aircraft_icao"]),
            dep_code: first_present(data, &["dep_iata", "dep_icao"]),
            dep_name: first_present(data, &["dep_name"]),
            dep_time: first_present(data, &["dep_time", "dep_actual"]),
            arr_code: first_present(data, &["arr_iata", "arr_icao"]),
            arr_name: first_present(data, &["arr_name"]),
            arr_time: first_present(data, &["arr_time", "arr_actual"]),
            duration: minutes(data, "duration"),
            delay: minutes(data, "delayed"),
            status: first_present(data, &["status", "flight_status"]),
        }
    }
}
