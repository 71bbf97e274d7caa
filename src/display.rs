//! Card text for a [`FlightRecord`], with placeholders for missing fields.

use crate::models::FlightRecord;
use crate::status::{classify, FlightStatus};
use chrono::{DateTime, NaiveDateTime};

pub const NO_TIME: &str = "--:--";
pub const NO_CODE: &str = "N/A";
pub const NO_AIRLINE: &str = "Unknown Airline";

// AirLabs sends local times as "2024-05-01 14:30".
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `02:30 PM`, or `--:--` when missing or unparsable.
pub fn format_time(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_else(|| NO_TIME.to_string())
}

/// `05/01` (month/day), or empty.
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%m/%d").to_string())
        .unwrap_or_default()
}

impl FlightRecord {
    pub fn flight_label(&self) -> &str {
        self.flight.as_deref().unwrap_or(NO_CODE)
    }

    pub fn airline_label(&self) -> &str {
        self.airline.as_deref().unwrap_or(NO_AIRLINE)
    }

    pub fn dep_label(&self) -> &str {
        self.dep_code.as_deref().unwrap_or(NO_CODE)
    }

    pub fn arr_label(&self) -> &str {
        self.arr_code.as_deref().unwrap_or(NO_CODE)
    }

    pub fn display_status(&self) -> FlightStatus {
        classify(self.status.as_deref())
    }

    /// Minutes worth showing; zero is treated like absent.
    pub fn shown_duration(&self) -> Option<i64> {
        self.duration.filter(|m| *m != 0)
    }

    pub fn shown_delay(&self) -> Option<i64> {
        self.delay.filter(|m| *m != 0)
    }
}
