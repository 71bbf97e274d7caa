//! Flattens the AirLabs `response` field into an ordered list of records.
//!
//! Pure and total: every [`ApiResponse`] normalizes, and "nothing to show"
//! is reported as a [`SoftCondition`] rather than an error.

use crate::models::{ApiResponse, FlightRecord, ResponsePayload};

/// A successful search that produced nothing to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftCondition {
    /// `response` was missing, null, or not a list/object.
    NoDataFound,
    /// `response` was an empty list.
    NoResultsForCriteria,
}

impl SoftCondition {
    pub fn message(self) -> &'static str {
        match self {
            SoftCondition::NoDataFound => "No flight data found.",
            SoftCondition::NoResultsForCriteria => {
                "No flights found. Please try again with different search criteria."
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub records: Vec<FlightRecord>,
    pub condition: Option<SoftCondition>,
}

pub fn normalize(response: &ApiResponse) -> Normalized {
    match &response.response {
        Some(ResponsePayload::Many(items)) => Normalized {
            records: items.iter().map(FlightRecord::from).collect(),
            condition: items
                .is_empty()
                .then_some(SoftCondition::NoResultsForCriteria),
        },
        Some(ResponsePayload::One(obj)) => Normalized {
            records: vec![FlightRecord::from(&serde_json::Value::Object(obj.clone()))],
            condition: None,
        },
        Some(ResponsePayload::Other(_)) | None => Normalized {
            records: Vec::new(),
            condition: Some(SoftCondition::NoDataFound),
        },
    }
}
