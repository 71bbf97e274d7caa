//! Display status derived from the free-form AirLabs status string.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    OnTime,
    Landed,
    Delayed,
    Cancelled,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightStatus {
    pub class: StatusClass,
    pub label: String,
}

impl FlightStatus {
    fn known(class: StatusClass, label: &str) -> Self {
        Self {
            class,
            label: label.to_string(),
        }
    }
}

/// Case-insensitive substring match; the first rule that hits wins.
/// Unrecognised statuses keep their original text as the label.
pub fn classify(raw: Option<&str>) -> FlightStatus {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return FlightStatus::known(StatusClass::Unknown, "Unknown"),
    };

    let lower = raw.to_lowercase();
    if lower.contains("scheduled") || lower.contains("active") {
        FlightStatus::known(StatusClass::OnTime, "On Time")
    } else if lower.contains("landed") || lower.contains("arrived") {
        FlightStatus::known(StatusClass::Landed, "Landed")
    } else if lower.contains("delayed") {
        FlightStatus::known(StatusClass::Delayed, "Delayed")
    } else if lower.contains("cancelled") {
        FlightStatus::known(StatusClass::Cancelled, "Cancelled")
    } else {
        FlightStatus::known(StatusClass::Unknown, raw)
    }
}
