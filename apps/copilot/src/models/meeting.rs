use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::workflow::WorkflowError;

/// AM/PM marker sent alongside a confirmed meeting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    /// Hour 12 and later is PM.
    pub fn from_hour(hour: u32) -> Self {
        if hour >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date and time picked in the scheduling dialog.
///
/// Keeps the operator's original strings so the scheduling endpoint receives
/// exactly what was typed (`2025-03-14`, `14:30`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingProposal {
    date_input: String,
    time_input: String,
    time: NaiveTime,
}

impl MeetingProposal {
    pub fn parse(date: &str, time: &str) -> Result<Self, WorkflowError> {
        let date_input = date.trim();
        let time_input = time.trim();
        if date_input.is_empty() || time_input.is_empty() {
            return Err(WorkflowError::Validation(
                "Please select both date and time.".to_string(),
            ));
        }

        NaiveDate::parse_from_str(date_input, "%Y-%m-%d").map_err(|_| {
            WorkflowError::Validation(format!("Invalid meeting date '{date_input}'"))
        })?;
        let parsed_time = NaiveTime::parse_from_str(time_input, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time_input, "%H:%M:%S"))
            .map_err(|_| {
                WorkflowError::Validation(format!("Invalid meeting time '{time_input}'"))
            })?;

        Ok(Self {
            date_input: date_input.to_string(),
            time_input: time_input.to_string(),
            time: parsed_time,
        })
    }

    pub fn date_input(&self) -> &str {
        &self.date_input
    }

    pub fn time_input(&self) -> &str {
        &self.time_input
    }

    pub fn meridiem(&self) -> Meridiem {
        Meridiem::from_hour(self.time.hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afternoon_is_pm() {
        let proposal = MeetingProposal::parse("2025-03-14", "14:30").unwrap();
        assert_eq!(proposal.meridiem(), Meridiem::Pm);
        assert_eq!(proposal.meridiem().as_str(), "PM");
    }

    #[test]
    fn test_morning_is_am() {
        let proposal = MeetingProposal::parse("2025-03-14", "09:00").unwrap();
        assert_eq!(proposal.meridiem(), Meridiem::Am);
    }

    #[test]
    fn test_noon_and_midnight_boundaries() {
        assert_eq!(Meridiem::from_hour(12), Meridiem::Pm);
        assert_eq!(Meridiem::from_hour(0), Meridiem::Am);
        assert_eq!(Meridiem::from_hour(11), Meridiem::Am);
    }

    #[test]
    fn test_seconds_are_accepted() {
        let proposal = MeetingProposal::parse("2025-03-14", "18:05:00").unwrap();
        assert_eq!(proposal.meridiem(), Meridiem::Pm);
        assert_eq!(proposal.time_input(), "18:05:00");
    }

    #[test]
    fn test_missing_time_is_validation_error() {
        let err = MeetingProposal::parse("2025-03-14", "").unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn test_malformed_date_is_validation_error() {
        let err = MeetingProposal::parse("14/03/2025", "10:00").unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn test_meridiem_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Meridiem::Pm).unwrap(), r#""PM""#);
    }
}
