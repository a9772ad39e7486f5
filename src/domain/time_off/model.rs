use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffType {
    Vacation,
    DayOff,
    SickLeave,
    Other,
}

impl TimeOffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOffType::Vacation => "vacation",
            TimeOffType::DayOff => "dayOff",
            TimeOffType::SickLeave => "sickLeave",
            TimeOffType::Other => "other",
        }
    }

    /// Single-day kinds always end on their start date.
    pub fn is_single_day(&self) -> bool {
        matches!(self, TimeOffType::DayOff)
    }
}

impl fmt::Display for TimeOffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOffType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vacation" => Ok(TimeOffType::Vacation),
            "dayOff" => Ok(TimeOffType::DayOff),
            "sickLeave" => Ok(TimeOffType::SickLeave),
            "other" => Ok(TimeOffType::Other),
            _ => Err(format!("Invalid time off type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOffStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl TimeOffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOffStatus::Pending => "pending",
            TimeOffStatus::Approved => "approved",
            TimeOffStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TimeOffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOff {
    pub id: String,
    pub user_id: String,
    pub kind: TimeOffType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub status: TimeOffStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated create/update payload.
///
/// Invariants: `end_date >= start_date`, and `end_date == start_date` for
/// single-day kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOffDraft {
    pub kind: TimeOffType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_round_trip() {
        for kind in [
            TimeOffType::Vacation,
            TimeOffType::DayOff,
            TimeOffType::SickLeave,
            TimeOffType::Other,
        ] {
            assert_eq!(kind.as_str().parse::<TimeOffType>().unwrap(), kind);
        }
    }

    #[test]
    fn type_names_are_case_sensitive() {
        assert!("dayoff".parse::<TimeOffType>().is_err());
        assert!("Vacation".parse::<TimeOffType>().is_err());
        assert!("".parse::<TimeOffType>().is_err());
    }

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(TimeOffStatus::default(), TimeOffStatus::Pending);
    }
}
