use std::fmt;

use chrono::{DateTime, Utc};

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "17:30";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday first; also the order in which updates are validated.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Working hours for one day, both `HH:MM`.
///
/// Start is not required to precede end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySlot {
    pub start_time: String,
    pub end_time: String,
}

impl Default for DaySlot {
    fn default() -> Self {
        Self {
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyHours {
    pub monday: DaySlot,
    pub tuesday: DaySlot,
    pub wednesday: DaySlot,
    pub thursday: DaySlot,
    pub friday: DaySlot,
    pub saturday: DaySlot,
    pub sunday: DaySlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: String,
    pub user_id: String,
    pub hours: WeeklyHours,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySlotPatch {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Partial schedule update: only the listed days (and within them only the
/// given fields) change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulePatch {
    pub days: Vec<(Weekday, DaySlotPatch)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_week_is_nine_to_half_five() {
        let hours = WeeklyHours::default();
        let days = [
            &hours.monday,
            &hours.tuesday,
            &hours.wednesday,
            &hours.thursday,
            &hours.friday,
            &hours.saturday,
            &hours.sunday,
        ];
        for slot in days {
            assert_eq!(slot.start_time, "09:00");
            assert_eq!(slot.end_time, "17:30");
        }
    }

    #[test]
    fn weekday_names_are_capitalized() {
        let names: Vec<String> = Weekday::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(names[0], "Monday");
        assert_eq!(names[6], "Sunday");
    }
}
