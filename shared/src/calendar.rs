//! Calendar-day policy
//!
//! Log timestamps are stored in UTC. Which calendar day an entry belongs
//! to depends on the configured boundary: the device's local zone, UTC,
//! or a fixed offset.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How timestamps are mapped onto calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayBoundary {
    /// Local zone of the running device
    #[default]
    Local,
    Utc,
    /// Offset east of UTC, in minutes
    FixedOffset { minutes: i32 },
}

impl DayBoundary {
    /// Build a fixed-offset policy, rejecting offsets beyond ±24h
    pub fn fixed_offset(minutes: i32) -> Option<Self> {
        offset_east(minutes)?;
        Some(DayBoundary::FixedOffset { minutes })
    }

    /// Calendar date of an instant under this policy
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DayBoundary::Local => instant.with_timezone(&Local).date_naive(),
            DayBoundary::Utc => instant.date_naive(),
            DayBoundary::FixedOffset { minutes } => match offset_east(*minutes) {
                Some(offset) => instant.with_timezone(&offset).date_naive(),
                None => instant.date_naive(),
            },
        }
    }

    /// Whether two instants fall on the same calendar day
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.date_of(a) == self.date_of(b)
    }

    /// Wall-clock time of an instant, e.g. "08:05 PM"
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        const FORMAT: &str = "%I:%M %p";
        match self {
            DayBoundary::Local => instant.with_timezone(&Local).format(FORMAT).to_string(),
            DayBoundary::Utc => instant.format(FORMAT).to_string(),
            DayBoundary::FixedOffset { minutes } => match offset_east(*minutes) {
                Some(offset) => instant.with_timezone(&offset).format(FORMAT).to_string(),
                None => instant.format(FORMAT).to_string(),
            },
        }
    }
}

fn offset_east(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBoundary::Local => f.write_str("local"),
            DayBoundary::Utc => f.write_str("utc"),
            DayBoundary::FixedOffset { minutes } => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_utc_boundary() {
        let late = Utc.with_ymd_and_hms(2025, 3, 1, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 3, 2, 0, 30, 0).unwrap();
        assert!(!DayBoundary::Utc.same_day(late, early));
    }

    #[test]
    fn test_fixed_offset_moves_the_boundary() {
        // 19:00 UTC is already the next day in India (UTC+05:30)
        let ist = DayBoundary::fixed_offset(330).unwrap();
        let evening = Utc.with_ymd_and_hms(2025, 3, 1, 19, 0, 0).unwrap();
        let next_morning = Utc.with_ymd_and_hms(2025, 3, 2, 3, 0, 0).unwrap();
        assert_eq!(ist.date_of(evening), NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert!(ist.same_day(evening, next_morning));
        assert!(!DayBoundary::Utc.same_day(evening, next_morning));
    }

    #[test]
    fn test_fixed_offset_range() {
        assert!(DayBoundary::fixed_offset(-300).is_some());
        assert!(DayBoundary::fixed_offset(24 * 60).is_none());
    }

    #[test]
    fn test_format_time() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 14, 5, 0).unwrap();
        assert_eq!(DayBoundary::Utc.format_time(at), "02:05 PM");
        assert_eq!(DayBoundary::fixed_offset(330).unwrap().format_time(at), "07:35 PM");
    }

    #[test]
    fn test_display() {
        assert_eq!(DayBoundary::fixed_offset(330).unwrap().to_string(), "UTC+05:30");
        assert_eq!(DayBoundary::fixed_offset(-90).unwrap().to_string(), "UTC-01:30");
        assert_eq!(DayBoundary::Local.to_string(), "local");
    }
}
