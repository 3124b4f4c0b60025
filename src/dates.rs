use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::error::ScheduleError;

/// Time zone the league schedules in; "today" is evaluated here.
pub const SITE_TZ: Tz = chrono_tz::America::Toronto;

/// The renderings of one calendar day that the games page is expected to show,
/// e.g. "Wednesday, July 09, 2025" and "Wednesday, July 9, 2025".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedDates {
    date: NaiveDate,
    padded: String,
    unpadded: String,
}

impl AcceptedDates {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            padded: date.format("%A, %B %d, %Y").to_string(),
            unpadded: date.format("%A, %B %-d, %Y").to_string(),
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Zero-padded day-of-month variant; used as the display date on records.
    pub fn padded(&self) -> &str {
        &self.padded
    }

    pub fn unpadded(&self) -> &str {
        &self.unpadded
    }

    /// Distinct accepted strings (one entry when both variants coincide, days 10-31).
    pub fn strings(&self) -> Vec<&str> {
        if self.padded == self.unpadded {
            vec![self.padded.as_str()]
        } else {
            vec![self.padded.as_str(), self.unpadded.as_str()]
        }
    }

    /// Coarse check: any accepted string occurs somewhere in `text`.
    pub fn found_in(&self, text: &str) -> bool {
        self.strings().iter().any(|s| text.contains(s))
    }

    /// Strict check: `text` is exactly one of the accepted strings.
    pub fn matches_exactly(&self, text: &str) -> bool {
        self.strings().iter().any(|s| *s == text)
    }
}

/// Day `offset_days` away from `now`, in the time zone `now` carries.
pub fn target_date<Z: TimeZone>(now: &DateTime<Z>, offset_days: i64) -> Result<NaiveDate, ScheduleError> {
    TimeDelta::try_days(offset_days)
        .and_then(|delta| now.clone().checked_add_signed(delta))
        .map(|shifted| shifted.date_naive())
        .ok_or(ScheduleError::DateOffsetOutOfRange(offset_days))
}
