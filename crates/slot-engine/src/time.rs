//! Wall-clock times and intra-day ranges.
//!
//! A [`TimeOfDay`] is an "HH:MM" (24h) value with no seconds and no timezone.
//! It is anchored onto a calendar date with [`TimeOfDay::on`], which produces a
//! naive local timestamp. "24:00" is accepted as the end of the day and anchors
//! onto midnight of the following date.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time of day, parsed from `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Build a time of day from components.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTime`] if the hour is above 23 (other than
    /// exactly `24:00`) or the minute is above 59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, SlotError> {
        let valid = (hour < 24 && minute < 60) || (hour == 24 && minute == 0);
        if !valid {
            return Err(SlotError::InvalidTime(format!(
                "{hour:02}:{minute:02} is out of range"
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since midnight (0..=1440).
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Whether this is the `24:00` end-of-day marker.
    pub fn is_end_of_day(&self) -> bool {
        self.minutes_from_midnight() == MINUTES_PER_DAY
    }

    /// Anchor this time onto `date`, producing a naive local timestamp.
    ///
    /// `24:00` on the last representable date saturates to
    /// [`NaiveDateTime::MAX`].
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        let offset = Duration::minutes(i64::from(self.minutes_from_midnight()));
        date.and_time(NaiveTime::MIN)
            .checked_add_signed(offset)
            .unwrap_or(NaiveDateTime::MAX)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| SlotError::InvalidTime(format!("'{s}': expected HH:MM")))?;

        let hour = parse_component(h).ok_or_else(|| {
            SlotError::InvalidTime(format!("'{s}': hour must be one or two digits"))
        })?;
        let minute = parse_component(m).ok_or_else(|| {
            SlotError::InvalidTime(format!("'{s}': minute must be one or two digits"))
        })?;

        Self::new(hour, minute).map_err(|_| SlotError::InvalidTime(format!("'{s}' is out of range")))
    }
}

fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// An open-hours interval within a single day.
///
/// A slot fits the range only if it ends, trailing buffer included, no later
/// than `end_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeRange {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Parse a range from two `"HH:MM"` strings.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTime`] if either string is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self, SlotError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Anchor the range onto `date` as `(start, end)` timestamps.
    pub fn on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (self.start_time.on(date), self.end_time.on(date))
    }
}
