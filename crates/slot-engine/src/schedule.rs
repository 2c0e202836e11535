//! Schedule configuration: recurring weekly hours, per-date overrides, and
//! the buffer, notice, advance, and capacity policies that gate generation.
//!
//! The JSON shape mirrors the persisted schedule (camelCase keys), so a
//! stored schedule deserializes directly into a [`ScheduleConfig`].

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::{TimeOfDay, TimeRange};

/// Open hours for one weekday (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHours {
    pub day_of_week: u32,
    pub is_enabled: bool,
    #[serde(default)]
    pub time_slots: Vec<TimeRange>,
}

/// A single-date exception that replaces that date's weekly hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateOverride {
    pub date: NaiveDate,
    pub is_available: bool,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
}

impl DateOverride {
    /// A closed date.
    pub fn unavailable(date: NaiveDate) -> Self {
        Self {
            date,
            is_available: false,
            start_time: None,
            end_time: None,
        }
    }

    /// A date open for exactly one range.
    pub fn available(date: NaiveDate, range: TimeRange) -> Self {
        Self {
            date,
            is_available: true,
            start_time: Some(range.start_time),
            end_time: Some(range.end_time),
        }
    }

    /// The ranges this override yields for its date.
    ///
    /// An available override with either bound missing yields nothing, since
    /// no range can be built from it.
    pub fn ranges(&self) -> Vec<TimeRange> {
        match (self.is_available, self.start_time, self.end_time) {
            (true, Some(start), Some(end)) => vec![TimeRange::new(start, end)],
            _ => Vec::new(),
        }
    }
}

/// Everything the generator needs to know about a business's availability.
///
/// All durations are in minutes except `max_advance`, which is in days.
/// `buffer_before` is carried for completeness; only `buffer_after`
/// participates in the end-of-range fit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// Step between candidate slot starts.
    pub slot_duration: i64,
    #[serde(default)]
    pub buffer_before: i64,
    #[serde(default)]
    pub buffer_after: i64,
    #[serde(default)]
    pub min_notice: i64,
    #[serde(default)]
    pub max_advance: i64,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: i64,
    #[serde(default)]
    pub weekly_hours: Vec<WeeklyHours>,
    #[serde(default)]
    pub date_overrides: Vec<DateOverride>,
}

fn default_max_capacity() -> i64 {
    1
}

/// Convert a policy minute count, rejecting values chrono cannot represent.
pub(crate) fn policy_minutes(field: &str, value: i64) -> Result<Duration> {
    Duration::try_minutes(value).ok_or_else(|| {
        SlotError::InvalidPolicy(format!("{field} of {value} minutes is out of range"))
    })
}

impl ScheduleConfig {
    /// A config with the given step and no hours, buffers, or notice.
    pub fn new(slot_duration: i64) -> Self {
        Self {
            slot_duration,
            buffer_before: 0,
            buffer_after: 0,
            min_notice: 0,
            max_advance: 0,
            max_capacity: default_max_capacity(),
            weekly_hours: Vec::new(),
            date_overrides: Vec::new(),
        }
    }

    /// Check the invariants the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidSlotDuration`] if `slot_duration` is not
    /// positive or not representable, and [`SlotError::InvalidPolicy`] if the
    /// notice, trailing buffer, or advance window is not representable.
    pub fn validate(&self) -> Result<()> {
        self.step()?;
        self.notice()?;
        self.trailing_buffer()?;
        self.advance()?;
        Ok(())
    }

    /// Step between candidate starts.
    pub fn step(&self) -> Result<Duration> {
        if self.slot_duration <= 0 {
            return Err(SlotError::InvalidSlotDuration(format!(
                "slot duration must be positive, got {}",
                self.slot_duration
            )));
        }
        Duration::try_minutes(self.slot_duration).ok_or_else(|| {
            SlotError::InvalidSlotDuration(format!(
                "slot duration of {} minutes is out of range",
                self.slot_duration
            ))
        })
    }

    /// Minimum lead time before a slot may start.
    pub fn notice(&self) -> Result<Duration> {
        policy_minutes("minNotice", self.min_notice)
    }

    /// Buffer that must fit after a slot before the range ends.
    pub fn trailing_buffer(&self) -> Result<Duration> {
        policy_minutes("bufferAfter", self.buffer_after)
    }

    /// How far past the start of today slots may be offered.
    pub fn advance(&self) -> Result<Duration> {
        Duration::try_days(self.max_advance).ok_or_else(|| {
            SlotError::InvalidPolicy(format!(
                "maxAdvance of {} days is out of range",
                self.max_advance
            ))
        })
    }

    /// Weekly hours for a weekday index (0 = Sunday). First entry wins.
    pub fn weekly_hours_for(&self, day_of_week: u32) -> Option<&WeeklyHours> {
        self.weekly_hours
            .iter()
            .find(|wh| wh.day_of_week == day_of_week)
    }

    /// The override pinned to `date`, if any. First entry wins.
    pub fn override_for(&self, date: NaiveDate) -> Option<&DateOverride> {
        self.date_overrides.iter().find(|o| o.date == date)
    }

    /// Open ranges for `date`.
    ///
    /// An override replaces the weekly hours for its date outright. Without
    /// one, the weekday's ranges apply when that weekday is enabled.
    pub fn ranges_for(&self, date: NaiveDate) -> Vec<TimeRange> {
        if let Some(ov) = self.override_for(date) {
            tracing::trace!(%date, available = ov.is_available, "date override applies");
            return ov.ranges();
        }

        let day_of_week = date.weekday().num_days_from_sunday();
        match self.weekly_hours_for(day_of_week) {
            Some(wh) if wh.is_enabled => wh.time_slots.clone(),
            _ => Vec::new(),
        }
    }
}
