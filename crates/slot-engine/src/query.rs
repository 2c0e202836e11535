//! Request-level slot lookup.
//!
//! Resolves the knobs a public booking page sends (target date or explicit
//! window, optional duration override) against an appointment type and a schedule, runs the
//! generator, and renders the result in its wire form.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::ExistingBooking;
use crate::error::{Result, SlotError};
use crate::schedule::ScheduleConfig;
use crate::slots::{generate_available_slots, AvailableSlot, SlotWindow};

/// Shortest duration a caller may request explicitly, in minutes.
pub const MIN_DURATION_OVERRIDE: i64 = 5;

/// Timestamp format used on the wire.
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The bookable service a slot lookup is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentType {
    /// Default appointment length in minutes.
    pub duration: i64,
    /// Per-type capacity; takes precedence over the schedule's when set.
    #[serde(default)]
    pub max_capacity: Option<i64>,
}

/// Caller-supplied lookup parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotQuery {
    /// Target calendar date, `"YYYY-MM-DD"`. Narrows the lookup to that day.
    #[serde(default)]
    pub date: Option<String>,
    /// Explicit duration override in minutes.
    #[serde(default)]
    pub duration: Option<i64>,
    /// Window start; generation begins on its date. Combined with `date` by
    /// intersection.
    #[serde(default)]
    pub from: Option<NaiveDateTime>,
    /// Exclusive window end. Combined with `date` by intersection.
    #[serde(default)]
    pub until: Option<NaiveDateTime>,
}

/// A slot as serialized for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub start: String,
    pub end: String,
    pub available: i64,
    pub total: i64,
}

impl From<&AvailableSlot> for SlotView {
    fn from(slot: &AvailableSlot) -> Self {
        Self {
            start: slot.start.format(WIRE_TIMESTAMP_FORMAT).to_string(),
            end: slot.end.format(WIRE_TIMESTAMP_FORMAT).to_string(),
            available: slot.available,
            total: slot.total,
        }
    }
}

impl SlotQuery {
    /// The appointment length to look up.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidDuration`] if an override is shorter than
    /// [`MIN_DURATION_OVERRIDE`].
    pub fn resolve_duration(&self, appointment_type: &AppointmentType) -> Result<i64> {
        match self.duration {
            Some(d) if d < MIN_DURATION_OVERRIDE => Err(SlotError::InvalidDuration(format!(
                "requested duration must be at least {MIN_DURATION_OVERRIDE} minutes, got {d}"
            ))),
            Some(d) => Ok(d),
            None => Ok(appointment_type.duration),
        }
    }

    /// The search window implied by the target date and the explicit bounds.
    ///
    /// A target date covers `[date 00:00, next day 00:00)`; `from` and
    /// `until` narrow it further. Without a date the bounds apply as given.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidDate`] if the date is not `"YYYY-MM-DD"`.
    pub fn resolve_window(&self) -> Result<SlotWindow> {
        let Some(raw) = self.date.as_deref() else {
            return Ok(SlotWindow::new(self.from, self.until));
        };

        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| SlotError::InvalidDate(format!("'{raw}': {e}")))?;
        let day_start = date.and_time(NaiveTime::MIN);
        // The last representable date has no next midnight; leave it open.
        let day_end = date.succ_opt().map(|next| next.and_time(NaiveTime::MIN));

        let start = self.from.map_or(day_start, |from| from.max(day_start));
        let end = match (day_end, self.until) {
            (Some(day_end), Some(until)) => Some(day_end.min(until)),
            (day_end, until) => day_end.or(until),
        };
        Ok(SlotWindow::new(Some(start), end))
    }
}

/// Capacity for a lookup: the appointment type's if set, else the schedule's,
/// else 1.
pub fn resolve_capacity(appointment_type: &AppointmentType, config: &ScheduleConfig) -> i64 {
    appointment_type
        .max_capacity
        .filter(|&c| c != 0)
        .or(Some(config.max_capacity).filter(|&c| c != 0))
        .unwrap_or(1)
}

/// Resolve `query` and generate slots for `appointment_type`.
///
/// # Errors
///
/// Propagates resolution errors and generator argument errors.
pub fn available_slots(
    config: &ScheduleConfig,
    appointment_type: &AppointmentType,
    bookings: &[ExistingBooking],
    query: &SlotQuery,
    now: NaiveDateTime,
) -> Result<Vec<AvailableSlot>> {
    let duration = query.resolve_duration(appointment_type)?;
    let window = query.resolve_window()?;

    let mut resolved = config.clone();
    resolved.max_capacity = resolve_capacity(appointment_type, config);

    tracing::debug!(
        duration,
        capacity = resolved.max_capacity,
        date = query.date.as_deref().unwrap_or("-"),
        from = ?window.start,
        until = ?window.end,
        "resolved slot query"
    );

    generate_available_slots(&resolved, bookings, duration, window, now)
}

/// Render slots in their wire form, preserving order.
pub fn to_views(slots: &[AvailableSlot]) -> Vec<SlotView> {
    slots.iter().map(SlotView::from).collect()
}
