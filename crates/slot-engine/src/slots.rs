//! Bookable slot generation.
//!
//! Walks the effective date window one calendar day at a time, resolves the
//! day's open ranges from the schedule, and steps candidate starts through
//! each range by `slot_duration`. A candidate is emitted when it fits the
//! range (trailing buffer included), respects the notice window, and still has
//! capacity after counting overlapping bookings.
//!
//! The caller supplies "now" explicitly; nothing here reads the system clock.
//! All timestamps are naive local wall-clock values.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::{remaining_capacity, ExistingBooking};
use crate::error::{Result, SlotError};
use crate::schedule::ScheduleConfig;

/// A bookable window with its remaining and total capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Seats left: `total` minus overlapping non-cancelled bookings. Always > 0.
    pub available: i64,
    pub total: i64,
}

/// Optional caller-supplied bounds on the search window.
///
/// The bounds can only narrow the notice/advance window, never widen it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl SlotWindow {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }
}

/// Generate every available slot of `duration` minutes in the window.
///
/// # Arguments
///
/// * `config` — Weekly hours, overrides, and policies
/// * `bookings` — Existing bookings in any order; cancelled ones are ignored
/// * `duration` — Appointment length in minutes (independent of the slot step)
/// * `window` — Optional narrowing of the default `[now + notice, today + advance)` window
/// * `now` — The reference "now" instant
///
/// # Returns
///
/// Slots in chronological order. Full slots are omitted rather than reported
/// with zero availability. An empty result is a normal outcome.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDuration`] if `duration` is not positive or
/// not representable, [`SlotError::InvalidSlotDuration`] if
/// `config.slot_duration` is not positive, and [`SlotError::InvalidPolicy`]
/// if the notice, buffer, or advance policy pushes the window off the calendar.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::schedule::{ScheduleConfig, WeeklyHours};
/// use slot_engine::slots::{generate_available_slots, SlotWindow};
/// use slot_engine::time::TimeRange;
///
/// let mut config = ScheduleConfig::new(30);
/// config.max_advance = 1;
/// config.weekly_hours = vec![WeeklyHours {
///     day_of_week: 1,
///     is_enabled: true,
///     time_slots: vec![TimeRange::parse("09:00", "10:00").unwrap()],
/// }];
///
/// // Monday 2025-01-06 at 08:00
/// let now = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let slots = generate_available_slots(&config, &[], 30, SlotWindow::default(), now).unwrap();
/// assert_eq!(slots.len(), 2);
/// assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:00");
/// ```
pub fn generate_available_slots(
    config: &ScheduleConfig,
    bookings: &[ExistingBooking],
    duration: i64,
    window: SlotWindow,
    now: NaiveDateTime,
) -> Result<Vec<AvailableSlot>> {
    let step = config.step()?;
    if duration <= 0 {
        return Err(SlotError::InvalidDuration(format!(
            "duration must be positive, got {duration}"
        )));
    }
    let length = Duration::try_minutes(duration).ok_or_else(|| {
        SlotError::InvalidDuration(format!("duration of {duration} minutes is out of range"))
    })?;
    let buffer_after = config.trailing_buffer()?;

    let min_booking_time = now.checked_add_signed(config.notice()?).ok_or_else(|| {
        SlotError::InvalidPolicy(format!(
            "minNotice of {} minutes runs past the calendar",
            config.min_notice
        ))
    })?;
    let max_booking_date = start_of_day(now)
        .checked_add_signed(config.advance()?)
        .ok_or_else(|| {
            SlotError::InvalidPolicy(format!(
                "maxAdvance of {} days runs past the calendar",
                config.max_advance
            ))
        })?;

    let range_start = window
        .start
        .map_or(min_booking_time, |s| s.max(min_booking_time));
    let range_end = window
        .end
        .map_or(max_booking_date, |e| e.min(max_booking_date));

    tracing::debug!(
        %range_start,
        %range_end,
        duration,
        step = config.slot_duration,
        "generating slots"
    );

    let mut slots = Vec::new();
    let mut current = range_start.date();

    while start_of_day_of(current) < range_end {
        for range in config.ranges_for(current) {
            let (mut slot_start, range_end_time) = range.on(current);

            loop {
                // A slot or buffer running past the calendar never fits.
                let Some(slot_end) = slot_start.checked_add_signed(length) else {
                    break;
                };
                let fits = slot_end
                    .checked_add_signed(buffer_after)
                    .is_some_and(|busy_until| busy_until <= range_end_time);
                if !fits {
                    break;
                }

                if slot_start >= min_booking_time {
                    let available =
                        remaining_capacity(bookings, slot_start, slot_end, config.max_capacity);
                    if available > 0 {
                        slots.push(AvailableSlot {
                            start: slot_start,
                            end: slot_end,
                            available,
                            total: config.max_capacity,
                        });
                    }
                }

                match slot_start.checked_add_signed(step) {
                    Some(next) => slot_start = next,
                    None => break,
                }
            }
        }

        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    tracing::debug!(count = slots.len(), "slot generation finished");
    Ok(slots)
}

fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    start_of_day_of(dt.date())
}

fn start_of_day_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
