//! # slot-engine
//!
//! Deterministic availability-slot computation for booking systems.
//!
//! Given a business's recurring weekly hours, per-date overrides, buffer and
//! notice policies, and the bookings already on the calendar, the engine
//! computes every bookable window of a requested length over a date range,
//! together with its remaining capacity. Every call recomputes from its
//! inputs; the engine holds no state and performs no I/O.
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` times of day and intra-day ranges
//! - [`schedule`] — Weekly hours, date overrides, and schedule policies
//! - [`booking`] — Existing bookings, overlap detection, capacity accounting
//! - [`slots`] — The slot generator
//! - [`grouping`] — Group slots by date, list available dates
//! - [`query`] — Resolve a client lookup (date, duration override, capacity) and render wire output
//! - [`cancellation`] — Guest cancellation policy
//! - [`error`] — Error types

pub mod booking;
pub mod cancellation;
pub mod error;
pub mod grouping;
pub mod query;
pub mod schedule;
pub mod slots;
pub mod time;

pub use booking::{count_overlapping, remaining_capacity, BookingStatus, ExistingBooking};
pub use cancellation::{CancellationOutcome, CancellationPolicy};
pub use error::SlotError;
pub use grouping::{available_dates, group_slots_by_date};
pub use query::{available_slots, resolve_capacity, to_views, AppointmentType, SlotQuery, SlotView};
pub use schedule::{DateOverride, ScheduleConfig, WeeklyHours};
pub use slots::{generate_available_slots, AvailableSlot, SlotWindow};
pub use time::{TimeOfDay, TimeRange};
