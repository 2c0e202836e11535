//! Existing bookings and capacity accounting.
//!
//! Bookings are read-only input. Every status except
//! [`BookingStatus::Cancelled`] occupies capacity, so a pending booking holds
//! a seat exactly like a confirmed one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    /// Whether a booking in this state counts against slot capacity.
    pub fn occupies_capacity(self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

/// A booking already on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingBooking {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
}

impl ExistingBooking {
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime, status: BookingStatus) -> Self {
        Self {
            start_time,
            end_time,
            status,
        }
    }

    /// Whether this booking overlaps the half-open interval `[start, end)`.
    ///
    /// Adjacent intervals (one ends exactly when the other starts) do not
    /// overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && self.end_time > start
    }
}

/// Number of capacity-occupying bookings that overlap `[start, end)`.
pub fn count_overlapping(
    bookings: &[ExistingBooking],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> i64 {
    bookings
        .iter()
        .filter(|b| b.status.occupies_capacity() && b.overlaps(start, end))
        .count() as i64
}

/// Seats left in `[start, end)` given `max_capacity`.
///
/// May be zero or negative when the interval is already full or overbooked.
/// Callers can use this as an admission check for a requested booking
/// before persisting it.
pub fn remaining_capacity(
    bookings: &[ExistingBooking],
    start: NaiveDateTime,
    end: NaiveDateTime,
    max_capacity: i64,
) -> i64 {
    max_capacity - count_overlapping(bookings, start, end)
}
