//! Guest cancellation policy.
//!
//! A schedule may forbid cancellation outright or require it to happen a
//! minimum number of minutes before the booking starts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::booking::{BookingStatus, ExistingBooking};
use crate::error::{Result, SlotError};
use crate::schedule::policy_minutes;

/// Default cancellation notice: one day.
pub const DEFAULT_CANCEL_NOTICE_MINUTES: i64 = 1440;

/// Cancellation settings carried on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationPolicy {
    #[serde(default = "default_allow")]
    pub allow_cancellation: bool,
    /// Minutes before the booking start after which cancellation is refused.
    #[serde(default = "default_notice")]
    pub cancel_notice: i64,
}

fn default_allow() -> bool {
    true
}

fn default_notice() -> i64 {
    DEFAULT_CANCEL_NOTICE_MINUTES
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            allow_cancellation: default_allow(),
            cancel_notice: default_notice(),
        }
    }
}

/// Result of an accepted cancellation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationOutcome {
    /// The booking may be cancelled now.
    Allowed,
    /// The booking is already cancelled; nothing to do.
    AlreadyCancelled,
}

impl CancellationPolicy {
    /// Decide whether `booking` may be cancelled at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::CancellationRejected`] for completed bookings,
    /// when the policy forbids cancellation, or when `now` is inside the
    /// notice period before the booking start. Returns
    /// [`SlotError::InvalidPolicy`] if `cancel_notice` puts the deadline off
    /// the calendar.
    pub fn check(
        &self,
        booking: &ExistingBooking,
        now: NaiveDateTime,
    ) -> Result<CancellationOutcome> {
        match booking.status {
            BookingStatus::Cancelled => return Ok(CancellationOutcome::AlreadyCancelled),
            BookingStatus::Completed => {
                return Err(SlotError::CancellationRejected(
                    "booking is already completed".to_string(),
                ))
            }
            _ => {}
        }

        if !self.allow_cancellation {
            return Err(SlotError::CancellationRejected(
                "schedule does not allow cancellation".to_string(),
            ));
        }

        let notice = policy_minutes("cancelNotice", self.cancel_notice)?;
        let deadline = booking.start_time.checked_sub_signed(notice).ok_or_else(|| {
            SlotError::InvalidPolicy(format!(
                "cancelNotice of {} minutes runs past the calendar",
                self.cancel_notice
            ))
        })?;
        if now > deadline {
            tracing::debug!(%deadline, %now, "cancellation past notice deadline");
            return Err(SlotError::CancellationRejected(format!(
                "cancellation must happen at least {} minutes before the booking (deadline {})",
                self.cancel_notice,
                deadline.format("%Y-%m-%dT%H:%M:%S")
            )));
        }

        Ok(CancellationOutcome::Allowed)
    }
}
