//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid slot duration: {0}")]
    InvalidSlotDuration(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Cancellation rejected: {0}")]
    CancellationRejected(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
