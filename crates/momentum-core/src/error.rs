//! Core error types for momentum-core.
//!
//! Normal domain variation ("no bonus applies", "no loot dropped", "task has
//! no due date") is modeled with `Option`, never with errors. The variants
//! here cover caller programming errors only, so the host application can
//! catch them and translate into logged no-ops without the user ever seeing
//! a raw failure.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::task::TaskStatus;

/// Core error type for momentum-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A state machine was driven from a state that does not permit it
    #[error("Invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    /// An input value was outside its documented range
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Invalid state errors.
#[derive(Error, Debug)]
pub enum InvalidStateError {
    /// Task completion attempted from a status other than pending/in-progress
    #[error("Cannot complete task '{task_id}' from status {status:?}")]
    NotCompletable { task_id: String, status: TaskStatus },

    /// Disallowed status transition
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    /// Streak record carries an activity date ahead of the evaluation clock
    #[error("Streak last activity {last_activity} is in the future (now: {now})")]
    ActivityInFuture {
        last_activity: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Energy level outside the 1-5 scale
    #[error("Energy level {value} out of range (expected {min}..={max})")]
    EnergyOutOfRange { value: i64, min: u8, max: u8 },

    /// Invalid value for a named field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
