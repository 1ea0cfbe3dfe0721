//! Error types for scheduling operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during scheduling operations.
///
/// Running out of free hours is not an error; slot searches return `None`
/// and bulk placement reports skipped blocks as warnings.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Request is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A block was requested on a Saturday or Sunday.
    #[error("{0} is not a business day")]
    NotABusinessDay(NaiveDate),
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;
