//! Error types for the article and price store.

use thiserror::Error;

/// Errors raised by store operations.
///
/// Unique-constraint violations on insert are not errors; they are reported
/// as [`InsertOutcome::Duplicate`](crate::InsertOutcome::Duplicate).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Creating the database directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A timestamp shift falls outside the representable date range.
    #[error("Cannot shift {published_at} back by {days} days")]
    ShiftOutOfRange {
        /// Stored publication timestamp.
        published_at: chrono::NaiveDateTime,
        /// Requested shift in days.
        days: i64,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
