//! Error types for the climate data access layer
use thiserror::Error;

pub use rusqlite::Error as RusqliteError;

/// Failure kinds surfaced by every query operation.
#[derive(Error, Debug)]
pub enum DbError {
    /// The store could not be opened or a query could not execute
    #[error("Climate data unavailable: {0}")]
    DataUnavailable(#[from] rusqlite::Error),

    /// The shared connection lock was poisoned by a panicking reader
    #[error("Climate data unavailable: connection lock poisoned")]
    Poisoned,

    /// An aggregate that needs at least one row found none
    #[error("No data: {0}")]
    NoData(String),

    /// A value read from the store or supplied by a caller could not be interpreted
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl DbError {
    /// True for the store-level failures (unreachable store, failed query).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::DataUnavailable(_) | DbError::Poisoned)
    }
}

/// Type alias for Results using DbError
pub type Result<T> = std::result::Result<T, DbError>;
