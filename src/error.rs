//! The failure taxonomy shared by every persistence operation. Callers get a
//! typed error back so they can decide between "tell the user the record is
//! gone" and "tell the user the disk is unhappy" without string matching.

use rusqlite::{Error as SqlError, ErrorCode};
use thiserror::Error;

/// Every way a store operation can fail. Failures are returned, never
/// panicked, and a reported failure always means prior state is intact:
/// multi-statement mutations roll back before the error surfaces.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id (or positional index) named by the caller matches no record.
    #[error("record not found")]
    NotFound,

    /// Input rejected before or during the write, such as a name that is
    /// empty once trimmed, or an underlying schema constraint firing.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The store directory or file could not be created or reached.
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// A multi-statement mutation failed mid-flight and was rolled back.
    #[error("transaction aborted: {0}")]
    TransactionAborted(#[source] SqlError),

    /// Any other SQLite-level failure.
    #[error("sqlite failure: {0}")]
    Sql(#[from] SqlError),
}

/// Coerce SQLite constraint errors into the `ConstraintViolation` variant so
/// callers see one taxonomy whether the check ran in Rust or in the schema.
/// Everything else passes through as a plain SQL failure.
pub(crate) fn map_constraint(err: SqlError) -> StoreError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        StoreError::ConstraintViolation(err.to_string())
    } else {
        err.into()
    }
}
