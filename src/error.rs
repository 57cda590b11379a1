//! Error types for bucketkv
//!
//! Provides a unified error type for all client and transaction operations.

use thiserror::Error;

/// Result type alias using BucketError
pub type Result<T> = std::result::Result<T, BucketError>;

/// Unified error type for bucketkv operations
#[derive(Debug, Error)]
pub enum BucketError {
    // -------------------------------------------------------------------------
    // Namespace Errors
    // -------------------------------------------------------------------------
    #[error("bucket not found: {0}")]
    NamespaceNotFound(String),

    #[error("bucket name required")]
    BucketNameRequired,

    // -------------------------------------------------------------------------
    // Transaction Errors
    // -------------------------------------------------------------------------
    #[error("operation failed: {0}")]
    Operation(String),

    #[error("transaction is read-only")]
    TxNotWritable,

    #[error("transaction produced no record batch")]
    ResultTypeMismatch,

    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("engine error: {0}")]
    Engine(#[from] redb::Error),

    #[error("database not open")]
    DatabaseNotOpen,

    // -------------------------------------------------------------------------
    // I/O and Configuration Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BucketError {
    /// Whether this error reports a missing bucket
    pub fn is_not_found(&self) -> bool {
        matches!(self, BucketError::NamespaceNotFound(_))
    }
}

// redb splits its errors by call site; all of them are opaque engine failures here.
macro_rules! engine_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for BucketError {
                fn from(err: $ty) -> Self {
                    BucketError::Engine(redb::Error::from(err))
                }
            }
        )*
    };
}

engine_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
