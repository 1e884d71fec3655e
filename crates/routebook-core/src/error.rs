//! Error types for routebook-core

use thiserror::Error;

/// Result type alias using routebook-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in routebook-core operations
///
/// Everything here is surfaced to the caller. Failures talking to the remote
/// mirror live in [`crate::remote::RemoteError`] and never reach this type
/// from a mutating operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from the local store itself (as opposed to
    /// rejected input or a missing record).
    pub const fn is_local_storage(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Sqlite(_) | Self::Io(_) | Self::Serialization(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_storage_classification() {
        assert!(Error::Database("disk full".into()).is_local_storage());
        assert!(Error::Sqlite(rusqlite::Error::QueryReturnedNoRows).is_local_storage());
        assert!(!Error::NotFound("abc".into()).is_local_storage());
        assert!(!Error::InvalidInput("blank".into()).is_local_storage());
    }
}
