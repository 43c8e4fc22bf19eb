//! Store error types.

use thiserror::Error;

/// Errors raised while creating, writing or compacting a tile store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error preparing the archive file
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite engine error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A tile with the same store key was already written
    #[error("duplicate tile at zoom {zoom}, column {col}, row {row}")]
    DuplicateTile { zoom: u8, col: u32, row: u32 },

    /// A metadata key was written twice
    #[error("duplicate metadata key '{0}'")]
    DuplicateMetadata(String),
}

impl StoreError {
    /// Returns true when the error is a unique-key violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateTile { .. } | StoreError::DuplicateMetadata(_)
        )
    }
}
