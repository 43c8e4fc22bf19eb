//! Error types for the archive pipeline.

use thiserror::Error;

use crate::coord::TileCoord;
use crate::provider::ProviderError;
use crate::store::StoreError;

/// Errors that end a pipeline run.
///
/// Every variant is fatal: the first one observed cancels the remaining
/// work and is returned to the caller. Finalize never runs after an error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The bounding box and zoom range cover no tiles
    #[error("no tiles to fetch: the bounding box does not intersect the tile grid")]
    NoTiles,

    /// A tile could not be downloaded
    #[error("failed to fetch tile {coord}: {source}")]
    Fetch {
        coord: TileCoord,
        #[source]
        source: ProviderError,
    },

    /// Writing metadata or a tile to the store failed
    #[error("store write failed: {0}")]
    Store(#[source] StoreError),

    /// ANALYZE/VACUUM after the last tile failed
    #[error("store finalize failed: {0}")]
    Finalize(#[source] StoreError),

    /// The run was cancelled (e.g. Ctrl-C)
    #[error("run cancelled")]
    Cancelled,

    /// A task panicked or a channel closed unexpectedly
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Picks the error to report when several tasks of one run fail.
    ///
    /// A concrete error replaces an `Internal` one; otherwise the first wins.
    pub(super) fn prefer(self, other: PipelineError) -> PipelineError {
        match (&self, &other) {
            (PipelineError::Internal(_), PipelineError::Internal(_))
            | (PipelineError::Internal(_), PipelineError::Cancelled) => self,
            (PipelineError::Internal(_), _) => other,
            _ => self,
        }
    }
}
