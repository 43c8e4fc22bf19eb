//! Tile persistence.
//!
//! The pipeline writes through the [`TileStore`] trait from a single writer
//! thread, so implementations need no internal locking. [`MbtilesStore`] is
//! the SQLite/MBTiles implementation.

mod error;
mod mbtiles;
mod metadata;

pub use error::StoreError;
pub use mbtiles::MbtilesStore;
pub use metadata::{StoreMetadata, LAYER_TYPE, MBTILES_VERSION};

use crate::tile::Tile;

/// Destination for fetched tiles.
///
/// Only ever driven by one writer at a time; implementations must be `Send`
/// so the writer can own them on a blocking thread.
pub trait TileStore: Send {
    /// Writes the descriptive metadata. Called once, before any tile.
    fn write_metadata(&mut self, metadata: &StoreMetadata) -> Result<(), StoreError>;

    /// Persists one tile under `(zoom, col, tms_row)`.
    ///
    /// A second write for the same key is an error, never an overwrite.
    fn write_tile(&mut self, tile: &Tile) -> Result<(), StoreError>;

    /// Rebuilds statistics and reclaims space once every tile is written.
    fn finalize(&mut self) -> Result<(), StoreError>;
}
