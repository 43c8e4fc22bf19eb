//! Fetched tile payloads.
//!
//! A [`Tile`] is created by the fetcher, handed to the single store writer,
//! and dropped once the write is acknowledged.
//!
//! # Example
//!
//! ```
//! use mbtiler::coord::TileCoord;
//! use mbtiler::tile::Tile;
//!
//! let tile = Tile::new(TileCoord::new(5, 3, 10), vec![0x89, b'P', b'N', b'G']);
//! assert_eq!(tile.len(), 4);
//! assert_eq!(tile.coord().tms_row(), 21);
//! ```

use crate::coord::TileCoord;

/// A tile coordinate paired with the raw image bytes served for it.
///
/// The content is opaque: it is never decoded or validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    coord: TileCoord,
    content: Vec<u8>,
}

impl Tile {
    pub fn new(coord: TileCoord, content: Vec<u8>) -> Self {
        Self { coord, content }
    }

    /// Tile coordinate (XYZ rows).
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Consumes the tile, returning its payload.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}
