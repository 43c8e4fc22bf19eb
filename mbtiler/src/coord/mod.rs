//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (longitude/latitude)
//! and Web Mercator pixel/tile coordinates, and enumerates the tiles that
//! cover a bounding box across a range of zoom levels.
//!
//! # Row conventions
//!
//! Everything in this module numbers rows the XYZ way (row 0 at the north),
//! which is what tile servers expect. The flip to the TMS rows MBTiles
//! stores happens once, in the store, via [`TileCoord::tms_row`].

mod projection;
mod types;

pub use projection::{
    enumerate_tiles, project_pixels, round_half_away, PixelCoord, Projection, TileRange,
    ZoomScale, TILE_SIZE,
};
pub use types::{
    flip_row, tiles_per_side, BoundingBox, CoordError, TileCoord, ZoomRange, MAX_ZOOM, MIN_ZOOM,
};

#[cfg(test)]
mod tests;
