//! Web Mercator pixel projection and bounding-box tile enumeration.
//!
//! Pixel coordinates follow the spherical Mercator convention used by
//! slippy maps: the world at zoom `z` is a `256 * 2^z` pixel square with the
//! origin in the north-west corner.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use super::types::{tiles_per_side, BoundingBox, TileCoord, ZoomRange};

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// Bound applied to `sin(lat)` to keep the Mercator log finite at the poles.
const SIN_LAT_LIMIT: f64 = 0.9999;

const DEG_TO_RAD: f64 = PI / 180.0;

/// Scale constants for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale {
    /// Pixel offset of the (0°, 0°) point on both axes
    pub origin: f64,
    /// Pixels per degree of longitude
    pub lon_scale: f64,
    /// Mercator radius in pixels
    pub lat_scale: f64,
}

impl ZoomScale {
    pub fn for_zoom(zoom: u8) -> Self {
        let world = f64::from(TILE_SIZE) * tiles_per_side(zoom) as f64;
        Self {
            origin: world / 2.0,
            lon_scale: world / 360.0,
            lat_scale: world / (2.0 * PI),
        }
    }

    /// Projects a geographic point to rounded pixel coordinates.
    pub fn project(&self, lon: f64, lat: f64) -> PixelCoord {
        let x = round_half_away(self.origin + lon * self.lon_scale);
        let sin_lat = (DEG_TO_RAD * lat).sin().clamp(-SIN_LAT_LIMIT, SIN_LAT_LIMIT);
        let y = round_half_away(
            self.origin + 0.5 * ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() * -self.lat_scale,
        );
        PixelCoord { x, y }
    }
}

/// Pixel position at a given zoom level. Values are whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoord {
    pub x: f64,
    pub y: f64,
}

impl PixelCoord {
    /// Tile indices containing this pixel, truncated toward zero.
    ///
    /// Not clipped: pixels west of or above the grid can produce negative or
    /// oversized indices.
    pub fn tile_index(&self) -> (i64, i64) {
        let size = f64::from(TILE_SIZE);
        ((self.x / size) as i64, (self.y / size) as i64)
    }
}

/// Rounds half away from zero.
///
/// Evaluated as `ceil(v - 0.5)` / `floor(v + 0.5)` rather than `f64::round`
/// so values one ulp below `.5` round the same way the reference tile sets
/// were generated.
#[inline]
pub fn round_half_away(value: f64) -> f64 {
    if value < 0.0 {
        (value - 0.5).ceil()
    } else {
        (value + 0.5).floor()
    }
}

/// Projects a geographic point at `zoom` without precomputed scales.
pub fn project_pixels(lon: f64, lat: f64, zoom: u8) -> PixelCoord {
    ZoomScale::for_zoom(zoom).project(lon, lat)
}

/// Inclusive, unclipped tile-index ranges covering a box at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub zoom: u8,
    pub x_start: i64,
    pub x_end: i64,
    pub y_start: i64,
    pub y_end: i64,
}

impl TileRange {
    /// Column and row index ranges clipped to the grid.
    fn clipped(&self) -> (RangeInclusive<i64>, RangeInclusive<i64>) {
        let last = tiles_per_side(self.zoom) as i64 - 1;
        (
            self.x_start.max(0)..=self.x_end.min(last),
            self.y_start.max(0)..=self.y_end.min(last),
        )
    }

    /// Iterates in-grid tiles column by column.
    ///
    /// Indices outside the grid are clipped away before iteration, so a
    /// box spanning far beyond the world costs no more than the world.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> {
        let zoom = self.zoom;
        let (cols, rows) = self.clipped();
        cols.flat_map(move |x| {
            rows.clone()
                .map(move |y| TileCoord::new(zoom, x as u32, y as u32))
        })
    }

    /// Number of in-grid tiles in this range.
    pub fn count(&self) -> usize {
        let span = |range: RangeInclusive<i64>| -> usize {
            if range.is_empty() {
                0
            } else {
                (range.end() - range.start() + 1) as usize
            }
        };
        let (cols, rows) = self.clipped();
        span(cols) * span(rows)
    }
}

/// Projection of one bounding box over a zoom range.
///
/// Scale constants for every level are computed once on construction.
#[derive(Debug, Clone)]
pub struct Projection {
    bbox: BoundingBox,
    zoom: ZoomRange,
    scales: Vec<ZoomScale>,
}

impl Projection {
    pub fn new(bbox: BoundingBox, zoom: ZoomRange) -> Self {
        let scales = zoom.levels().map(ZoomScale::for_zoom).collect();
        Self { bbox, zoom, scales }
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom
    }

    fn scale(&self, zoom: u8) -> ZoomScale {
        if self.zoom.contains(zoom) {
            self.scales[usize::from(zoom - self.zoom.from())]
        } else {
            ZoomScale::for_zoom(zoom)
        }
    }

    /// Projects a geographic point to pixels at `zoom`.
    pub fn project_pixels(&self, lon: f64, lat: f64, zoom: u8) -> PixelCoord {
        self.scale(zoom).project(lon, lat)
    }

    /// Tile-index ranges spanned by the box at `zoom`.
    ///
    /// The north-west corner `(min_lon, max_lat)` gives the start indices and
    /// the south-east corner `(max_lon, min_lat)` the end indices.
    pub fn tile_range(&self, zoom: u8) -> TileRange {
        let (x_start, y_start) = self
            .project_pixels(self.bbox.min_lon, self.bbox.max_lat, zoom)
            .tile_index();
        let (x_end, y_end) = self
            .project_pixels(self.bbox.max_lon, self.bbox.min_lat, zoom)
            .tile_index();
        TileRange {
            zoom,
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// Every tile overlapping the box, ordered by zoom, then column, then row.
    pub fn tiles(&self) -> Vec<TileCoord> {
        let mut tiles = Vec::with_capacity(self.tile_count());
        for zoom in self.zoom.levels() {
            tiles.extend(self.tile_range(zoom).tiles());
        }
        tiles
    }

    /// Number of tiles [`Projection::tiles`] would return.
    pub fn tile_count(&self) -> usize {
        self.zoom
            .levels()
            .map(|zoom| self.tile_range(zoom).count())
            .sum()
    }
}

/// Enumerates the tiles covering `bbox` across `zoom`.
pub fn enumerate_tiles(bbox: BoundingBox, zoom: ZoomRange) -> Vec<TileCoord> {
    Projection::new(bbox, zoom).tiles()
}
