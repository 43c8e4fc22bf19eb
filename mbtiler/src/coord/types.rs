//! Coordinate type definitions

use std::fmt;

/// Lowest zoom level accepted by a run.
pub const MIN_ZOOM: u8 = 0;
/// Highest zoom level accepted by a run.
///
/// Tile indices at this level still fit comfortably in `u32`.
pub const MAX_ZOOM: u8 = 24;

/// Tile coordinates in the Web Mercator / Slippy Map (XYZ) system.
///
/// Rows grow southward (row 0 is the northern edge of the world), which is
/// the convention tile servers use in their URLs. MBTiles stores rows the
/// other way round; see [`TileCoord::tms_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Zoom level
    pub zoom: u8,
    /// X coordinate (east-west), 0 at west
    pub col: u32,
    /// Y coordinate (north-south), 0 at north
    pub row: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    pub fn new(zoom: u8, col: u32, row: u32) -> Self {
        Self { zoom, col, row }
    }

    /// Returns the row in the TMS convention (row 0 at the southern edge).
    ///
    /// `tms_row = 2^zoom - 1 - row`. The transform is its own inverse.
    #[inline]
    pub fn tms_row(&self) -> u32 {
        flip_row(self.zoom, self.row)
    }

    /// Returns true when both indices lie inside the `2^zoom` grid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        let side = tiles_per_side(self.zoom);
        u64::from(self.col) < side && u64::from(self.row) < side
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

/// Number of tiles along one edge of the grid at `zoom`.
///
/// Saturates at `u64::MAX` for zoom levels of 64 and above.
#[inline]
pub fn tiles_per_side(zoom: u8) -> u64 {
    1u64.checked_shl(u32::from(zoom)).unwrap_or(u64::MAX)
}

/// Converts a row between the XYZ and TMS conventions at the given zoom.
///
/// Rows outside the grid flip to 0.
#[inline]
pub fn flip_row(zoom: u8, row: u32) -> u32 {
    (tiles_per_side(zoom) - 1).saturating_sub(u64::from(row)) as u32
}

/// Geographic rectangle in degrees.
///
/// Construction never fails; use [`BoundingBox::validate`] to reject inverted
/// or non-finite boxes before a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Checks the box is finite and not inverted.
    pub fn validate(&self) -> Result<(), CoordError> {
        let values = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CoordError::InvalidBounds(format!(
                "{} contains a non-finite value",
                self
            )));
        }
        if self.min_lon > self.max_lon {
            return Err(CoordError::InvalidBounds(format!(
                "min longitude {} is greater than max longitude {}",
                self.min_lon, self.max_lon
            )));
        }
        if self.min_lat > self.max_lat {
            return Err(CoordError::InvalidBounds(format!(
                "min latitude {} is greater than max latitude {}",
                self.min_lat, self.max_lat
            )));
        }
        Ok(())
    }

    /// MBTiles `bounds` metadata value: `minLon,minLat,maxLon,maxLat`.
    pub fn to_bounds_string(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) - ({}, {})",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// Inclusive range of zoom levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    from: u8,
    to: u8,
}

impl ZoomRange {
    /// Creates a validated zoom range.
    pub fn new(from: u8, to: u8) -> Result<Self, CoordError> {
        if to > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(to));
        }
        if from > to {
            return Err(CoordError::InvalidZoomRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// A range covering a single zoom level.
    pub fn single(zoom: u8) -> Result<Self, CoordError> {
        Self::new(zoom, zoom)
    }

    /// First zoom level.
    pub fn from(&self) -> u8 {
        self.from
    }

    /// Last zoom level (inclusive).
    pub fn to(&self) -> u8 {
        self.to
    }

    /// Iterates the zoom levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = u8> {
        self.from..=self.to
    }

    pub fn contains(&self, zoom: u8) -> bool {
        (self.from..=self.to).contains(&zoom)
    }
}

impl fmt::Display for ZoomRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Errors raised when validating coordinates, boxes and zoom ranges.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Zoom level is outside valid range (0 to MAX_ZOOM)
    InvalidZoom(u8),
    /// Start zoom is greater than end zoom
    InvalidZoomRange { from: u8, to: u8 },
    /// Bounding box is inverted or contains non-finite values
    InvalidBounds(String),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::InvalidZoomRange { from, to } => {
                write!(
                    f,
                    "Invalid zoom range: start {} is greater than end {}",
                    from, to
                )
            }
            CoordError::InvalidBounds(reason) => write!(f, "Invalid bounding box: {}", reason),
        }
    }
}

impl std::error::Error for CoordError {}
