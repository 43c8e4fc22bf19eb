//! MBTiles metadata table contents.

use uuid::Uuid;

use crate::coord::{BoundingBox, ZoomRange};
use crate::provider::ImageFormat;

/// MBTiles specification version written to the `version` key.
pub const MBTILES_VERSION: &str = "1.2";

/// Layer type written to the `type` key.
pub const LAYER_TYPE: &str = "overlay";

/// Descriptive key/value pairs stored alongside the tiles.
///
/// Computed once from the run parameters and written before any tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMetadata {
    pub name: String,
    pub description: String,
    pub format: ImageFormat,
    pub version: String,
    pub layer_type: String,
    pub bounds: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl StoreMetadata {
    /// Builds metadata for a run.
    ///
    /// Name and description default to a fresh random UUID.
    pub fn new(format: ImageFormat, bbox: &BoundingBox, zoom: ZoomRange) -> Self {
        let id = Uuid::new_v4().to_string();
        Self {
            name: id.clone(),
            description: id,
            format,
            version: MBTILES_VERSION.to_string(),
            layer_type: LAYER_TYPE.to_string(),
            bounds: bbox.to_bounds_string(),
            min_zoom: zoom.from(),
            max_zoom: zoom.to(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Rows for the `metadata` table, in a fixed order.
    pub fn items(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("format", self.format.extension().to_string()),
            ("version", self.version.clone()),
            ("type", self.layer_type.clone()),
            ("bounds", self.bounds.clone()),
            ("minzoom", self.min_zoom.to_string()),
            ("maxzoom", self.max_zoom.to_string()),
        ]
    }
}
