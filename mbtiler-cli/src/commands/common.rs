//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use mbtiler::provider::{ImageFormat, SourceKind};

/// Built-in tile source selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum SourceType {
    /// Google hybrid imagery (jpg)
    Google,
    /// OpenStreetMap standard tiles (png)
    Osm,
    /// MapBox satellite imagery (requires access token)
    Mapbox,
}

impl From<SourceType> for SourceKind {
    fn from(source: SourceType) -> Self {
        match source {
            SourceType::Google => SourceKind::Google,
            SourceType::Osm => SourceKind::Osm,
            SourceType::Mapbox => SourceKind::Mapbox,
        }
    }
}

/// Image format selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum FormatArg {
    Png,
    Jpg,
}

impl From<FormatArg> for ImageFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Jpg => ImageFormat::Jpg,
        }
    }
}
