//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::provider::ImageFormat;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tile source settings
    pub source: SourceSettings,
    /// Download settings
    pub download: DownloadSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Tile source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Built-in source: "google", "osm" or "mapbox"
    pub source_type: String,
    /// Custom URL template; takes precedence over `source_type` when set
    pub url: Option<String>,
    /// Image format override for the source
    pub format: Option<ImageFormat>,
    /// MapBox access token (only required for "mapbox")
    pub mapbox_access_token: Option<String>,
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Number of concurrent fetch workers
    pub workers: usize,
    /// Timeout in seconds for each HTTP request
    pub timeout: u64,
    /// Capacity of the pipeline queues; `None` sizes them to the tile count
    pub queue_capacity: Option<usize>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
