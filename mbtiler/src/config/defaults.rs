//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;

/// Default built-in tile source.
pub const DEFAULT_SOURCE_TYPE: &str = "osm";

/// Default number of concurrent fetch workers.
pub const DEFAULT_WORKERS: usize = 20;

/// Upper bound on fetch workers.
pub const MAX_WORKERS: usize = 256;

/// Upper bound on the number of tiles a single run may enumerate.
pub const MAX_TILES: usize = 10_000_000;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = crate::provider::DEFAULT_TIMEOUT_SECS;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE: &str = "mbtiler.log";

/// Default log file path (~/.mbtiler/mbtiler.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            download: DownloadSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: DEFAULT_SOURCE_TYPE.to_string(),
            url: None,
            format: None,
            mapbox_access_token: None,
        }
    }
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            queue_capacity: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}
