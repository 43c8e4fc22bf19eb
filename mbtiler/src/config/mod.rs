//! Configuration for mbtiler.
//!
//! Two layers:
//!
//! - [`ConfigFile`]: optional user settings in `~/.mbtiler/config.ini`
//! - [`RunConfig`]: the validated record a single run executes, built from
//!   the config file plus command-line overrides
//!
//! # Example
//!
//! ```
//! use mbtiler::config::{ConfigFile, RunConfigBuilder, SourceOverrides};
//! use mbtiler::coord::BoundingBox;
//!
//! let file = ConfigFile::default();
//! let config = RunConfigBuilder::from_config_file(&file, &SourceOverrides::default())
//!     .unwrap()
//!     .bbox(BoundingBox::new(-0.2, 51.4, 0.1, 51.6))
//!     .zoom(10, 12)
//!     .output("london.mbtiles")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.workers(), 20);
//! ```

mod defaults;
mod file;
mod parser;
mod run;
mod settings;
mod writer;

pub use defaults::{
    default_log_file, DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_LOG_FILE, DEFAULT_SOURCE_TYPE,
    DEFAULT_WORKERS, MAX_TILES, MAX_WORKERS,
};
pub use file::{config_directory, config_file_path, ConfigFileError, SourceOverrides};
pub use run::{ConfigError, RunConfig, RunConfigBuilder, DEFAULT_OUTPUT};
pub use settings::{ConfigFile, DownloadSettings, LoggingSettings, SourceSettings};
