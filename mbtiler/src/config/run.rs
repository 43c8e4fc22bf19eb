//! Validated configuration for a single archive run.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::defaults::{DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_WORKERS, MAX_TILES, MAX_WORKERS};
use super::file::SourceOverrides;
use super::settings::ConfigFile;
use crate::coord::{BoundingBox, CoordError, Projection, ZoomRange};
use crate::provider::{ProviderError, TileSource};
use crate::store::StoreMetadata;

/// Default output archive path.
pub const DEFAULT_OUTPUT: &str = "output.mbtiles";

/// Errors raised while assembling a [`RunConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    Source(#[from] ProviderError),

    #[error("Invalid worker count {0}: must be between 1 and {}", MAX_WORKERS)]
    InvalidWorkers(usize),

    #[error("Invalid queue capacity {0}: must be at least 1")]
    InvalidQueueCapacity(usize),

    #[error("Invalid request timeout {0}s: must be at least 1 second")]
    InvalidTimeout(u64),

    #[error("Output path must not be empty")]
    EmptyOutput,

    #[error("Area covers {count} tiles, more than the limit of {}", MAX_TILES)]
    TooManyTiles { count: usize },
}

/// Everything the pipeline needs for one run.
///
/// Construct with [`RunConfig::builder`]; `build()` rejects anything the
/// pipeline could not execute.
///
/// # Example
///
/// ```
/// use mbtiler::config::RunConfig;
/// use mbtiler::coord::BoundingBox;
///
/// let config = RunConfig::builder()
///     .bbox(BoundingBox::new(55.397945, 25.291090, 55.402741, 25.292889))
///     .zoom(17, 18)
///     .workers(4)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.zoom().to(), 18);
/// assert_eq!(config.output().to_str(), Some("output.mbtiles"));
/// ```
#[derive(Debug, Clone)]
pub struct RunConfig {
    bbox: BoundingBox,
    zoom: ZoomRange,
    output: PathBuf,
    source: TileSource,
    workers: usize,
    queue_capacity: Option<usize>,
    timeout_secs: u64,
    write_metadata: bool,
    name: Option<String>,
    description: Option<String>,
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn zoom(&self) -> ZoomRange {
        self.zoom
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn source(&self) -> &TileSource {
        &self.source
    }

    /// Number of concurrent fetch workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Bound on the pipeline queues; `None` sizes them to the tile count.
    pub fn queue_capacity(&self) -> Option<usize> {
        self.queue_capacity
    }

    /// HTTP request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Whether the metadata table is populated before tiles are written.
    pub fn write_metadata(&self) -> bool {
        self.write_metadata
    }

    /// Metadata for this run, with any name/description overrides applied.
    pub fn metadata(&self) -> StoreMetadata {
        let mut metadata = StoreMetadata::new(self.source.format(), &self.bbox, self.zoom);
        if let Some(name) = &self.name {
            metadata = metadata.with_name(name.clone());
        }
        if let Some(description) = &self.description {
            metadata = metadata.with_description(description.clone());
        }
        metadata
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug, Clone, Default)]
pub struct RunConfigBuilder {
    bbox: Option<BoundingBox>,
    zoom: Option<(u8, u8)>,
    output: Option<PathBuf>,
    source: Option<TileSource>,
    workers: Option<usize>,
    queue_capacity: Option<usize>,
    timeout_secs: Option<u64>,
    write_metadata: Option<bool>,
    name: Option<String>,
    description: Option<String>,
}

impl RunConfigBuilder {
    /// Seeds source and download settings from a config file.
    ///
    /// The source is resolved with `overrides` applied (see
    /// [`ConfigFile::tile_source_with`]). Values set afterwards on the
    /// builder take precedence.
    pub fn from_config_file(
        config: &ConfigFile,
        overrides: &SourceOverrides,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            source: Some(config.tile_source_with(overrides)?),
            workers: Some(config.download.workers),
            queue_capacity: config.download.queue_capacity,
            timeout_secs: Some(config.download.timeout),
            ..Self::default()
        })
    }

    pub fn bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Inclusive zoom range.
    pub fn zoom(mut self, from: u8, to: u8) -> Self {
        self.zoom = Some((from, to));
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn source(mut self, source: TileSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn write_metadata(mut self, enabled: bool) -> Self {
        self.write_metadata = Some(enabled);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let bbox = self.bbox.ok_or(ConfigError::Missing("bbox"))?;
        bbox.validate()?;

        let (from, to) = self.zoom.ok_or(ConfigError::Missing("zoom"))?;
        let zoom = ZoomRange::new(from, to)?;

        let count = Projection::new(bbox, zoom).tile_count();
        if count > MAX_TILES {
            return Err(ConfigError::TooManyTiles { count });
        }

        let output = self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        if output.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutput);
        }

        let workers = self.workers.unwrap_or(DEFAULT_WORKERS);
        if !(1..=MAX_WORKERS).contains(&workers) {
            return Err(ConfigError::InvalidWorkers(workers));
        }

        if let Some(capacity) = self.queue_capacity {
            if capacity == 0 {
                return Err(ConfigError::InvalidQueueCapacity(capacity));
            }
        }

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs));
        }

        Ok(RunConfig {
            bbox,
            zoom,
            output,
            source: self.source.unwrap_or_else(TileSource::osm),
            workers,
            queue_capacity: self.queue_capacity,
            timeout_secs,
            write_metadata: self.write_metadata.unwrap_or(true),
            name: self.name,
            description: self.description,
        })
    }
}
