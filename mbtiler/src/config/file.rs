//! Configuration file handling for ~/.mbtiler/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use super::settings::*;

use crate::provider::{ImageFormat, ProviderError, SourceKind, TileSource};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.mbtiler/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the config file at `path` with defaults if it doesn't exist.
    ///
    /// Returns true when a new file was written.
    pub fn ensure_exists_at(path: &Path) -> Result<bool, ConfigFileError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    /// Resolves the configured tile source.
    ///
    /// A custom `url` wins over `type`; the `format` override applies to both.
    pub fn tile_source(&self) -> Result<TileSource, ProviderError> {
        self.tile_source_with(&SourceOverrides::default())
    }

    /// Resolves the tile source with command-line overrides applied.
    ///
    /// Precedence, highest first: override URL, override kind, configured
    /// URL, configured type. Only the winning layer is validated, so an
    /// unusable configured source does not block an override. The override
    /// token and format replace the configured ones.
    pub fn tile_source_with(&self, overrides: &SourceOverrides) -> Result<TileSource, ProviderError> {
        let settings = &self.source;
        let token = overrides
            .mapbox_token
            .as_deref()
            .or(settings.mapbox_access_token.as_deref());

        let source = match (&overrides.url, overrides.kind, &settings.url) {
            (Some(url), _, _) => TileSource::custom(url.clone())?,
            (None, Some(kind), _) => kind.to_source(token)?,
            (None, None, Some(url)) => TileSource::custom(url.clone())?,
            (None, None, None) => settings.source_type.parse::<SourceKind>()?.to_source(token)?,
        };
        Ok(match overrides.format.or(settings.format) {
            Some(format) => source.with_format(format),
            None => source,
        })
    }
}

/// Source choices made outside the config file, typically on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceOverrides {
    pub kind: Option<SourceKind>,
    pub url: Option<String>,
    pub format: Option<ImageFormat>,
    pub mapbox_token: Option<String>,
}

/// Get the path to the config directory (~/.mbtiler).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mbtiler")
}

/// Get the path to the config file (~/.mbtiler/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
