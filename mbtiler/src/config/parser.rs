//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::MAX_WORKERS;
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::provider::{ImageFormat, SourceKind, TileSource};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("type") {
            let v = v.trim().to_lowercase();
            if v.parse::<SourceKind>().is_err() {
                return Err(invalid("source", "type", &v, "must be one of: google, osm, mapbox"));
            }
            config.source.source_type = v;
        }
        if let Some(v) = non_empty(section.get("url")) {
            TileSource::custom(v).map_err(|e| invalid("source", "url", v, &e.to_string()))?;
            config.source.url = Some(v.to_string());
        }
        if let Some(v) = non_empty(section.get("format")) {
            let format = v
                .parse::<ImageFormat>()
                .map_err(|_| invalid("source", "format", v, "must be png or jpg"))?;
            config.source.format = Some(format);
        }
        if let Some(v) = non_empty(section.get("mapbox_access_token")) {
            config.source.mapbox_access_token = Some(v.to_string());
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("workers") {
            let workers = v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_WORKERS).contains(n))
                .ok_or_else(|| {
                    invalid(
                        "download",
                        "workers",
                        v,
                        &format!("must be a number between 1 and {}", MAX_WORKERS),
                    )
                })?;
            config.download.workers = workers;
        }
        if let Some(v) = section.get("timeout") {
            let timeout = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    invalid("download", "timeout", v, "must be a positive number of seconds")
                })?;
            config.download.timeout = timeout;
        }
        if let Some(v) = non_empty(section.get("queue_capacity")) {
            let capacity = v
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    invalid(
                        "download",
                        "queue_capacity",
                        v,
                        "must be a positive number (leave empty to size queues to the tile count)",
                    )
                })?;
            config.download.queue_capacity = Some(capacity);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
