//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading and logging initialization so command
//! handlers start from the same state.

use std::path::Path;

use crate::error::CliError;
use mbtiler::config::ConfigFile;
use mbtiler::logging::{init_logging, split_log_path, LoggingGuard};
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file; `None` uses ~/.mbtiler/config.ini
    /// * `debug_mode` - When true, enables debug-level logging unless RUST_LOG is set
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("mbtiler v{}", mbtiler::VERSION);
        info!("mbtiler CLI: {} command", command);
    }
}
