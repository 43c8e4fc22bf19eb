//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use mbtiler::config::{ConfigError, ConfigFileError};
use mbtiler::pipeline::PipelineError;
use mbtiler::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to read or write the config file
    ConfigFile(ConfigFileError),
    /// Run configuration rejected
    RunConfig(ConfigError),
    /// Failed to create the HTTP client
    HttpClient(ProviderError),
    /// Failed to start the async runtime or signal handler
    Runtime(String),
    /// The archive run failed
    Pipeline(PipelineError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Pipeline(PipelineError::NoTiles) => {
                eprintln!();
                eprintln!("Check the bounding box:");
                eprintln!("  1. Longitudes must lie within -180..180 (--xmin/--xmax)");
                eprintln!("  2. Latitudes must lie within -85..85 (--ymin/--ymax)");
            }
            CliError::Pipeline(PipelineError::Fetch { .. }) => {
                eprintln!();
                eprintln!("The tile server rejected a request. Common issues:");
                eprintln!("  1. Network unavailable or tile server down");
                eprintln!("  2. Missing or invalid access token (--mapbox-token)");
                eprintln!("  3. Server requires a different URL template (--url)");
            }
            CliError::Pipeline(PipelineError::Store(_)) => {
                eprintln!();
                eprintln!("Make sure the output directory exists and is writable.");
            }
            CliError::RunConfig(ConfigError::Source(ProviderError::MissingCredential(_))) => {
                eprintln!();
                eprintln!("Set mapbox_access_token in config.ini or use --mapbox-token.");
            }
            CliError::RunConfig(ConfigError::TooManyTiles { .. }) => {
                eprintln!();
                eprintln!("Shrink the bounding box or lower --max-zoom.");
            }
            CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!("Run 'mbtiler init --force' to rewrite the config file with defaults.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::RunConfig(e) => write!(f, "Invalid run configuration: {}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            CliError::Pipeline(e) => write!(f, "Archive failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::RunConfig(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::RunConfig(e)
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}
