//! Fetch command - download a bounding box into an MBTiles archive.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use mbtiler::config::{ConfigFile, RunConfig, RunConfigBuilder, SourceOverrides};
use mbtiler::coord::BoundingBox;
use mbtiler::pipeline;
use mbtiler::provider::AsyncReqwestClient;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::common::{FormatArg, SourceType};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Western edge (minimum longitude, degrees)
    #[arg(long, default_value_t = 55.397945, allow_negative_numbers = true)]
    pub xmin: f64,

    /// Southern edge (minimum latitude, degrees)
    #[arg(long, default_value_t = 25.291090, allow_negative_numbers = true)]
    pub ymin: f64,

    /// Eastern edge (maximum longitude, degrees)
    #[arg(long, default_value_t = 55.402741, allow_negative_numbers = true)]
    pub xmax: f64,

    /// Northern edge (maximum latitude, degrees)
    #[arg(long, default_value_t = 25.292889, allow_negative_numbers = true)]
    pub ymax: f64,

    /// First zoom level
    #[arg(long, default_value_t = 17)]
    pub zoom: u8,

    /// Last zoom level (inclusive)
    #[arg(long, default_value_t = 17)]
    pub max_zoom: u8,

    /// Output MBTiles file (replaced if it exists)
    #[arg(long, short, default_value = "output.mbtiles")]
    pub output: PathBuf,

    /// Built-in tile source (default from config, else osm)
    #[arg(long, value_enum)]
    pub source: Option<SourceType>,

    /// Custom URL template with {z}, {x} and {y} placeholders
    #[arg(long, conflicts_with = "source")]
    pub url: Option<String>,

    /// Image format override
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// MapBox access token (required with --source mapbox)
    #[arg(long)]
    pub mapbox_token: Option<String>,

    /// Number of concurrent downloads
    #[arg(long)]
    pub workers: Option<usize>,

    /// Bound on the pipeline queues (default: number of tiles)
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Archive name metadata (default: random UUID)
    #[arg(long)]
    pub name: Option<String>,

    /// Archive description metadata (default: random UUID)
    #[arg(long)]
    pub description: Option<String>,

    /// Skip writing the metadata table
    #[arg(long)]
    pub no_metadata: bool,
}

impl FetchArgs {
    fn source_overrides(&self) -> SourceOverrides {
        SourceOverrides {
            kind: self.source.map(Into::into),
            url: self.url.clone(),
            format: self.format.map(Into::into),
            mapbox_token: self.mapbox_token.clone(),
        }
    }

    /// Builds the run configuration; CLI values override the config file.
    pub fn to_run_config(&self, config: &ConfigFile) -> Result<RunConfig, CliError> {
        let mut builder = RunConfigBuilder::from_config_file(config, &self.source_overrides())?
            .bbox(BoundingBox::new(self.xmin, self.ymin, self.xmax, self.ymax))
            .zoom(self.zoom, self.max_zoom)
            .output(self.output.clone())
            .write_metadata(!self.no_metadata);

        if let Some(workers) = self.workers {
            builder = builder.workers(workers);
        }
        if let Some(capacity) = self.queue_capacity {
            builder = builder.queue_capacity(capacity);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout_secs(timeout);
        }
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        if let Some(description) = &self.description {
            builder = builder.description(description.clone());
        }

        Ok(builder.build()?)
    }
}

/// Run the fetch command.
pub fn run(args: FetchArgs, runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("fetch");
    let config = args.to_run_config(runner.config())?;

    println!("Fetching tiles for:");
    println!("  Bounds: {}", config.bbox());
    println!("  Zoom: {}", config.zoom());
    println!("  Source: {} ({})", config.source().name(), config.source().format());
    println!("  Output: {}", config.output().display());
    println!();

    let client = AsyncReqwestClient::with_timeout(config.timeout_secs())
        .map_err(CliError::HttpClient)?;

    // Ctrl-C cancels the run; workers and the writer stop at their next check
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    ctrlc::set_handler(move || {
        warn!("Interrupt received, cancelling");
        signal_token.cancel();
    })
    .map_err(|e| CliError::Runtime(format!("Failed to set signal handler: {}", e)))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(format!("Failed to start async runtime: {}", e)))?;

    let start = Instant::now();
    let report = runtime.block_on(pipeline::run(&config, client, cancel))?;
    let elapsed = start.elapsed();

    info!(
        tiles = report.tiles,
        output = %report.output.display(),
        elapsed_secs = elapsed.as_secs_f64(),
        "Fetch complete"
    );
    println!(
        "Saved {} tiles to {} in {:.2}s",
        report.tiles,
        report.output.display(),
        elapsed.as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mbtiler::config::ConfigError;
    use mbtiler::provider::{ImageFormat, ProviderError, TileSource};

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        fetch: FetchArgs,
    }

    fn parse(args: &[&str]) -> FetchArgs {
        TestCli::parse_from(std::iter::once("mbtiler").chain(args.iter().copied())).fetch
    }

    #[test]
    fn test_defaults_match_sample_area() {
        let args = parse(&[]);
        assert_eq!(args.xmin, 55.397945);
        assert_eq!(args.ymax, 25.292889);
        assert_eq!((args.zoom, args.max_zoom), (17, 17));
        assert_eq!(args.output, PathBuf::from("output.mbtiles"));

        let config = args.to_run_config(&ConfigFile::default()).unwrap();
        assert_eq!(config.source(), &TileSource::osm());
        assert_eq!(config.workers(), 20);
        assert!(config.write_metadata());
    }

    #[test]
    fn test_negative_coordinates() {
        let args = parse(&["--xmin", "-74.1", "--xmax", "-73.9", "--ymin", "40.6", "--ymax", "40.8"]);
        assert_eq!(args.xmin, -74.1);

        let config = args.to_run_config(&ConfigFile::default()).unwrap();
        assert_eq!(config.bbox().max_lon, -73.9);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let mut file = ConfigFile::default();
        file.download.workers = 2;
        file.download.queue_capacity = Some(8);
        file.download.timeout = 15;

        let args = parse(&[
            "--workers",
            "6",
            "--source",
            "google",
            "--format",
            "png",
            "--no-metadata",
            "--name",
            "test",
        ]);
        let config = args.to_run_config(&file).unwrap();

        assert_eq!(config.workers(), 6);
        assert_eq!(config.queue_capacity(), Some(8));
        assert_eq!(config.timeout_secs(), 15);
        assert_eq!(config.source().format(), ImageFormat::Png);
        assert!(!config.write_metadata());
        assert_eq!(config.metadata().name, "test");
    }

    #[test]
    fn test_invalid_zoom_range_rejected() {
        let args = parse(&["--zoom", "18", "--max-zoom", "17"]);
        assert!(matches!(
            args.to_run_config(&ConfigFile::default()),
            Err(CliError::RunConfig(_))
        ));
    }

    #[test]
    fn test_cli_url_wins_over_unusable_config_source() {
        let mut file = ConfigFile::default();
        file.source.source_type = "mapbox".to_string();

        let args = parse(&["--url", "https://cli.example.com/{z}/{x}/{y}.jpg"]);
        let config = args.to_run_config(&file).unwrap();
        assert_eq!(config.source().name(), "custom");
        assert_eq!(config.source().format(), ImageFormat::Jpg);

        assert!(matches!(
            parse(&[]).to_run_config(&file),
            Err(CliError::RunConfig(ConfigError::Source(
                ProviderError::MissingCredential(_)
            )))
        ));
    }

    #[test]
    fn test_mapbox_token_flag() {
        let args = parse(&["--source", "mapbox", "--mapbox-token", "pk.test"]);
        let config = args.to_run_config(&ConfigFile::default()).unwrap();
        assert!(config.source().template().ends_with("access_token=pk.test"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let args = parse(&["--url", "https://example.com/tiles.png"]);
        assert!(matches!(
            args.to_run_config(&ConfigFile::default()),
            Err(CliError::RunConfig(ConfigError::Source(
                ProviderError::InvalidTemplate(_)
            )))
        ));
    }

    #[test]
    fn test_url_conflicts_with_source() {
        let result = TestCli::try_parse_from([
            "mbtiler",
            "--source",
            "osm",
            "--url",
            "https://t.example.com/{z}/{x}/{y}.png",
        ]);
        assert!(result.is_err());
    }
}
