//! mbtiler CLI - archive map tiles into MBTiles files
//!
//! This binary provides a command-line interface to the mbtiler library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod runner;

use commands::fetch::FetchArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "mbtiler")]
#[command(version = mbtiler::VERSION)]
#[command(about = "Download map tiles for a bounding box into an MBTiles archive", long_about = None)]
struct Cli {
    /// Config file (default: ~/.mbtiler/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download tiles for a bounding box and zoom range
    Fetch {
        #[command(flatten)]
        args: FetchArgs,

        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },

    /// Create the configuration file with default settings
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { args, debug } => run_fetch(args, cli.config, debug),
        Commands::Init { force } => commands::init::run(cli.config.as_deref(), force),
    };

    if let Err(e) = result {
        e.exit();
    }
}

fn run_fetch(args: FetchArgs, config: Option<PathBuf>, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(config.as_deref(), debug)?;
    commands::fetch::run(args, &runner)
}
