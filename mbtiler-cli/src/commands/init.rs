//! Init command - write the default configuration file.

use std::path::Path;

use mbtiler::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// Writes to `config_path` when given, else ~/.mbtiler/config.ini. Leaves
/// an existing file untouched unless `force` is set.
pub fn run(config_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    match config_path {
        Some(path) => run_at(path, force),
        None => run_at(&config_file_path(), force),
    }
}

fn run_at(path: &Path, force: bool) -> Result<(), CliError> {
    if force {
        ConfigFile::default().save_to(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    if ConfigFile::ensure_exists_at(path)? {
        println!("Created configuration file at {}", path.display());
    } else {
        println!("Configuration file already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        run_at(&path, false).unwrap();

        assert!(path.exists());
        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.download.workers, ConfigFile::default().download.workers);
    }

    #[test]
    fn test_keeps_existing_file_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[download]\nworkers = 3\n").unwrap();

        run_at(&path, false).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap().download.workers, 3);

        run_at(&path, true).unwrap();
        assert_eq!(
            ConfigFile::load_from(&path).unwrap().download.workers,
            ConfigFile::default().download.workers
        );
    }
}
