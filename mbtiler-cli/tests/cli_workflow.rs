//! Integration tests for the mbtiler binary.
//!
//! Each test runs the real binary with HOME pointed at a temporary
//! directory, so the config file and log file never touch the user's home.
//! None of these tests reach the network.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn mbtiler(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mbtiler"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .current_dir(home)
        .output()
        .expect("failed to run mbtiler binary")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    let output = mbtiler(home.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fetch"));
    assert!(stdout.contains("init"));
}

#[test]
fn test_init_creates_config_file() {
    let home = TempDir::new().unwrap();
    let output = mbtiler(home.path(), &["init"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let config = home.path().join(".mbtiler").join("config.ini");
    let content = std::fs::read_to_string(&config).unwrap();
    assert!(content.contains("[source]"));
    assert!(content.contains("[download]"));

    // Second run keeps the file
    std::fs::write(&config, "[download]\nworkers = 4\n").unwrap();
    let output = mbtiler(home.path(), &["init"]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&config).unwrap(),
        "[download]\nworkers = 4\n"
    );
}

#[test]
fn test_init_with_explicit_config_path() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.ini");
    let output = mbtiler(
        home.path(),
        &["init", "--config", path.to_str().unwrap()],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(path.exists());
    assert!(!home.path().join(".mbtiler").join("config.ini").exists());
}

#[test]
fn test_invalid_zoom_range_exits_with_error() {
    let home = TempDir::new().unwrap();
    let output = mbtiler(home.path(), &["fetch", "--zoom", "18", "--max-zoom", "17"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid run configuration"));
    assert!(!home.path().join("output.mbtiles").exists());
}

#[test]
fn test_empty_area_exits_without_creating_archive() {
    let home = TempDir::new().unwrap();
    let output = mbtiler(
        home.path(),
        &[
            "fetch", "--xmin", "200", "--ymin", "0", "--xmax", "210", "--ymax", "1", "--zoom",
            "1", "--max-zoom", "1", "--output", "empty.mbtiles",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Check the bounding box"));
    assert!(!home.path().join("empty.mbtiles").exists());
}

#[test]
fn test_invalid_config_file_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".mbtiler");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.ini"), "[download]\nworkers = lots\n").unwrap();

    let output = mbtiler(home.path(), &["fetch"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("mbtiler init --force"));
}
