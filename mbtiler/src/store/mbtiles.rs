//! SQLite-backed MBTiles archive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info};

use super::error::StoreError;
use super::metadata::StoreMetadata;
use super::TileStore;
use crate::tile::Tile;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tiles (
        zoom_level INTEGER,
        tile_column INTEGER,
        tile_row INTEGER,
        tile_data BLOB
    );
    CREATE TABLE IF NOT EXISTS metadata (name TEXT, value TEXT);
    CREATE UNIQUE INDEX IF NOT EXISTS name ON metadata (name);
    CREATE UNIQUE INDEX IF NOT EXISTS tile_index ON tiles (zoom_level, tile_column, tile_row);
";

/// Connection tuning for a single-writer bulk load.
const BULK_LOAD_PRAGMAS: &str = "
    PRAGMA synchronous = OFF;
    PRAGMA locking_mode = EXCLUSIVE;
    PRAGMA journal_mode = DELETE;
";

const INSERT_TILE: &str =
    "INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)";

/// An MBTiles 1.2 archive.
///
/// Rows are stored in the TMS convention; [`MbtilesStore::write_tile`] takes
/// XYZ tiles and flips them.
pub struct MbtilesStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl MbtilesStore {
    /// Creates a fresh archive at `path`, replacing any existing file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "Removed existing archive"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::Io(e)),
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(BULK_LOAD_PRAGMAS)?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %path.display(), "Created MBTiles archive");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens an existing archive without touching its contents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Creates an archive held entirely in memory.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, path: None })
    }

    /// Location on disk, `None` for in-memory archives.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored tiles.
    pub fn tile_count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tiles", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Reads a tile by its store key (TMS row).
    pub fn read_tile(&self, zoom: u8, col: u32, tms_row: u32) -> Result<Option<Vec<u8>>, StoreError> {
        let data = self
            .conn
            .query_row(
                "SELECT tile_data FROM tiles
                 WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3",
                params![zoom, col, tms_row],
                |row| row.get(0),
            )
            .optional()?;
        Ok(data)
    }

    /// All `(zoom, column, tms_row)` keys, sorted.
    pub fn tile_keys(&self) -> Result<Vec<(u8, u32, u32)>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT zoom_level, tile_column, tile_row FROM tiles
             ORDER BY zoom_level, tile_column, tile_row",
        )?;
        let keys = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    /// Reads one metadata value.
    pub fn metadata_value(&self, name: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM metadata WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl TileStore for MbtilesStore {
    fn write_metadata(&mut self, metadata: &StoreMetadata) -> Result<(), StoreError> {
        for (name, value) in metadata.items() {
            match self.conn.execute(
                "INSERT INTO metadata (name, value) VALUES (?1, ?2)",
                params![name, value],
            ) {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    return Err(StoreError::DuplicateMetadata(name.to_string()));
                }
                Err(err) => return Err(err.into()),
            }
        }
        debug!(name = %metadata.name, "Metadata written");
        Ok(())
    }

    fn write_tile(&mut self, tile: &Tile) -> Result<(), StoreError> {
        let coord = tile.coord();
        let tms_row = coord.tms_row();
        let mut stmt = self.conn.prepare_cached(INSERT_TILE)?;
        match stmt.execute(params![coord.zoom, coord.col, tms_row, tile.content()]) {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateTile {
                    zoom: coord.zoom,
                    col: coord.col,
                    row: tms_row,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn finalize(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("ANALYZE; VACUUM;")?;
        info!("Archive analyzed and vacuumed");
        Ok(())
    }
}
