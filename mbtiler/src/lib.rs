//! mbtiler - Offline map tile archiver
//!
//! This library turns a geographic bounding box and a zoom range into an
//! MBTiles archive: it enumerates the Web Mercator tiles covering the box,
//! downloads them concurrently from a tile server, and writes them through a
//! single SQLite writer.
//!
//! # High-Level API
//!
//! ```ignore
//! use mbtiler::config::RunConfig;
//! use mbtiler::coord::BoundingBox;
//! use mbtiler::pipeline;
//! use mbtiler::provider::{AsyncReqwestClient, TileSource};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = RunConfig::builder()
//!     .bbox(BoundingBox::new(55.397945, 25.291090, 55.402741, 25.292889))
//!     .zoom(17, 19)
//!     .source(TileSource::osm())
//!     .output("dubai.mbtiles")
//!     .build()?;
//!
//! let client = AsyncReqwestClient::with_timeout(config.timeout_secs())?;
//! let report = pipeline::run(&config, client, CancellationToken::new()).await?;
//! ```
//!
//! # Modules
//!
//! - [`coord`] - projection and tile enumeration
//! - [`provider`] - tile sources and HTTP fetching
//! - [`store`] - the MBTiles archive
//! - [`pipeline`] - concurrent fetch/write orchestration
//! - [`config`] - run configuration and the user config file
//! - [`logging`] - tracing setup

pub mod config;
pub mod coord;
pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod store;
pub mod tile;

/// Version of the mbtiler library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
