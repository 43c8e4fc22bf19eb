//! Tile source abstraction
//!
//! This module resolves tile URLs from templates and downloads raw tile
//! bytes over HTTP.
//!
//! ```ignore
//! use mbtiler::provider::{AsyncReqwestClient, TileFetcher, TileSource};
//!
//! let client = AsyncReqwestClient::new()?;
//! let fetcher = TileFetcher::new(client, TileSource::osm());
//! let tile = fetcher.fetch(TileCoord::new(4, 2, 1)).await?;
//! ```

mod fetcher;
mod http;
mod source;
mod types;

pub use fetcher::TileFetcher;
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use source::{render_template, SourceKind, TileSource, COL_TOKEN, ROW_TOKEN, ZOOM_TOKEN};
pub use types::{ImageFormat, ProviderError};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
