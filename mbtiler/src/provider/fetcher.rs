//! Single-tile retrieval.

use tracing::{debug, instrument};

use super::http::AsyncHttpClient;
use super::source::TileSource;
use super::types::ProviderError;
use crate::coord::TileCoord;
use crate::tile::Tile;

/// Fetches tiles from one [`TileSource`] over an [`AsyncHttpClient`].
///
/// One outbound request per call, no retries. The response body is fully
/// buffered before the [`Tile`] is returned.
pub struct TileFetcher<C> {
    client: C,
    source: TileSource,
}

impl<C: AsyncHttpClient> TileFetcher<C> {
    pub fn new(client: C, source: TileSource) -> Self {
        Self { client, source }
    }

    pub fn source(&self) -> &TileSource {
        &self.source
    }

    /// Downloads the tile at `coord`.
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn fetch(&self, coord: TileCoord) -> Result<Tile, ProviderError> {
        let url = self.source.url_for(&coord);
        let content = self.client.get(&url).await?;
        debug!(
            zoom = coord.zoom,
            col = coord.col,
            row = coord.row,
            bytes = content.len(),
            "Tile fetched"
        );
        Ok(Tile::new(coord, content))
    }
}
