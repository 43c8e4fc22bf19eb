//! The single store writer.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::PipelineError;
use crate::coord::TileCoord;
use crate::store::TileStore;
use crate::tile::Tile;

/// Persists fetched tiles one at a time and acknowledges each write.
///
/// Blocking: runs on a `spawn_blocking` thread and owns the store for the
/// whole run, so the store never sees concurrent writes. Returns the store
/// once the tile queue closes so the caller can finalize it.
pub(super) fn write_tiles<S>(
    mut store: S,
    mut tiles: mpsc::Receiver<Tile>,
    acks: mpsc::Sender<TileCoord>,
    cancel: CancellationToken,
) -> Result<S, PipelineError>
where
    S: TileStore,
{
    let mut written = 0usize;
    while let Some(tile) = tiles.blocking_recv() {
        if cancel.is_cancelled() {
            debug!(written, "Writer cancelled");
            return Err(PipelineError::Cancelled);
        }

        let coord = tile.coord();
        if let Err(e) = store.write_tile(&tile) {
            warn!(
                zoom = coord.zoom,
                col = coord.col,
                row = coord.row,
                error = %e,
                "Tile write failed"
            );
            return Err(PipelineError::Store(e));
        }
        drop(tile);
        written += 1;
        debug!(zoom = coord.zoom, col = coord.col, row = coord.row, "Tile written");

        acks.blocking_send(coord)
            .map_err(|_| PipelineError::Internal("acknowledgment queue closed".to_string()))?;
    }

    debug!(written, "Tile queue closed, writer done");
    Ok(store)
}
