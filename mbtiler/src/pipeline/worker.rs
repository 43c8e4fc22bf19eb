//! Async stages: the dispatcher and the fetch workers.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::error::PipelineError;
use crate::coord::TileCoord;
use crate::provider::{AsyncHttpClient, TileFetcher};
use crate::tile::Tile;

/// Work queue receiver shared by every fetch worker.
pub(super) type SharedWorkQueue = Arc<Mutex<mpsc::Receiver<TileCoord>>>;

/// Submits every coordinate to the work queue, then closes it.
///
/// Must run as its own task: with a bounded work queue, `send` waits on
/// the workers while the orchestrator keeps draining acknowledgments.
pub(super) async fn dispatch(
    tiles: Vec<TileCoord>,
    work: mpsc::Sender<TileCoord>,
    cancel: CancellationToken,
) -> Result<(), PipelineError> {
    let total = tiles.len();
    for coord in tiles {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),

            sent = work.send(coord) => {
                sent.map_err(|_| PipelineError::Internal("work queue closed".to_string()))?;
            }
        }
    }
    debug!(tiles = total, "All tiles dispatched");
    Ok(())
}

/// Fetches tiles until the work queue is drained.
///
/// Each coordinate is received by exactly one worker. A fetch failure ends
/// this worker with [`PipelineError::Fetch`]; the orchestrator then cancels
/// the rest.
pub(super) async fn fetch_worker<C>(
    worker_id: usize,
    fetcher: Arc<TileFetcher<C>>,
    work: SharedWorkQueue,
    tiles: mpsc::Sender<Tile>,
    cancel: CancellationToken,
) -> Result<(), PipelineError>
where
    C: AsyncHttpClient,
{
    let mut fetched = 0usize;
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            next = next_coord(&work) => next,
        };

        let Some(coord) = next else {
            debug!(worker = worker_id, fetched, "Work queue drained");
            return Ok(());
        };

        let tile = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            result = fetcher.fetch(coord) => result.map_err(|source| {
                warn!(
                    worker = worker_id,
                    zoom = coord.zoom,
                    col = coord.col,
                    row = coord.row,
                    error = %source,
                    "Tile fetch failed"
                );
                PipelineError::Fetch { coord, source }
            })?,
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            sent = tiles.send(tile) => {
                sent.map_err(|_| PipelineError::Internal("tile queue closed".to_string()))?;
            }
        }

        fetched += 1;
        trace!(worker = worker_id, %coord, "Tile queued for writing");
    }
}

async fn next_coord(work: &Mutex<mpsc::Receiver<TileCoord>>) -> Option<TileCoord> {
    work.lock().await.recv().await
}
