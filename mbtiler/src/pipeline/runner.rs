//! Run orchestration.
//!
//! Wires the enumerated tile list through the fetch workers and the single
//! writer, counts acknowledgments, and finalizes the store once every tile
//! is persisted.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::error::PipelineError;
use super::state::{RunReport, RunState};
use super::worker::{dispatch, fetch_worker};
use super::writer::write_tiles;
use crate::config::RunConfig;
use crate::coord::{Projection, TileCoord};
use crate::provider::{AsyncHttpClient, TileFetcher};
use crate::store::{MbtilesStore, StoreError, TileStore};
use crate::tile::Tile;

/// Archives `config`'s tiles into a fresh MBTiles file at `config.output()`.
///
/// Any existing file at the output path is replaced. See [`run_with_store`]
/// for the run semantics.
pub async fn run<C>(
    config: &RunConfig,
    client: C,
    cancel: CancellationToken,
) -> Result<RunReport, PipelineError>
where
    C: AsyncHttpClient + 'static,
{
    let output = config.output().to_path_buf();
    run_with_store(config, client, move || MbtilesStore::create(output), cancel).await
}

/// Archives `config`'s tiles into the store returned by `open_store`.
///
/// `open_store` is only called once the tile list is known to be non-empty.
/// Metadata is written first when [`RunConfig::write_metadata`] is set.
/// The run completes after exactly one acknowledgment per enumerated tile,
/// then the store is finalized once. The first failure cancels `cancel`,
/// waits for the remaining tasks and is returned; finalize is skipped.
pub async fn run_with_store<C, S, F>(
    config: &RunConfig,
    client: C,
    open_store: F,
    cancel: CancellationToken,
) -> Result<RunReport, PipelineError>
where
    C: AsyncHttpClient + 'static,
    S: TileStore + 'static,
    F: FnOnce() -> Result<S, StoreError> + Send + 'static,
{
    transition(RunState::Enumerating);
    let tiles = Projection::new(*config.bbox(), config.zoom()).tiles();
    let total = tiles.len();
    if total == 0 {
        warn!(bbox = %config.bbox(), zoom = %config.zoom(), "No tiles to fetch");
        return Err(PipelineError::NoTiles);
    }
    info!(
        tiles = total,
        bbox = %config.bbox(),
        zoom = %config.zoom(),
        source = config.source().name(),
        "Tiles enumerated"
    );
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }

    let metadata = config.write_metadata().then(|| config.metadata());
    let store = tokio::task::spawn_blocking(move || {
        let mut store = open_store()?;
        if let Some(metadata) = metadata {
            store.write_metadata(&metadata)?;
        }
        Ok::<_, StoreError>(store)
    })
    .await
    .map_err(join_failure)?
    .map_err(PipelineError::Store)?;

    transition(RunState::Dispatching);
    let capacity = config.queue_capacity().unwrap_or(total).max(1);
    let (work_tx, work_rx) = mpsc::channel::<TileCoord>(capacity);
    let (tile_tx, tile_rx) = mpsc::channel::<Tile>(capacity);
    let (ack_tx, mut ack_rx) = mpsc::channel::<TileCoord>(capacity);

    let fetcher = Arc::new(TileFetcher::new(client, config.source().clone()));
    let work_rx = Arc::new(Mutex::new(work_rx));
    let mut tasks: JoinSet<Result<(), PipelineError>> = JoinSet::new();
    for worker_id in 0..config.workers() {
        tasks.spawn(fetch_worker(
            worker_id,
            Arc::clone(&fetcher),
            Arc::clone(&work_rx),
            tile_tx.clone(),
            cancel.clone(),
        ));
    }
    drop(tile_tx);
    drop(work_rx);

    let writer_cancel = cancel.clone();
    let mut writer =
        tokio::task::spawn_blocking(move || write_tiles(store, tile_rx, ack_tx, writer_cancel));
    tasks.spawn(dispatch(tiles, work_tx, cancel.clone()));
    debug!(workers = config.workers(), capacity, "Pipeline started");

    transition(RunState::AwaitingCompletion);
    let mut acked = 0usize;
    let mut finished_store: Option<S> = None;
    let mut writer_done = false;

    let outcome: Result<(), PipelineError> = loop {
        if acked == total {
            break Ok(());
        }

        tokio::select! {
            biased;

            _ = cancel.cancelled() => break Err(PipelineError::Cancelled),

            Some(joined) = tasks.join_next() => {
                if let Err(e) = flatten(joined) {
                    break Err(e);
                }
            }

            result = &mut writer, if !writer_done => {
                writer_done = true;
                match flatten(result) {
                    Ok(store) => finished_store = Some(store),
                    Err(e) => break Err(e),
                }
            }

            ack = ack_rx.recv() => match ack {
                Some(coord) => {
                    acked += 1;
                    trace!(%coord, acked, total, "Write acknowledged");
                }
                None => {
                    break Err(PipelineError::Internal(format!(
                        "writer stopped after {} of {} tiles",
                        acked, total
                    )));
                }
            },
        }
    };

    if let Err(mut err) = outcome {
        cancel.cancel();
        drop(ack_rx);
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = flatten(joined) {
                err = err.prefer(e);
            }
        }
        if !writer_done {
            if let Err(e) = flatten(writer.await) {
                err = err.prefer(e);
            }
        }
        warn!(error = %err, acked, total, "Run failed");
        return Err(err);
    }

    while let Some(joined) = tasks.join_next().await {
        flatten(joined)?;
    }
    let mut store = match finished_store {
        Some(store) => store,
        None => flatten(writer.await)?,
    };
    debug!(acked, "All writes acknowledged");

    transition(RunState::Finalizing);
    tokio::task::spawn_blocking(move || store.finalize())
        .await
        .map_err(join_failure)?
        .map_err(PipelineError::Finalize)?;

    transition(RunState::Done);
    let report = RunReport {
        tiles: total,
        output: config.output().to_path_buf(),
    };
    info!(tiles = report.tiles, output = %report.output.display(), "Archive complete");
    Ok(report)
}

fn transition(state: RunState) {
    info!(state = %state, "Pipeline state");
}

fn join_failure(e: JoinError) -> PipelineError {
    PipelineError::Internal(format!("task failed: {}", e))
}

fn flatten<T>(joined: Result<Result<T, PipelineError>, JoinError>) -> Result<T, PipelineError> {
    joined.map_err(join_failure)?
}

