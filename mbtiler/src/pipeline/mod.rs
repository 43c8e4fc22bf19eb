//! Concurrent fetch → write pipeline.
//!
//! Turns a [`RunConfig`](crate::config::RunConfig) into a populated,
//! finalized tile store.
//!
//! # Architecture
//!
//! ```text
//!              work queue           tile queue            ack queue
//! Dispatcher ──────────────► Fetch workers ──────────► Writer ──────────► Orchestrator
//!  (1 task)     TileCoord     (N async tasks)   Tile   (1 blocking        TileCoord
//!                                                       thread, owns
//!                                                       the store)
//! ```
//!
//! The orchestrator knows the tile count up front and waits for exactly that
//! many acknowledgments before running the store's finalize step. All queues
//! default to the tile count as capacity; a smaller capacity gives real
//! backpressure.
//!
//! Every stage watches a shared `CancellationToken`. The first failure, or
//! an external cancel such as Ctrl-C, stops the run.
//!
//! # Example
//!
//! ```ignore
//! use mbtiler::config::RunConfig;
//! use mbtiler::coord::BoundingBox;
//! use mbtiler::pipeline;
//! use mbtiler::provider::AsyncReqwestClient;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = RunConfig::builder()
//!     .bbox(BoundingBox::new(55.397945, 25.291090, 55.402741, 25.292889))
//!     .zoom(17, 18)
//!     .build()?;
//! let client = AsyncReqwestClient::with_timeout(config.timeout_secs())?;
//! let report = pipeline::run(&config, client, CancellationToken::new()).await?;
//! println!("{} tiles written to {}", report.tiles, report.output.display());
//! ```

mod error;
mod runner;
mod state;
mod worker;
mod writer;

pub use error::PipelineError;
pub use runner::{run, run_with_store};
pub use state::{RunReport, RunState};
