//! Run lifecycle and outcome.

use std::fmt;
use std::path::PathBuf;

/// Phase of a pipeline run.
///
/// Transitions are strictly linear:
/// `Enumerating → Dispatching → AwaitingCompletion → Finalizing → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunState {
    Enumerating,
    Dispatching,
    AwaitingCompletion,
    Finalizing,
    Done,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Enumerating => "enumerating",
            RunState::Dispatching => "dispatching",
            RunState::AwaitingCompletion => "awaiting_completion",
            RunState::Finalizing => "finalizing",
            RunState::Done => "done",
        }
    }

    /// The state that follows this one, `None` after `Done`.
    pub fn next(&self) -> Option<RunState> {
        match self {
            RunState::Enumerating => Some(RunState::Dispatching),
            RunState::Dispatching => Some(RunState::AwaitingCompletion),
            RunState::AwaitingCompletion => Some(RunState::Finalizing),
            RunState::Finalizing => Some(RunState::Done),
            RunState::Done => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of tiles written (equal to the number enumerated)
    pub tiles: usize,
    /// Archive location
    pub output: PathBuf,
}
