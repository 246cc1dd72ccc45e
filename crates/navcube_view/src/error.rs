use navcube_core::{CubeError, ParseMoveError};
use thiserror::Error;

/// Error reported for a move or a drain of the move queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The move token could not be decoded. Nothing was enqueued.
    #[error("invalid move: {0}")]
    Parse(#[from] ParseMoveError),
    /// The cube was not in a state where the move could run.
    #[error("move aborted: {0}")]
    Cube(#[from] CubeError),
    /// The move was still waiting in the queue when the queue was cleared.
    #[error("move discarded before it started")]
    Discarded,
}
