//! Engine errors
//!
//! Everything here is either a broken structural invariant (fatal for the
//! driver) or a rejected saved state. Bad user input never surfaces as an
//! error: it is clamped or dropped at the boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("expected a tile at ({x}, {y}) but the cell is empty")]
    UnexpectedEmptyCell { x: usize, y: usize },

    #[error("board side is {actual}, configuration expects {expected}")]
    BoardSizeMismatch { expected: usize, actual: usize },

    #[error("reservoir holds {actual} tiles, configuration expects {expected}")]
    ReservoirSizeMismatch { expected: usize, actual: usize },

    #[error("falling payload covers {actual} lanes, board has {expected}")]
    LaneCountMismatch { expected: usize, actual: usize },

    #[error("tile falling into lane {lane} would land on an occupied cell at depth {depth}")]
    FallOntoOccupiedCell { lane: usize, depth: usize },

    #[error("invalid saved state: {0}")]
    InvalidSavedState(String),
}
