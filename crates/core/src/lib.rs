//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the board model, the match rules and the step state
//! machine. It has **no dependencies** on rendering, input capture, threads or
//! I/O:
//!
//! - **Deterministic**: the same seed and the same inputs produce the same boards
//! - **Orientation-agnostic**: gravity from any edge reduces to falling downward
//! - **Tick-driven**: one call to [`GameState::advance`] is one animation tick
//!
//! # Module Structure
//!
//! - [`grid`]: square row-major storage shared by boards, masks and kind views
//! - [`transform`]: gravity alignment and coordinate maps
//! - [`board`]: the visible board and the reservoir strip
//! - [`matcher`]: run detection and removal
//! - [`step`]: the phases of the state machine and their timing
//! - [`game_state`]: the snapshot and its transition handlers
//! - [`snapshot`]: renderer-facing sprites with animation offsets
//! - [`persist`]: saved-state export and restore
//!
//! # Example
//!
//! ```
//! use tilefall_core::{Config, GameState, StepKind};
//!
//! let mut game = GameState::new(Config::default(), 12345);
//!
//! // Settle the random board until it waits for a swap
//! while game.advance().unwrap() != StepKind::WaitForInput {}
//!
//! assert!(game.board().is_full());
//! assert_eq!(game.board().size(), 8);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod matcher;
pub mod persist;
pub mod rng;
pub mod snapshot;
pub mod step;
pub mod tile;
pub mod transform;

pub use tilefall_types as types;

// Re-export commonly used types for convenience
pub use board::{generate_initial_board, Board, Cell, Reservoir};
pub use config::Config;
pub use error::EngineError;
pub use game_state::GameState;
pub use grid::Grid;
pub use matcher::{remove_matches, MatchOutcome};
pub use persist::SavedState;
pub use rng::SimpleRng;
pub use snapshot::{RenderSnapshot, TileSprite};
pub use step::{InputDetected, RemovingTiles, Step, StepKind, SwapRequest, TilesFalling};
pub use tile::{Tile, TileFactory, TileId};
pub use transform::{align, from_aligned, to_aligned, transpose};
