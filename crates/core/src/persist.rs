//! Saved state
//!
//! Only the configuration and the kind of each visible cell survive a save.
//! Tile ids, the reservoir and the in-flight step are rebuilt on restore, which
//! always resumes at `CheckForFallableTiles` so any gaps get filled first.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::EngineError;
use crate::game_state::GameState;
use crate::grid::Grid;
use crate::types::TileType;

/// Serializable board layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub config: Config,
    /// Kind index per cell, row-major; `None` is an empty cell
    pub tiles: Vec<Option<u8>>,
}

impl GameState {
    pub fn export(&self) -> SavedState {
        SavedState {
            config: *self.config(),
            tiles: self
                .board()
                .cells()
                .iter()
                .map(|cell| cell.map(|tile| tile.kind().index()))
                .collect(),
        }
    }

    /// Rebuild an engine from a saved layout
    pub fn restore(saved: &SavedState, seed: u32) -> Result<Self, EngineError> {
        let config = saved.config.sanitized();
        let kinds = saved
            .tiles
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                None => Ok(None),
                Some(index) => TileType::from_index(*index).map(Some).ok_or_else(|| {
                    EngineError::InvalidSavedState(format!("unknown tile kind {index} at cell {i}"))
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let len = kinds.len();
        let grid = Grid::from_vec(config.grid_size, kinds).ok_or_else(|| {
            EngineError::InvalidSavedState(format!(
                "{len} cells do not fill a {0}x{0} board",
                config.grid_size
            ))
        })?;

        GameState::from_kinds(config, &grid, seed)
    }
}
