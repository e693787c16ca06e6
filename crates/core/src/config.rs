//! Engine configuration
//!
//! A [`Config`] can be swapped in while the engine runs (see
//! [`GameState::apply_config`](crate::game_state::GameState::apply_config)).
//! Values are never rejected: [`Config::sanitized`] clamps them into range.

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_GRID_SIZE, DEFAULT_NUM_TILE_TYPES, DEFAULT_NUM_TO_MATCH, DEFAULT_SLEEP_EVERY_N_TICKS,
    DEFAULT_TICK_INTERVAL_MS, MAX_TILE_TYPES, MIN_NUM_TO_MATCH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board side length
    pub grid_size: usize,
    /// Number of tile kinds generated (1..=6)
    pub num_tile_types: u8,
    /// Minimum run length that clears
    pub num_to_match: usize,
    /// Pause between driver ticks
    pub tick_interval_ms: u64,
    /// Pause only on ticks divisible by this value
    pub sleep_every_n_ticks: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            num_tile_types: DEFAULT_NUM_TILE_TYPES,
            num_to_match: DEFAULT_NUM_TO_MATCH,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            sleep_every_n_ticks: DEFAULT_SLEEP_EVERY_N_TICKS,
        }
    }
}

impl Config {
    /// Copy with every field clamped into its valid range
    pub fn sanitized(&self) -> Self {
        Self {
            grid_size: self.grid_size.max(1),
            num_tile_types: self.num_tile_types.clamp(1, MAX_TILE_TYPES),
            num_to_match: self.num_to_match.max(MIN_NUM_TO_MATCH),
            tick_interval_ms: self.tick_interval_ms.max(1),
            sleep_every_n_ticks: self.sleep_every_n_ticks.max(1),
        }
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_num_tile_types(mut self, num_tile_types: u8) -> Self {
        self.num_tile_types = num_tile_types;
        self
    }

    pub fn with_num_to_match(mut self, num_to_match: usize) -> Self {
        self.num_to_match = num_to_match;
        self
    }
}
