//! Driver settings from environment variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TILEFALL_GRID_SIZE` | `grid_size` | 8 |
//! | `TILEFALL_NUM_TILE_TYPES` | `num_tile_types` | 3 |
//! | `TILEFALL_NUM_TO_MATCH` | `num_to_match` | 3 |
//! | `TILEFALL_TICK_INTERVAL_MS` | `tick_interval_ms` | 16 |
//! | `TILEFALL_SLEEP_EVERY_N_TICKS` | `sleep_every_n_ticks` | 1 |
//! | `TILEFALL_SEED` | engine seed | derived from the clock |
//!
//! Missing or unparsable values fall back to the default; out-of-range values
//! are clamped.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::Config;

pub const GRID_SIZE_VAR: &str = "TILEFALL_GRID_SIZE";
pub const NUM_TILE_TYPES_VAR: &str = "TILEFALL_NUM_TILE_TYPES";
pub const NUM_TO_MATCH_VAR: &str = "TILEFALL_NUM_TO_MATCH";
pub const TICK_INTERVAL_MS_VAR: &str = "TILEFALL_TICK_INTERVAL_MS";
pub const SLEEP_EVERY_N_TICKS_VAR: &str = "TILEFALL_SLEEP_EVERY_N_TICKS";
pub const SEED_VAR: &str = "TILEFALL_SEED";

/// Everything needed to start a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSettings {
    pub config: Config,
    pub seed: u32,
}

impl DriverSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), clock_seed())
    }

    /// Read settings through `lookup`; `fallback_seed` is used when no seed is set
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, fallback_seed: u32) -> Self {
        let defaults = Config::default();

        let config = Config {
            grid_size: parse(&lookup, GRID_SIZE_VAR).unwrap_or(defaults.grid_size),
            num_tile_types: parse(&lookup, NUM_TILE_TYPES_VAR).unwrap_or(defaults.num_tile_types),
            num_to_match: parse(&lookup, NUM_TO_MATCH_VAR).unwrap_or(defaults.num_to_match),
            tick_interval_ms: parse(&lookup, TICK_INTERVAL_MS_VAR)
                .unwrap_or(defaults.tick_interval_ms),
            sleep_every_n_ticks: parse(&lookup, SLEEP_EVERY_N_TICKS_VAR)
                .unwrap_or(defaults.sleep_every_n_ticks),
        };

        Self {
            config: config.sanitized(),
            seed: parse(&lookup, SEED_VAR).unwrap_or(fallback_seed),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
