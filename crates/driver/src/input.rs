//! External input holder
//!
//! Swaps, gravity changes and configuration arrive from other threads at any
//! time. They are parked here and merged into the engine snapshot once per
//! tick, right before it advances.

use tracing::debug;

use crate::core::{Config, GameState, SwapRequest};
use crate::types::FallFrom;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalInput {
    config: Config,
    fall_from: FallFrom,
    swap: Option<SwapRequest>,
}

impl ExternalInput {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.sanitized(),
            ..Self::default()
        }
    }

    /// Newest requested configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config.sanitized();
    }

    pub fn fall_from(&self) -> FallFrom {
        self.fall_from
    }

    pub fn set_fall_from(&mut self, fall_from: FallFrom) {
        self.fall_from = fall_from;
    }

    /// Park a swap; replaces any swap not yet merged
    pub fn submit_swap(&mut self, swap: SwapRequest) {
        self.swap = Some(swap);
    }

    pub fn pending_swap(&self) -> Option<SwapRequest> {
        self.swap
    }

    /// Apply everything parked here to `state`
    ///
    /// Gravity and configuration stay parked until the engine accepts them.
    /// A swap is consumed either way: the engine rejects it unless it is
    /// idle and both cells are on the board.
    pub fn merge_into(&mut self, state: &mut GameState) {
        if state.fall_from() != self.fall_from && state.set_fall_from(self.fall_from) {
            debug!(fall_from = self.fall_from.as_str(), "gravity changed");
        }

        if *state.config() != self.config {
            if state.apply_config(self.config) {
                debug!(grid_size = self.config.grid_size, "configuration applied");
            } else {
                debug!(step = state.step_kind().as_str(), "configuration deferred");
            }
        }

        if let Some(swap) = self.swap.take() {
            if !state.submit_swap(swap) {
                debug!(
                    x = swap.touched.x,
                    y = swap.touched.y,
                    direction = swap.direction.as_str(),
                    "swap dropped"
                );
            }
        }
    }
}
