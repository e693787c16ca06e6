//! Step module - the phases of the board state machine
//!
//! Each phase is a [`Step`] variant carrying exactly the data its handler
//! needs. Animated phases record the tick they started on and only hand over
//! to the next phase once their window has elapsed:
//!
//! | Step | Duration (ticks) |
//! |------|------------------|
//! | `InputDetected` | 8 |
//! | `TilesFalling` | 8 |
//! | `RemovingTiles` | 24 |
//!
//! `WaitForInput`, `CheckForFallableTiles` and `CheckForPoints` are decided on
//! the tick they are reached.

use crate::board::Board;
use crate::types::{Coord, FallFrom, MoveDirection, FALLING_TICKS, INPUT_SWAP_TICKS, REMOVING_TICKS};

/// Two neighbouring cells to exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapRequest {
    /// Cell the gesture started on
    pub touched: Coord,
    /// Neighbour in the gesture direction
    pub target: Coord,
    pub direction: MoveDirection,
}

impl SwapRequest {
    /// Swap the touched cell with its neighbour in `direction`
    ///
    /// None when the neighbour would have a negative coordinate; the upper
    /// bound is checked against the live board by [`SwapRequest::fits`].
    pub fn from_touch(touched: Coord, direction: MoveDirection) -> Option<Self> {
        let target = touched.step(direction)?;
        Some(Self {
            touched,
            target,
            direction,
        })
    }

    /// The swap that undoes this one
    pub fn reversed(&self) -> Self {
        Self {
            touched: self.target,
            target: self.touched,
            direction: self.direction.opposite(),
        }
    }

    /// Whether both cells lie on a `grid_size` board
    pub fn fits(&self, grid_size: usize) -> bool {
        self.touched.in_bounds(grid_size) && self.target.in_bounds(grid_size)
    }
}

/// A swap being animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputDetected {
    pub swap: SwapRequest,
    pub start_tick: u64,
    /// Undo the swap when it produces no match (false for the undo itself)
    pub switch_back_if_no_points: bool,
}

/// Tiles sliding one cell toward the gravity edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TilesFalling {
    pub start_tick: u64,
    /// Per aligned lane, the depth of the lowest tile that sits above a gap.
    /// `None` when nothing visible is above the gap, or when the lane has no gap.
    pub lowest_fallable: Vec<Option<usize>>,
    /// Gravity at the moment the fall started
    pub fall_from: FallFrom,
}

/// Matched tiles shrinking away
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemovingTiles {
    pub start_tick: u64,
    /// Board committed when the animation ends
    pub board_after_remove: Board,
}

/// Current phase of the state machine
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    WaitForInput,
    InputDetected(InputDetected),
    CheckForFallableTiles,
    TilesFalling(TilesFalling),
    CheckForPoints { previous_input: Option<InputDetected> },
    RemovingTiles(RemovingTiles),
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::WaitForInput => StepKind::WaitForInput,
            Step::InputDetected(_) => StepKind::InputDetected,
            Step::CheckForFallableTiles => StepKind::CheckForFallableTiles,
            Step::TilesFalling(_) => StepKind::TilesFalling,
            Step::CheckForPoints { .. } => StepKind::CheckForPoints,
            Step::RemovingTiles(_) => StepKind::RemovingTiles,
        }
    }

    /// Animation window length, for animated steps
    pub fn tick_duration(&self) -> Option<u64> {
        self.kind().tick_duration()
    }

    /// Tick the animation started on, for animated steps
    pub fn start_tick(&self) -> Option<u64> {
        match self {
            Step::InputDetected(input) => Some(input.start_tick),
            Step::TilesFalling(falling) => Some(falling.start_tick),
            Step::RemovingTiles(removing) => Some(removing.start_tick),
            _ => None,
        }
    }

    /// Whether the handler should run at `tick`
    ///
    /// Instant steps always run. Animated steps run when a whole number of
    /// windows has passed since they started, but never on the start tick.
    pub fn animation_completed(&self, tick: u64) -> bool {
        match (self.start_tick(), self.tick_duration()) {
            (Some(start), Some(duration)) => animation_completed(tick, start, duration),
            _ => true,
        }
    }

    /// Fraction of the current animation window already played, in `[0, 1)`
    pub fn progress(&self, tick: u64) -> f32 {
        match (self.start_tick(), self.tick_duration()) {
            (Some(start), Some(duration)) => {
                (tick.saturating_sub(start) % duration) as f32 / duration as f32
            }
            _ => 0.0,
        }
    }
}

#[inline]
fn animation_completed(tick: u64, start_tick: u64, duration: u64) -> bool {
    tick != start_tick && tick.saturating_sub(start_tick) % duration == 0
}

/// Payload-free mirror of [`Step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    WaitForInput,
    InputDetected,
    CheckForFallableTiles,
    TilesFalling,
    CheckForPoints,
    RemovingTiles,
}

impl StepKind {
    pub fn tick_duration(&self) -> Option<u64> {
        match self {
            StepKind::InputDetected => Some(INPUT_SWAP_TICKS),
            StepKind::TilesFalling => Some(FALLING_TICKS),
            StepKind::RemovingTiles => Some(REMOVING_TICKS),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::WaitForInput => "wait_for_input",
            StepKind::InputDetected => "input_detected",
            StepKind::CheckForFallableTiles => "check_for_fallable_tiles",
            StepKind::TilesFalling => "tiles_falling",
            StepKind::CheckForPoints => "check_for_points",
            StepKind::RemovingTiles => "removing_tiles",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_step(start_tick: u64) -> Step {
        let swap = SwapRequest::from_touch(Coord::new(0, 0), MoveDirection::Right).unwrap();
        Step::InputDetected(InputDetected {
            swap,
            start_tick,
            switch_back_if_no_points: true,
        })
    }

    #[test]
    fn test_gating_waits_one_full_window() {
        let step = swap_step(10);
        assert!(!step.animation_completed(10));
        for tick in 11..18 {
            assert!(!step.animation_completed(tick), "tick {tick}");
        }
        assert!(step.animation_completed(18));
    }

    #[test]
    fn test_instant_steps_always_complete() {
        assert!(Step::WaitForInput.animation_completed(0));
        assert!(Step::CheckForFallableTiles.animation_completed(7));
        assert!(Step::CheckForPoints { previous_input: None }.animation_completed(3));
    }

    #[test]
    fn test_durations() {
        assert_eq!(StepKind::InputDetected.tick_duration(), Some(8));
        assert_eq!(StepKind::TilesFalling.tick_duration(), Some(8));
        assert_eq!(StepKind::RemovingTiles.tick_duration(), Some(24));
        assert_eq!(StepKind::WaitForInput.tick_duration(), None);
        assert_eq!(Step::CheckForFallableTiles.tick_duration(), None);
    }

    #[test]
    fn test_progress_wraps_per_window() {
        let step = swap_step(4);
        assert_eq!(step.progress(4), 0.0);
        assert_eq!(step.progress(6), 0.25);
        assert_eq!(step.progress(12), 0.0);
        assert_eq!(Step::WaitForInput.progress(9), 0.0);
    }

    #[test]
    fn test_swap_request_from_touch() {
        let swap = SwapRequest::from_touch(Coord::new(2, 1), MoveDirection::Up).unwrap();
        assert_eq!(swap.target, Coord::new(2, 0));
        assert!(swap.fits(3));
        assert!(!swap.fits(2));

        assert!(SwapRequest::from_touch(Coord::new(0, 0), MoveDirection::Left).is_none());
    }

    #[test]
    fn test_swap_request_reversed() {
        let swap = SwapRequest::from_touch(Coord::new(0, 0), MoveDirection::Right).unwrap();
        let back = swap.reversed();

        assert_eq!(back.touched, Coord::new(1, 0));
        assert_eq!(back.target, Coord::new(0, 0));
        assert_eq!(back.direction, MoveDirection::Left);
        assert_eq!(back.reversed(), swap);
    }
}
