//! Game state module - the board state machine
//!
//! [`GameState`] is one snapshot of the engine: board, reservoir, current
//! [`Step`], tick counter, active configuration and gravity. [`GameState::advance`]
//! moves it forward by exactly one tick. The state is fully deterministic for
//! a given seed; the tile factory travels with the snapshot.
//!
//! # Transitions
//!
//! ```text
//! WaitForInput ──swap──▶ InputDetected ──▶ CheckForPoints
//! WaitForInput ──board not full──▶ CheckForFallableTiles
//! CheckForFallableTiles ──gap──▶ TilesFalling ──▶ CheckForFallableTiles
//! CheckForFallableTiles ──full──▶ CheckForPoints
//! CheckForPoints ──match──▶ RemovingTiles ──▶ CheckForFallableTiles
//! CheckForPoints ──no match, after a swap──▶ InputDetected (undo) ──▶ WaitForInput
//! CheckForPoints ──no match──▶ WaitForInput
//! ```
//!
//! Animated steps (`InputDetected`, `TilesFalling`, `RemovingTiles`) only hand
//! over once their window has elapsed; until then an advance only bumps the tick.

use crate::board::{generate_initial_board, Board, Reservoir};
use crate::config::Config;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::matcher::remove_matches;
use crate::step::{InputDetected, RemovingTiles, Step, StepKind, SwapRequest, TilesFalling};
use crate::tile::TileFactory;
use crate::transform::align;
use crate::types::{FallFrom, TileType};

/// Complete engine snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    reservoir: Reservoir,
    step: Step,
    tick: u64,
    config: Config,
    fall_from: FallFrom,
    /// Swap accepted while idle, consumed by the next WaitForInput handler
    pending_swap: Option<SwapRequest>,
    factory: TileFactory,
}

impl GameState {
    /// Random full board, starting at `CheckForFallableTiles`
    pub fn new(config: Config, seed: u32) -> Self {
        let config = config.sanitized();
        let mut factory = TileFactory::new(seed);
        let board = generate_initial_board(config.grid_size, config.num_tile_types, &mut factory);
        let reservoir = Reservoir::generate(config.grid_size, config.num_tile_types, &mut factory);

        Self {
            board,
            reservoir,
            step: Step::CheckForFallableTiles,
            tick: 0,
            config,
            fall_from: FallFrom::Top,
            pending_swap: None,
            factory,
        }
    }

    /// Start from a given layout of tile kinds (`None` = empty slot)
    ///
    /// Tiles get fresh ids; the reservoir is generated from `seed`.
    pub fn from_kinds(
        config: Config,
        kinds: &Grid<Option<TileType>>,
        seed: u32,
    ) -> Result<Self, EngineError> {
        let config = config.sanitized();
        if kinds.size() != config.grid_size {
            return Err(EngineError::BoardSizeMismatch {
                expected: config.grid_size,
                actual: kinds.size(),
            });
        }

        let mut factory = TileFactory::new(seed);
        let board = kinds.map(|kind| kind.map(|k| factory.spawn_kind(k)));
        let reservoir = Reservoir::generate(config.grid_size, config.num_tile_types, &mut factory);

        Ok(Self {
            board,
            reservoir,
            step: Step::CheckForFallableTiles,
            tick: 0,
            config,
            fall_from: FallFrom::Top,
            pending_swap: None,
            factory,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn reservoir(&self) -> &Reservoir {
        &self.reservoir
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn step_kind(&self) -> StepKind {
        self.step.kind()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fall_from(&self) -> FallFrom {
        self.fall_from
    }

    pub fn pending_swap(&self) -> Option<SwapRequest> {
        self.pending_swap
    }

    /// Current generator state
    pub fn seed(&self) -> u32 {
        self.factory.seed()
    }

    /// Queue a swap for the next idle tick
    ///
    /// Rejected unless the machine is waiting for input and both cells are on
    /// the board.
    pub fn submit_swap(&mut self, swap: SwapRequest) -> bool {
        if self.step != Step::WaitForInput || !swap.fits(self.config.grid_size) {
            return false;
        }
        self.pending_swap = Some(swap);
        true
    }

    /// Change gravity; refused while tiles are falling
    pub fn set_fall_from(&mut self, fall_from: FallFrom) -> bool {
        if self.step.kind() == StepKind::TilesFalling {
            return false;
        }
        self.fall_from = fall_from;
        true
    }

    /// Adopt a new configuration, resizing the board and reservoir
    ///
    /// Returns false (and changes nothing) while a swap is animating or a
    /// match check is pending; the caller retries on a later tick.
    pub fn apply_config(&mut self, config: Config) -> bool {
        if matches!(
            self.step,
            Step::InputDetected(_) | Step::CheckForPoints { .. }
        ) {
            return false;
        }

        let config = config.sanitized();
        let n = config.grid_size;
        self.config = config;
        self.board = self.board.shrink_or_grow(n);
        self.reservoir
            .shrink_or_grow_filled(n, config.num_tile_types, &mut self.factory);

        let stale_fall = matches!(&self.step, Step::TilesFalling(falling) if falling.lowest_fallable.len() != n);
        if stale_fall {
            self.step = Step::CheckForFallableTiles;
        }
        if let Step::RemovingTiles(removing) = &mut self.step {
            removing.board_after_remove = removing.board_after_remove.shrink_or_grow(n);
        }
        true
    }

    /// Check that every grid agrees with the configured size
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let n = self.config.grid_size;
        if self.board.size() != n {
            return Err(EngineError::BoardSizeMismatch {
                expected: n,
                actual: self.board.size(),
            });
        }
        if self.reservoir.len() != n {
            return Err(EngineError::ReservoirSizeMismatch {
                expected: n,
                actual: self.reservoir.len(),
            });
        }
        match &self.step {
            Step::TilesFalling(falling) if falling.lowest_fallable.len() != n => {
                Err(EngineError::LaneCountMismatch {
                    expected: n,
                    actual: falling.lowest_fallable.len(),
                })
            }
            Step::RemovingTiles(removing) if removing.board_after_remove.size() != n => {
                Err(EngineError::BoardSizeMismatch {
                    expected: n,
                    actual: removing.board_after_remove.size(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Advance one tick and report the resulting step
    pub fn advance(&mut self) -> Result<StepKind, EngineError> {
        self.check_invariants()?;

        if self.step.animation_completed(self.tick) {
            let step = std::mem::replace(&mut self.step, Step::WaitForInput);
            self.step = match step {
                Step::WaitForInput => self.handle_wait_for_input(),
                Step::InputDetected(input) => self.handle_input_detected(input)?,
                Step::CheckForFallableTiles => self.handle_check_for_fallable(),
                Step::TilesFalling(falling) => self.handle_tiles_falling(&falling)?,
                Step::CheckForPoints { previous_input } => {
                    self.handle_check_for_points(previous_input)?
                }
                Step::RemovingTiles(removing) => {
                    self.board = removing.board_after_remove;
                    Step::CheckForFallableTiles
                }
            };
        }

        self.tick += 1;
        Ok(self.step.kind())
    }

    /// The snapshot one tick ahead, leaving `self` untouched
    pub fn next_state(&self) -> Result<Self, EngineError> {
        let mut next = self.clone();
        next.advance()?;
        Ok(next)
    }

    fn handle_wait_for_input(&mut self) -> Step {
        if !self.board.is_full() {
            return Step::CheckForFallableTiles;
        }

        match self.pending_swap.take() {
            Some(swap) if swap.fits(self.config.grid_size) => Step::InputDetected(InputDetected {
                swap,
                start_tick: self.tick,
                switch_back_if_no_points: true,
            }),
            _ => Step::WaitForInput,
        }
    }

    fn handle_input_detected(&mut self, input: InputDetected) -> Result<Step, EngineError> {
        let SwapRequest { touched, target, .. } = input.swap;
        for coord in [touched, target] {
            if !matches!(self.board.at(coord), Some(Some(_))) {
                return Err(EngineError::UnexpectedEmptyCell {
                    x: coord.x,
                    y: coord.y,
                });
            }
        }
        self.board.swap(touched, target);

        Ok(if input.switch_back_if_no_points {
            Step::CheckForPoints {
                previous_input: Some(input),
            }
        } else {
            Step::WaitForInput
        })
    }

    fn handle_check_for_fallable(&mut self) -> Step {
        let aligned = align(&self.board, self.fall_from);
        if aligned.is_full() {
            return Step::CheckForPoints {
                previous_input: None,
            };
        }

        let lowest_fallable = (0..aligned.size())
            .map(|lane| lowest_fallable_in_lane(&aligned, lane))
            .collect();

        Step::TilesFalling(TilesFalling {
            start_tick: self.tick,
            lowest_fallable,
            fall_from: self.fall_from,
        })
    }

    fn handle_tiles_falling(&mut self, falling: &TilesFalling) -> Result<Step, EngineError> {
        let mut aligned = align(&self.board, falling.fall_from);

        for lane in 0..aligned.size() {
            if aligned.column(lane).all(|cell| cell.is_some()) {
                continue;
            }

            let gap = falling.lowest_fallable[lane].map_or(0, |depth| depth + 1);
            if !matches!(aligned.get(lane, gap), Some(None)) {
                return Err(EngineError::FallOntoOccupiedCell { lane, depth: gap });
            }

            for depth in (1..=gap).rev() {
                let above = aligned.get(lane, depth - 1).copied().flatten();
                aligned.set(lane, depth, above);
            }

            let entering = self
                .reservoir
                .draw(lane, self.config.num_tile_types, &mut self.factory)
                .ok_or(EngineError::ReservoirSizeMismatch {
                    expected: aligned.size(),
                    actual: self.reservoir.len(),
                })?;
            aligned.set(lane, 0, Some(entering));
        }

        self.board = align(&aligned, falling.fall_from);
        Ok(Step::CheckForFallableTiles)
    }

    fn handle_check_for_points(
        &mut self,
        previous_input: Option<InputDetected>,
    ) -> Result<Step, EngineError> {
        let outcome = remove_matches(&self.board, self.config.num_to_match)?;

        if !outcome.is_board_unchanged() {
            return Ok(Step::RemovingTiles(RemovingTiles {
                start_tick: self.tick,
                board_after_remove: outcome.board,
            }));
        }

        Ok(match previous_input {
            None => Step::WaitForInput,
            Some(input) => Step::InputDetected(InputDetected {
                swap: input.swap.reversed(),
                start_tick: self.tick,
                switch_back_if_no_points: false,
            }),
        })
    }
}

/// Depth of the lowest tile above the lowest gap of `lane`
fn lowest_fallable_in_lane(aligned: &Board, lane: usize) -> Option<usize> {
    let cells: Vec<_> = aligned.column(lane).collect();
    let lowest_gap = cells.iter().rposition(|cell| cell.is_none())?;
    cells[..lowest_gap].iter().rposition(|cell| cell.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, MoveDirection};

    fn kinds(rows: &[&[u8]]) -> Grid<Option<TileType>> {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&id| id.checked_sub(1).and_then(TileType::from_index))
                    .collect()
            })
            .collect();
        Grid::from_rows(rows).unwrap()
    }

    fn state(rows: &[&[u8]]) -> GameState {
        let config = Config::default().with_grid_size(rows.len());
        GameState::from_kinds(config, &kinds(rows), 7).unwrap()
    }

    fn advance_n(state: &mut GameState, n: usize) -> StepKind {
        let mut kind = state.step_kind();
        for _ in 0..n {
            kind = state.advance().unwrap();
        }
        kind
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(Config::default(), 12345);

        assert_eq!(state.tick(), 0);
        assert_eq!(state.step_kind(), StepKind::CheckForFallableTiles);
        assert_eq!(state.board().size(), 8);
        assert!(state.board().is_full());
        assert_eq!(state.reservoir().len(), 8);
        assert_eq!(state.fall_from(), FallFrom::Top);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_same_seed_same_progression() {
        let mut a = GameState::new(Config::default(), 99);
        let mut b = GameState::new(Config::default(), 99);
        for _ in 0..200 {
            assert_eq!(a.advance().unwrap(), b.advance().unwrap());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_kinds_rejects_wrong_size() {
        let config = Config::default().with_grid_size(3);
        let result = GameState::from_kinds(config, &kinds(&[&[1, 2], &[2, 1]]), 1);
        assert_eq!(
            result,
            Err(EngineError::BoardSizeMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_every_advance_increments_tick() {
        let mut state = state(&[&[1, 2], &[2, 1]]);
        advance_n(&mut state, 5);
        assert_eq!(state.tick(), 5);
    }

    #[test]
    fn test_next_state_leaves_original_untouched() {
        let state = state(&[&[1, 2], &[2, 1]]);
        let next = state.next_state().unwrap();

        assert_eq!(state.tick(), 0);
        assert_eq!(next.tick(), 1);
        assert_eq!(next.step_kind(), StepKind::CheckForPoints);
    }

    #[test]
    fn test_lowest_fallable_per_lane() {
        let state = state(&[&[1, 0, 0], &[0, 2, 2], &[3, 0, 1]]);
        let aligned = align(state.board(), FallFrom::Top);

        assert_eq!(lowest_fallable_in_lane(&aligned, 0), Some(0));
        assert_eq!(lowest_fallable_in_lane(&aligned, 1), Some(1));
        assert_eq!(lowest_fallable_in_lane(&aligned, 2), None);
    }

    #[test]
    fn test_fall_shifts_lane_and_draws_reservoir() {
        let mut state = state(&[&[1, 2], &[0, 1]]);
        let top = state.board().get(0, 0).copied().flatten().unwrap();
        let entering = *state.reservoir().peek(0).unwrap();

        assert_eq!(state.advance().unwrap(), StepKind::TilesFalling);
        assert_eq!(advance_n(&mut state, 8), StepKind::CheckForFallableTiles);

        assert_eq!(state.board().get(0, 1), Some(&Some(top)));
        assert_eq!(state.board().get(0, 0), Some(&Some(entering)));
        assert_ne!(state.reservoir().peek(0), Some(&entering));
        assert!(state.board().is_full());
    }

    #[test]
    fn test_gravity_locked_while_falling() {
        let mut state = state(&[&[1, 2], &[0, 1]]);
        assert!(state.set_fall_from(FallFrom::Left));
        assert!(state.set_fall_from(FallFrom::Top));

        state.advance().unwrap();
        assert_eq!(state.step_kind(), StepKind::TilesFalling);
        assert!(!state.set_fall_from(FallFrom::Left));
        assert_eq!(state.fall_from(), FallFrom::Top);
    }

    #[test]
    fn test_submit_swap_only_while_waiting() {
        let mut state = state(&[&[1, 2], &[2, 1]]);
        let swap = SwapRequest::from_touch(Coord::new(0, 0), MoveDirection::Right).unwrap();

        assert!(!state.submit_swap(swap));
        advance_n(&mut state, 2);
        assert_eq!(state.step_kind(), StepKind::WaitForInput);

        let off_board = SwapRequest::from_touch(Coord::new(1, 0), MoveDirection::Right).unwrap();
        assert!(!state.submit_swap(off_board));
        assert!(state.submit_swap(swap));
        assert_eq!(state.pending_swap(), Some(swap));

        assert_eq!(state.advance().unwrap(), StepKind::InputDetected);
        assert_eq!(state.pending_swap(), None);
    }

    #[test]
    fn test_successful_swap_leads_to_removal() {
        // Swapping (0,0) down puts three 1s in the top row
        let mut state = state(&[&[2, 1, 1], &[1, 2, 3], &[3, 3, 2]]);
        advance_n(&mut state, 2);
        assert_eq!(state.step_kind(), StepKind::WaitForInput);

        let swap = SwapRequest::from_touch(Coord::new(0, 0), MoveDirection::Down).unwrap();
        assert!(state.submit_swap(swap));
        assert_eq!(state.advance().unwrap(), StepKind::InputDetected);
        assert_eq!(advance_n(&mut state, 7), StepKind::InputDetected);
        assert_eq!(state.advance().unwrap(), StepKind::CheckForPoints);
        assert_eq!(state.advance().unwrap(), StepKind::RemovingTiles);

        match state.step() {
            Step::RemovingTiles(removing) => {
                for x in 0..3 {
                    assert_eq!(removing.board_after_remove.get(x, 0), Some(&None));
                }
                assert_eq!(removing.board_after_remove.empty_count(), 3);
            }
            other => panic!("unexpected step {other:?}"),
        }

        assert_eq!(advance_n(&mut state, 23), StepKind::RemovingTiles);
        assert_eq!(state.advance().unwrap(), StepKind::CheckForFallableTiles);
        assert_eq!(state.board().empty_count(), 3);
    }

    #[test]
    fn test_apply_config_deferred_during_match_check() {
        let mut state = state(&[&[1, 2], &[2, 1]]);
        state.advance().unwrap();
        assert_eq!(state.step_kind(), StepKind::CheckForPoints);

        assert!(!state.apply_config(Config::default().with_grid_size(4)));
        assert_eq!(state.board().size(), 2);

        state.advance().unwrap();
        assert!(state.apply_config(Config::default().with_grid_size(4)));
        assert_eq!(state.board().size(), 4);
        assert_eq!(state.reservoir().len(), 4);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_apply_config_resizes_removal_target() {
        let mut state = state(&[&[1, 1, 1], &[1, 2, 3], &[1, 3, 2]]);
        advance_n(&mut state, 2);
        assert_eq!(state.step_kind(), StepKind::RemovingTiles);

        assert!(state.apply_config(Config::default().with_grid_size(2)));
        assert!(state.check_invariants().is_ok());

        assert_eq!(advance_n(&mut state, 24), StepKind::CheckForFallableTiles);
        assert_eq!(state.board().size(), 2);
    }

    #[test]
    fn test_corrupted_state_is_reported() {
        let mut state = state(&[&[1, 2], &[2, 1]]);
        state.reservoir = Reservoir::from_tiles(Vec::new());

        assert_eq!(
            state.advance(),
            Err(EngineError::ReservoirSizeMismatch {
                expected: 2,
                actual: 0
            })
        );
    }
}
