//! Render snapshot
//!
//! A flat, renderer-friendly view of a [`GameState`]: one [`TileSprite`] per
//! tile to draw, with animation offsets already worked out from the current
//! step and tick. Offsets are in tile units, so a renderer only multiplies by
//! its tile size.

use crate::game_state::GameState;
use crate::step::{Step, StepKind};
use crate::transform::{from_aligned, to_aligned};
use crate::types::{Coord, FallFrom, TileType};

/// A tile to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSprite {
    pub kind: TileType,
    /// Cell column; `-1` or `grid_size` for a reservoir tile entering the board
    pub x: isize,
    /// Cell row; `-1` or `grid_size` for a reservoir tile entering the board
    pub y: isize,
    pub offset_x: f32,
    pub offset_y: f32,
    /// 1.0 is full size
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub grid_size: usize,
    pub tick: u64,
    pub step: StepKind,
    pub fall_from: FallFrom,
    pub sprites: Vec<TileSprite>,
}

impl RenderSnapshot {
    pub fn sprite_at(&self, x: isize, y: isize) -> Option<&TileSprite> {
        self.sprites.iter().find(|sprite| sprite.x == x && sprite.y == y)
    }
}

impl From<&GameState> for RenderSnapshot {
    fn from(state: &GameState) -> Self {
        let n = state.board().size();
        let step = state.step();
        let progress = step.progress(state.tick());

        let mut sprites = Vec::with_capacity(n * n + n);

        if let Step::TilesFalling(falling) = step {
            let (dx, dy) = falling.fall_from.fall_vector();
            for lane in 0..n {
                if !lane_has_gap(state, lane, falling.fall_from) {
                    continue;
                }
                let Some(tile) = state.reservoir().peek(lane) else {
                    continue;
                };
                let (x, y) = from_aligned((lane as isize, -1), falling.fall_from, n);
                sprites.push(TileSprite {
                    kind: tile.kind(),
                    x,
                    y,
                    offset_x: dx as f32 * progress,
                    offset_y: dy as f32 * progress,
                    scale: 1.0,
                });
            }
        }

        for (coord, cell) in state.board().iter() {
            let Some(tile) = cell else {
                continue;
            };
            let (offset_x, offset_y) = tile_offset(step, coord, n, progress);
            sprites.push(TileSprite {
                kind: tile.kind(),
                x: coord.x as isize,
                y: coord.y as isize,
                offset_x,
                offset_y,
                scale: tile_scale(step, coord, progress),
            });
        }

        Self {
            grid_size: n,
            tick: state.tick(),
            step: step.kind(),
            fall_from: state.fall_from(),
            sprites,
        }
    }
}

fn lane_has_gap(state: &GameState, lane: usize, fall_from: FallFrom) -> bool {
    let n = state.board().size();
    (0..n).any(|depth| {
        let (x, y) = from_aligned((lane as isize, depth as isize), fall_from, n);
        matches!(state.board().get(x as usize, y as usize), Some(None))
    })
}

fn tile_offset(step: &Step, coord: Coord, n: usize, progress: f32) -> (f32, f32) {
    match step {
        Step::InputDetected(input) => {
            let (dx, dy) = input.swap.direction.vector();
            let sign = if coord == input.swap.touched {
                1.0
            } else if coord == input.swap.target {
                -1.0
            } else {
                0.0
            };
            (dx as f32 * sign * progress, dy as f32 * sign * progress)
        }
        Step::TilesFalling(falling) => {
            let (lane, depth) = to_aligned((coord.x as isize, coord.y as isize), falling.fall_from, n);
            let lowest = falling.lowest_fallable.get(lane as usize).copied().flatten();
            match lowest {
                Some(lowest) if depth <= lowest as isize => {
                    let (dx, dy) = falling.fall_from.fall_vector();
                    (dx as f32 * progress, dy as f32 * progress)
                }
                _ => (0.0, 0.0),
            }
        }
        _ => (0.0, 0.0),
    }
}

fn tile_scale(step: &Step, coord: Coord, progress: f32) -> f32 {
    match step {
        Step::RemovingTiles(removing) => match removing.board_after_remove.at(coord) {
            Some(Some(_)) => 1.0,
            _ => 1.0 - progress / 2.0,
        },
        _ => 1.0,
    }
}

impl GameState {
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::from(self)
    }
}
