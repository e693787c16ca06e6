//! Board module - the visible tile grid and the reservoir strip
//!
//! The board is a square grid where each cell can be empty or hold a [`Tile`].
//! Empty cells only exist transiently: they are produced by removal or by
//! growing the board and get filled by the falling cycle.
//!
//! The reservoir is an off-board strip with one tile per lane of the
//! gravity-aligned frame. It is always fully populated: whenever a lane draws
//! its tile, the slot is refilled with a fresh one.

use crate::grid::Grid;
use crate::tile::{Tile, TileFactory, TileId};
use crate::types::{Coord, TileType};

/// A board cell: `None` is an empty slot
pub type Cell = Option<Tile>;

/// The visible board
pub type Board = Grid<Cell>;

/// Fill a `grid_size x grid_size` board with random tiles
pub fn generate_initial_board(
    grid_size: usize,
    num_tile_types: u8,
    factory: &mut TileFactory,
) -> Board {
    Grid::from_fn(grid_size, |_, _| Some(factory.spawn(num_tile_types)))
}

impl Grid<Cell> {
    /// Board of `size x size` empty slots
    pub fn empty(size: usize) -> Self {
        Grid::filled(size, None)
    }

    /// Build a board from kind rows (outer index = y), assigning fresh ids
    ///
    /// Returns None unless the rows form a square.
    pub fn from_kind_rows(rows: &[Vec<Option<TileType>>], factory: &mut TileFactory) -> Option<Self> {
        let tiles = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|kind| kind.map(|k| factory.spawn_kind(k)))
                    .collect::<Vec<_>>()
            })
            .collect();
        Grid::from_rows(tiles)
    }

    /// Whether every slot holds a tile
    pub fn is_full(&self) -> bool {
        self.cells().iter().all(|cell| cell.is_some())
    }

    /// Number of empty slots
    pub fn empty_count(&self) -> usize {
        self.cells().iter().filter(|cell| cell.is_none()).count()
    }

    /// Locate a tile by identity
    pub fn position_of(&self, id: TileId) -> Option<Coord> {
        self.iter()
            .find(|(_, cell)| cell.map(|t| t.id()) == Some(id))
            .map(|(coord, _)| coord)
    }

    /// Kind-only view, for comparisons where identity does not matter
    pub fn kinds(&self) -> Grid<Option<TileType>> {
        self.map(|cell| cell.map(|tile| tile.kind()))
    }

    /// Resize the visible board; newly exposed slots start empty and are
    /// filled by the falling cycle
    pub fn shrink_or_grow(&self, grid_size: usize) -> Self {
        self.resized(grid_size, || None)
    }
}

/// Off-board supply of tiles, one per aligned lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservoir {
    tiles: Vec<Tile>,
}

impl Reservoir {
    /// A fully populated strip of `grid_size` random tiles
    pub fn generate(grid_size: usize, num_tile_types: u8, factory: &mut TileFactory) -> Self {
        Self {
            tiles: (0..grid_size).map(|_| factory.spawn(num_tile_types)).collect(),
        }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile waiting above `lane`
    pub fn peek(&self, lane: usize) -> Option<&Tile> {
        self.tiles.get(lane)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Take the tile waiting above `lane` and refill the slot
    pub fn draw(&mut self, lane: usize, num_tile_types: u8, factory: &mut TileFactory) -> Option<Tile> {
        let slot = self.tiles.get_mut(lane)?;
        Some(std::mem::replace(slot, factory.spawn(num_tile_types)))
    }

    /// Resize to `grid_size` lanes; new lanes are filled immediately so the
    /// strip never has gaps
    pub fn shrink_or_grow_filled(
        &mut self,
        grid_size: usize,
        num_tile_types: u8,
        factory: &mut TileFactory,
    ) {
        self.tiles.truncate(grid_size);
        while self.tiles.len() < grid_size {
            self.tiles.push(factory.spawn(num_tile_types));
        }
    }
}
