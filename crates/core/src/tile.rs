//! Tile module - the tile entity and its factory
//!
//! Tiles carry an id so that two tiles of the same kind stay distinguishable
//! while they are swapped. Matching only ever looks at [`Tile::kind`].

use crate::rng::SimpleRng;
use crate::types::TileType;

/// Unique (per factory) tile identity
pub type TileId = u32;

/// A single tile on the board or in the reservoir
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    kind: TileType,
}

impl Tile {
    pub fn new(id: TileId, kind: TileType) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn kind(&self) -> TileType {
        self.kind
    }

    /// Match equality: same kind, identity ignored
    pub fn same_kind(&self, other: &Tile) -> bool {
        self.kind == other.kind
    }
}

/// Seeded source of fresh tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFactory {
    rng: SimpleRng,
    next_id: TileId,
}

impl TileFactory {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            next_id: 0,
        }
    }

    /// Create a tile of a random kind among the first `num_tile_types`
    pub fn spawn(&mut self, num_tile_types: u8) -> Tile {
        let kind = self.rng.next_tile_type(num_tile_types);
        self.spawn_kind(kind)
    }

    /// Create a tile of a given kind with a fresh id
    pub fn spawn_kind(&mut self, kind: TileType) -> Tile {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        Tile::new(id, kind)
    }

    /// Generator state, usable as the seed of a follow-up engine
    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }
}

impl Default for TileFactory {
    fn default() -> Self {
        Self::new(1)
    }
}
