//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the engine, the driver and any
//! rendering or input collaborator. All types are plain data with no external
//! dependencies.
//!
//! # Coordinates
//!
//! Cells are addressed as `(x, y)`:
//!
//! - **x**: column, `0..grid_size`, left to right
//! - **y**: row, `0..grid_size`, top to bottom
//!
//! # Animation Timing
//!
//! Timing values are in ticks (one tick = one state machine advance):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INPUT_SWAP_TICKS` | 8 | Two tiles sliding into each other's cell |
//! | `FALLING_TICKS` | 8 | Tiles moving one cell along the gravity direction |
//! | `REMOVING_TICKS` | 24 | Matched tiles shrinking away |
//!
//! # Configuration Defaults
//!
//! | Constant | Value |
//! |----------|-------|
//! | `DEFAULT_GRID_SIZE` | 8 |
//! | `DEFAULT_NUM_TILE_TYPES` | 3 |
//! | `DEFAULT_NUM_TO_MATCH` | 3 |
//! | `DEFAULT_TICK_INTERVAL_MS` | 16 |
//! | `DEFAULT_SLEEP_EVERY_N_TICKS` | 1 |
//!
//! # Examples
//!
//! ```
//! use tilefall_types::{Coord, FallFrom, MoveDirection, TileType, MAX_TILE_TYPES};
//!
//! let kind = TileType::from_index(2).unwrap();
//! assert_eq!(kind, TileType::Three);
//!
//! assert_eq!(MoveDirection::Up.opposite(), MoveDirection::Down);
//! assert_eq!(FallFrom::from_str("left"), Some(FallFrom::Left));
//!
//! let touched = Coord::new(1, 1);
//! assert_eq!(touched.step(MoveDirection::Left), Some(Coord::new(0, 1)));
//!
//! assert_eq!(MAX_TILE_TYPES, 6);
//! ```

/// Ticks spent animating a swap (and its snap-back)
pub const INPUT_SWAP_TICKS: u64 = 8;

/// Ticks spent animating a one-cell fall
pub const FALLING_TICKS: u64 = 8;

/// Ticks spent animating matched tiles being removed
pub const REMOVING_TICKS: u64 = 24;

/// Number of defined tile categories
pub const MAX_TILE_TYPES: u8 = 6;

/// Default board side length
pub const DEFAULT_GRID_SIZE: usize = 8;

/// Default number of tile categories in play
pub const DEFAULT_NUM_TILE_TYPES: u8 = 3;

/// Default minimum run length that counts as a match
pub const DEFAULT_NUM_TO_MATCH: usize = 3;

/// Default pause between driver ticks (16ms ≈ 60 ticks per second)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Default number of ticks between pauses
pub const DEFAULT_SLEEP_EVERY_N_TICKS: u64 = 1;

/// Smallest run length that can count as a match
pub const MIN_NUM_TO_MATCH: usize = 2;


/// The six tile categories
///
/// Only the first `num_tile_types` kinds are generated for a given configuration.
/// Matching compares kinds only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileType {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl TileType {
    /// All kinds in index order
    pub const ALL: [TileType; MAX_TILE_TYPES as usize] = [
        TileType::One,
        TileType::Two,
        TileType::Three,
        TileType::Four,
        TileType::Five,
        TileType::Six,
    ];

    /// Look up a kind by its zero-based index
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::TileType;
    ///
    /// assert_eq!(TileType::from_index(0), Some(TileType::One));
    /// assert_eq!(TileType::from_index(5), Some(TileType::Six));
    /// assert_eq!(TileType::from_index(6), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Zero-based index of this kind
    pub fn index(&self) -> u8 {
        match self {
            TileType::One => 0,
            TileType::Two => 1,
            TileType::Three => 2,
            TileType::Four => 3,
            TileType::Five => 4,
            TileType::Six => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::One => "one",
            TileType::Two => "two",
            TileType::Three => "three",
            TileType::Four => "four",
            TileType::Five => "five",
            TileType::Six => "six",
        }
    }
}

/// Edge of the board that tiles fall from
///
/// - **Top**: tiles fall toward increasing `y` (the engine's native frame)
/// - **Bottom**: tiles rise toward `y = 0`
/// - **Left**: tiles move toward increasing `x`
/// - **Right**: tiles move toward `x = 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FallFrom {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl FallFrom {
    pub const ALL: [FallFrom; 4] = [FallFrom::Top, FallFrom::Bottom, FallFrom::Left, FallFrom::Right];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "top" | "t", "bottom" | "b",
    /// "left" | "l", "right" | "r"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" | "t" => Some(FallFrom::Top),
            "bottom" | "b" => Some(FallFrom::Bottom),
            "left" | "l" => Some(FallFrom::Left),
            "right" | "r" => Some(FallFrom::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FallFrom::Top => "top",
            FallFrom::Bottom => "bottom",
            FallFrom::Left => "left",
            FallFrom::Right => "right",
        }
    }

    /// Unit step, in screen coordinates, of a tile falling under this gravity
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::FallFrom;
    ///
    /// assert_eq!(FallFrom::Top.fall_vector(), (0, 1));
    /// assert_eq!(FallFrom::Right.fall_vector(), (-1, 0));
    /// ```
    pub fn fall_vector(&self) -> (i8, i8) {
        match self {
            FallFrom::Top => (0, 1),
            FallFrom::Bottom => (0, -1),
            FallFrom::Left => (1, 0),
            FallFrom::Right => (-1, 0),
        }
    }
}

/// Direction of a swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// The direction pointing the other way
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::MoveDirection;
    ///
    /// assert_eq!(MoveDirection::Up.opposite(), MoveDirection::Down);
    /// assert_eq!(MoveDirection::Left.opposite(), MoveDirection::Right);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            MoveDirection::Up => MoveDirection::Down,
            MoveDirection::Down => MoveDirection::Up,
            MoveDirection::Left => MoveDirection::Right,
            MoveDirection::Right => MoveDirection::Left,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(MoveDirection::Up),
            "down" | "d" => Some(MoveDirection::Down),
            "left" | "l" => Some(MoveDirection::Left),
            "right" | "r" => Some(MoveDirection::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
        }
    }

    /// Unit step in screen coordinates
    pub fn vector(&self) -> (i8, i8) {
        match self {
            MoveDirection::Up => (0, -1),
            MoveDirection::Down => (0, 1),
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
        }
    }
}

/// A cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction`, or None when it would leave the
    /// non-negative quadrant
    pub fn step(&self, direction: MoveDirection) -> Option<Self> {
        let (dx, dy) = direction.vector();
        let x = self.x.checked_add_signed(dx as isize)?;
        let y = self.y.checked_add_signed(dy as isize)?;
        Some(Self { x, y })
    }

    /// Whether the cell lies on a `grid_size x grid_size` board
    pub fn in_bounds(&self, grid_size: usize) -> bool {
        self.x < grid_size && self.y < grid_size
    }
}
