//! RNG module - deterministic tile generation
//!
//! A small LCG keeps every board reproducible from its seed, which is what the
//! state machine tests and replays rely on. The generator state travels inside
//! each snapshot, so advancing a cloned snapshot twice yields identical tiles.

use crate::types::{TileType, MAX_TILE_TYPES};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Pick one of the first `num_tile_types` kinds
    pub fn next_tile_type(&mut self, num_tile_types: u8) -> TileType {
        let active = num_tile_types.clamp(1, MAX_TILE_TYPES);
        let index = self.next_range(active as u32) as u8;
        TileType::ALL[index as usize]
    }

    /// Current generator state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_tile_types_stay_within_active_set() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..500 {
            assert!(rng.next_tile_type(3).index() < 3);
        }
    }

    #[test]
    fn test_single_tile_type_is_constant() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..50 {
            assert_eq!(rng.next_tile_type(1), TileType::One);
        }
    }

    #[test]
    fn test_every_active_type_eventually_appears() {
        let mut rng = SimpleRng::new(2024);
        let mut seen = [false; MAX_TILE_TYPES as usize];
        for _ in 0..1000 {
            seen[rng.next_tile_type(MAX_TILE_TYPES).index() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "seen: {:?}", seen);
    }
}
