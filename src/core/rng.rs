//! RNG module - random piece spawning
//!
//! A small LCG keeps the core dependency-free and deterministic under a
//! fixed seed, which the tests rely on. Gameplay seeds from the clock.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::pieces::{GamePiece, CATALOG_SIZE};

/// Number of pre-applied spawn rotations drawn per piece (0, 1 or 2)
const SPAWN_ROTATION_RANGE: u32 = 3;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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
        // LCG formula: (a * state + c) mod m, a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Draws pieces from the catalog with a random pre-applied rotation.
///
/// Both draws are bounded, so the catalog lookup never fails.
#[derive(Debug, Clone)]
pub struct PieceSpawner {
    rng: SimpleRng,
}

impl PieceSpawner {
    /// Create a spawner with the given seed (deterministic sequence)
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Create a spawner seeded from the system clock
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.subsec_nanos())
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> GamePiece {
        let index = self.rng.next_range(CATALOG_SIZE as u32) as usize;
        let rotations = self.rng.next_range(SPAWN_ROTATION_RANGE) as i32;
        GamePiece::from_catalog(index).rotated(rotations)
    }

    /// Current RNG state, for replaying a session
    pub fn state(&self) -> u32 {
        self.rng.state
    }
}

impl Default for PieceSpawner {
    fn default() -> Self {
        Self::from_entropy()
    }
}
