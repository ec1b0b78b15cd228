//! RNG module - seeded uniform choice of shapes and colors
//!
//! Pieces are drawn with independent uniform choices: one of 7 shapes and one
//! of 16 colors. There is no bag or history; a simple LCG is enough and keeps
//! games reproducible from a seed.

use crate::types::{BlockColor, Shape};

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG with a power-of-two modulus
    /// cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.next_range(Shape::ALL.len() as u32) as usize]
    }

    pub fn next_color(&mut self) -> BlockColor {
        BlockColor::ALL[self.next_range(BlockColor::ALL.len() as u32) as usize]
    }

    /// Current RNG state (feeding it back into `new` continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
