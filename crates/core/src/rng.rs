//! RNG module - deterministic piece generation
//!
//! Two strategies share one seeded LCG:
//! - **Uniform**: every piece is drawn independently from the seven kinds.
//! - **Bag7**: each bag holds one of every kind, shuffled; draws empty the bag
//!   before a new one is shuffled.
//!
//! The same seed and strategy always produce the same sequence, which keeps
//! games reproducible in tests and in the headless driver.

use tetrion_types::{PieceKind, RandomizerKind};

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Seeded piece generator
#[derive(Debug, Clone)]
pub struct Randomizer {
    kind: RandomizerKind,
    rng: SimpleRng,
    bag: [PieceKind; 7],
    /// Index into current bag; 7 means exhausted
    bag_index: usize,
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        Self {
            kind,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.kind {
            RandomizerKind::Uniform => {
                PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            RandomizerKind::Bag7 => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(RandomizerKind::default(), 1)
    }
}
