//! RNG module - piece selection
//!
//! Pieces are drawn uniformly and independently (no bag, no history), from a
//! seeded LCG so a game can be replayed from its seed.

use crate::pieces::Tetromino;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)`.
    ///
    /// Scales the full 32-bit output instead of taking a remainder, since the
    /// low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Source of upcoming pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PieceGenerator {
    /// Uniform independent draws over the seven kinds
    Uniform { seed: u32, rng: SimpleRng },
    /// A fixed sequence, repeated forever
    Cycle { kinds: Vec<PieceKind>, index: usize },
}

impl PieceGenerator {
    pub fn uniform(seed: u32) -> Self {
        PieceGenerator::Uniform {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    /// Repeat `kinds` in order. An empty list falls back to the O piece.
    pub fn cycle(kinds: &[PieceKind]) -> Self {
        let kinds = if kinds.is_empty() {
            vec![PieceKind::O]
        } else {
            kinds.to_vec()
        };
        PieceGenerator::Cycle { kinds, index: 0 }
    }

    /// Seed of a uniform generator
    pub fn seed(&self) -> Option<u32> {
        match self {
            PieceGenerator::Uniform { seed, .. } => Some(*seed),
            PieceGenerator::Cycle { .. } => None,
        }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        match self {
            PieceGenerator::Uniform { rng, .. } => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            PieceGenerator::Cycle { kinds, index } => {
                let kind = kinds[*index % kinds.len()];
                *index = (*index + 1) % kinds.len();
                kind
            }
        }
    }

    /// A fresh catalog piece
    pub fn next_piece(&mut self) -> Tetromino {
        Tetromino::new(self.next_kind())
    }
}
