//! RNG module - piece kind selection
//!
//! Spawns draw each kind independently and uniformly from the seven kinds. There is no 7-bag,
//! so droughts and repeats are possible.
//!
//! Also provides a scripted sequence for deterministic tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Source of the kind for each newly spawned piece
pub trait Randomizer {
    fn next_kind(&mut self) -> PieceKind;
}

impl<R: Randomizer + ?Sized> Randomizer for Box<R> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform independent draw per spawn
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: StdRng,
}

impl UniformRandomizer {
    /// Reproducible sequence for a given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for UniformRandomizer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Randomizer for UniformRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Replays a fixed list of kinds, cycling when it runs out
#[derive(Debug, Clone)]
pub struct SequenceRandomizer {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceRandomizer {
    /// An empty list behaves like `[PieceKind::O]`
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::O);
        }
        Self { kinds, index: 0 }
    }

    /// Kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl Randomizer for SequenceRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_deterministic() {
        let mut a = UniformRandomizer::new(12345);
        let mut b = UniformRandomizer::new(12345);

        for _ in 0..100 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_uniform_covers_all_kinds() {
        let mut rng = UniformRandomizer::new(7);
        let mut seen = [false; 7];
        for _ in 0..1000 {
            let kind = rng.next_kind();
            seen[(kind.code() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }

    #[test]
    fn test_sequence_cycles() {
        let mut seq = SequenceRandomizer::new(vec![PieceKind::I, PieceKind::T]);
        assert_eq!(seq.next_kind(), PieceKind::I);
        assert_eq!(seq.next_kind(), PieceKind::T);
        assert_eq!(seq.next_kind(), PieceKind::I);
        assert_eq!(seq.drawn(), 3);
    }

    #[test]
    fn test_sequence_empty_defaults_to_o() {
        let mut seq = SequenceRandomizer::new(Vec::new());
        assert_eq!(seq.next_kind(), PieceKind::O);
    }

    #[test]
    fn test_boxed_randomizer() {
        let mut boxed: Box<dyn Randomizer> = Box::new(SequenceRandomizer::new(vec![PieceKind::Z]));
        assert_eq!(boxed.next_kind(), PieceKind::Z);
    }
}
