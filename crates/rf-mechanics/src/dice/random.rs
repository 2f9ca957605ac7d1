//! Random sources for rolling dice.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use super::DieFace;

/// Produces uniformly distributed die values.
///
/// Implementations must return a value in `1..=face.sides()` for every call.
pub trait RandomSource {
    /// Roll a single die.
    fn roll(&mut self, face: DieFace) -> u32;
}

impl RandomSource for StdRng {
    fn roll(&mut self, face: DieFace) -> u32 {
        self.random_range(1..=face.sides())
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll(&mut self, face: DieFace) -> u32 {
        (**self).roll(face)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn roll(&mut self, face: DieFace) -> u32 {
        (**self).roll(face)
    }
}

/// A scripted source that replays a fixed sequence of values.
///
/// Values are clamped into the rolled die's range, and the sequence wraps
/// around once exhausted. An empty script always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: VecDeque<u32>,
}

impl SequenceSource {
    /// Create a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceSource {
    fn roll(&mut self, face: DieFace) -> u32 {
        let Some(value) = self.values.pop_front() else {
            return 1;
        };
        self.values.push_back(value);
        value.clamp(1, face.sides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn std_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for face in DieFace::ALL {
            for _ in 0..200 {
                let v = rng.roll(face);
                assert!((1..=face.sides()).contains(&v));
            }
        }
    }

    #[test]
    fn std_rng_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(a.roll(DieFace::D20), b.roll(DieFace::D20));
        }
    }

    #[test]
    fn sequence_replays_and_wraps() {
        let mut src = SequenceSource::new([3, 5]);
        assert_eq!(src.roll(DieFace::D6), 3);
        assert_eq!(src.roll(DieFace::D6), 5);
        assert_eq!(src.roll(DieFace::D6), 3);
    }

    #[test]
    fn sequence_clamps_to_face() {
        let mut src = SequenceSource::new([20, 0]);
        assert_eq!(src.roll(DieFace::D4), 4);
        assert_eq!(src.roll(DieFace::D4), 1);
    }

    #[test]
    fn empty_sequence_rolls_one() {
        let mut src = SequenceSource::default();
        assert_eq!(src.roll(DieFace::D100), 1);
    }
}
