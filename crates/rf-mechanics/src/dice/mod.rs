//! Dice faces, pools, and rolling.
//!
//! Only the seven standard polyhedral dice exist. Every place that walks a
//! pool does so in ascending face order, which keeps formula text stable
//! from one roll to the next.

pub mod engine;
pub mod notation;
pub mod pool;
pub mod random;
pub mod roll;

pub use engine::{formula, roll, roll_d20};
pub use notation::parse_formula;
pub use pool::DicePool;
pub use random::{RandomSource, SequenceSource};
pub use roll::{Critical, DetailedRoll, RollResult};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
///
/// Variants are declared in ascending face count, so the derived `Ord`
/// matches numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum DieFace {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
}

impl DieFace {
    /// Every face, in ascending order.
    pub const ALL: [DieFace; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// Look up the face with exactly `sides` sides.
    pub fn from_sides(sides: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|face| face.sides() == sides)
    }

    /// Parse a face from a string like "d20", "D6" or "100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let digits = s.strip_prefix('d').unwrap_or(&s);
        Self::from_sides(digits.parse().ok()?)
    }
}

impl From<DieFace> for u32 {
    fn from(face: DieFace) -> Self {
        face.sides()
    }
}

impl TryFrom<u32> for DieFace {
    type Error = String;

    fn try_from(sides: u32) -> Result<Self, Self::Error> {
        Self::from_sides(sides).ok_or_else(|| format!("unsupported die: d{sides}"))
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
