//! Dice pools, roll engine and modifier math for Rollfinder.
//!
//! Provides the polyhedral dice pool with its canonical formula text, an
//! injectable random source, and the character-sheet modifier calculator
//! used for saves, skills, perception and attacks.

pub mod attack;
pub mod character;
pub mod dice;
pub mod error;
pub mod modifier;

pub use attack::{AttackOptions, Strike};
pub use character::{
    ATTACK_ABILITIES, Ability, AbilityScores, AttackSlot, CharacterSheet, CheckKind, CheckProfile,
    Level, MasteryRank, Save, Skill,
};
pub use dice::{
    Critical, DetailedRoll, DicePool, DieFace, RandomSource, RollResult, SequenceSource,
    formula, parse_formula, roll, roll_d20,
};
pub use error::{MechError, MechResult};
pub use modifier::{compute_modifier, format_signed};
