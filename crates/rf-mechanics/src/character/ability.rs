//! Ability scores and character level.

use serde::{Deserialize, Serialize};

/// One of the six ability keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Strength (STR).
    Strength,
    /// Dexterity (DEX).
    Dexterity,
    /// Constitution (CON).
    Constitution,
    /// Intelligence (INT).
    Intelligence,
    /// Wisdom (WIS).
    Wisdom,
    /// Charisma (CHA).
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Three-letter abbreviation, e.g. `"DEX"`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Parse an abbreviation or full name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|a| {
            a.abbreviation().eq_ignore_ascii_case(&s) || a.to_string().eq_ignore_ascii_case(&s)
        })
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        };
        write!(f, "{name}")
    }
}

/// Scores for all six abilities, each kept within [-5, 5].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    scores: [i32; 6],
}

impl AbilityScores {
    /// Lowest allowed score.
    pub const MIN: i32 = -5;
    /// Highest allowed score.
    pub const MAX: i32 = 5;

    /// All scores at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The score for `ability`.
    pub fn get(&self, ability: Ability) -> i32 {
        self.scores[ability.index()]
    }

    /// Set a score, clamped to [-5, 5].
    pub fn set(&mut self, ability: Ability, value: i32) {
        self.scores[ability.index()] = value.clamp(Self::MIN, Self::MAX);
    }

    /// Step a score by `delta`, clamped to [-5, 5].
    pub fn adjust(&mut self, ability: Ability, delta: i32) {
        let next = self.get(ability).saturating_add(delta);
        self.set(ability, next);
    }

    /// Abilities paired with their scores, in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

/// Character level, kept within [1, 20].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Level(i32);

impl Level {
    /// Lowest level.
    pub const MIN: i32 = 1;
    /// Highest level.
    pub const MAX: i32 = 20;

    /// Create a level, clamped to [1, 20].
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The numeric level.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Step the level by `delta`, clamped to [1, 20].
    pub fn adjust(&mut self, delta: i32) {
        *self = Self::new(self.0.saturating_add(delta));
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_parse() {
        assert_eq!(Ability::parse("str"), Some(Ability::Strength));
        assert_eq!(Ability::parse("WIS"), Some(Ability::Wisdom));
        assert_eq!(Ability::parse("charisma"), Some(Ability::Charisma));
        assert_eq!(Ability::parse("luck"), None);
    }

    #[test]
    fn scores_default_to_zero() {
        let scores = AbilityScores::new();
        assert!(scores.iter().all(|(_, v)| v == 0));
    }

    #[test]
    fn scores_are_clamped() {
        let mut scores = AbilityScores::new();
        scores.set(Ability::Strength, 9);
        assert_eq!(scores.get(Ability::Strength), 5);
        scores.set(Ability::Dexterity, -9);
        assert_eq!(scores.get(Ability::Dexterity), -5);
        scores.adjust(Ability::Dexterity, -1);
        assert_eq!(scores.get(Ability::Dexterity), -5);
        scores.adjust(Ability::Wisdom, 2);
        assert_eq!(scores.get(Ability::Wisdom), 2);
    }

    #[test]
    fn level_bounds() {
        let mut level = Level::default();
        assert_eq!(level.value(), 1);
        level.adjust(-1);
        assert_eq!(level.value(), 1);
        level.adjust(25);
        assert_eq!(level.value(), 20);
        assert_eq!(Level::new(0).value(), 1);
        assert_eq!(Level::new(7).to_string(), "7");
    }

    #[test]
    fn level_deserialization_clamps() {
        let level: Level = serde_json::from_str("42").unwrap();
        assert_eq!(level.value(), 20);
    }
}
