//! Proficiency tiers and their bonuses.

use serde::{Deserialize, Serialize};

/// How well a character has mastered a check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MasteryRank {
    /// No training; contributes nothing.
    #[default]
    Untrained,
    /// Trained (+2).
    Trained,
    /// Expert (+4).
    Expert,
    /// Master (+6).
    Master,
    /// Legendary (+8).
    Legendary,
}

impl MasteryRank {
    /// All ranks in ascending order.
    pub const ALL: [MasteryRank; 5] = [
        Self::Untrained,
        Self::Trained,
        Self::Expert,
        Self::Master,
        Self::Legendary,
    ];

    /// The flat bonus this rank adds to a modifier.
    pub fn bonus(self) -> i32 {
        match self {
            Self::Untrained => 0,
            Self::Trained => 2,
            Self::Expert => 4,
            Self::Master => 6,
            Self::Legendary => 8,
        }
    }

    /// The next rank, wrapping from legendary back to untrained.
    pub fn next(self) -> Self {
        match self {
            Self::Untrained => Self::Trained,
            Self::Trained => Self::Expert,
            Self::Expert => Self::Master,
            Self::Master => Self::Legendary,
            Self::Legendary => Self::Untrained,
        }
    }

    /// Single-letter abbreviation for compact tables.
    pub fn abbreviation(self) -> char {
        match self {
            Self::Untrained => 'U',
            Self::Trained => 'T',
            Self::Expert => 'E',
            Self::Master => 'M',
            Self::Legendary => 'L',
        }
    }

    /// Parse a rank name or abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "untrained" | "u" => Some(Self::Untrained),
            "trained" | "t" => Some(Self::Trained),
            "expert" | "e" => Some(Self::Expert),
            "master" | "m" => Some(Self::Master),
            "legendary" | "l" => Some(Self::Legendary),
            _ => None,
        }
    }

    /// Parse a rank, falling back to [`MasteryRank::Untrained`] for unknown text.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(value = s, "unknown mastery rank, using untrained");
            Self::default()
        })
    }
}

impl std::fmt::Display for MasteryRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Untrained => "untrained",
            Self::Trained => "trained",
            Self::Expert => "expert",
            Self::Master => "master",
            Self::Legendary => "legendary",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bonuses() {
        let bonuses: Vec<i32> = MasteryRank::ALL.iter().map(|r| r.bonus()).collect();
        assert_eq!(bonuses, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn bonus_is_monotonic() {
        for pair in MasteryRank::ALL.windows(2) {
            assert!(pair[0].bonus() <= pair[1].bonus());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn next_wraps() {
        assert_eq!(MasteryRank::Untrained.next(), MasteryRank::Trained);
        assert_eq!(MasteryRank::Legendary.next(), MasteryRank::Untrained);
    }

    #[test]
    fn parse_names_and_letters() {
        assert_eq!(MasteryRank::parse("Expert"), Some(MasteryRank::Expert));
        assert_eq!(MasteryRank::parse("l"), Some(MasteryRank::Legendary));
        assert_eq!(MasteryRank::parse("grandmaster"), None);
        assert_eq!(MasteryRank::parse_or_default("???"), MasteryRank::Untrained);
        assert_eq!(MasteryRank::parse_or_default("master"), MasteryRank::Master);
    }

    #[test]
    fn display_and_abbreviation() {
        assert_eq!(MasteryRank::Trained.to_string(), "trained");
        assert_eq!(MasteryRank::Master.abbreviation(), 'M');
    }

    #[test]
    fn unknown_rank_fails_deserialization() {
        assert!(serde_json::from_str::<MasteryRank>("\"grandmaster\"").is_err());
        let rank: MasteryRank = serde_json::from_str("\"expert\"").unwrap();
        assert_eq!(rank, MasteryRank::Expert);
    }

    proptest! {
        #[test]
        fn five_steps_close_the_cycle(idx in 0usize..5) {
            let start = MasteryRank::ALL[idx];
            let mut rank = start;
            for _ in 0..5 {
                rank = rank.next();
            }
            prop_assert_eq!(rank, start);
        }
    }
}
