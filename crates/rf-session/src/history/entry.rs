//! History entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rf_mechanics::{DetailedRoll, RollResult, format_signed};

/// A past roll as it appears in a history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique id, also the key of the freshness timer.
    pub id: Uuid,
    /// What was rolled, e.g. "Reflex"; free rolls carry none.
    pub label: Option<String>,
    /// Canonical formula.
    pub formula: String,
    /// Final total.
    pub total: i64,
    /// Individual dice.
    pub rolls: Vec<DetailedRoll>,
    /// Flat modifier applied.
    pub modifier: i32,
    /// When the roll happened.
    pub timestamp: DateTime<Utc>,
    /// Whether this is the highlighted newest entry.
    pub is_new: bool,
}

impl HistoryEntry {
    /// Capture a roll result.
    pub fn from_roll(result: &RollResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: None,
            formula: result.formula.clone(),
            total: result.total,
            rolls: result.rolls.clone(),
            modifier: result.modifier,
            timestamp,
            is_new: false,
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// One-line summary, e.g. `"Reflex: 1d20 + 3 = 17 [14]"`.
    pub fn summary(&self) -> String {
        let values: Vec<String> = self.rolls.iter().map(|r| r.value.to_string()).collect();
        let prefix = self
            .label
            .as_ref()
            .map(|l| format!("{l}: "))
            .unwrap_or_default();
        if values.is_empty() {
            format!("{prefix}{} = {}", self.formula, self.total)
        } else {
            format!(
                "{prefix}{} = {} [{}]",
                self.formula,
                self.total,
                values.join(", ")
            )
        }
    }

    /// Signed modifier text, e.g. `"+3"`.
    pub fn modifier_text(&self) -> String {
        format_signed(i64::from(self.modifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_mechanics::DieFace;

    fn result() -> RollResult {
        RollResult {
            total: 17,
            rolls: vec![DetailedRoll {
                face: DieFace::D20,
                value: 14,
            }],
            modifier: 3,
            formula: "1d20 + 3".to_string(),
        }
    }

    #[test]
    fn captures_roll() {
        let now = Utc::now();
        let entry = HistoryEntry::from_roll(&result(), now);
        assert_eq!(entry.total, 17);
        assert_eq!(entry.formula, "1d20 + 3");
        assert_eq!(entry.timestamp, now);
        assert!(!entry.is_new);
        assert_eq!(entry.modifier_text(), "+3");
    }

    #[test]
    fn ids_are_unique() {
        let now = Utc::now();
        let a = HistoryEntry::from_roll(&result(), now);
        let b = HistoryEntry::from_roll(&result(), now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn summary_with_and_without_label() {
        let entry = HistoryEntry::from_roll(&result(), Utc::now());
        assert_eq!(entry.summary(), "1d20 + 3 = 17 [14]");
        let entry = entry.with_label("Reflex");
        assert_eq!(entry.summary(), "Reflex: 1d20 + 3 = 17 [14]");

        let flat = RollResult {
            total: 3,
            rolls: Vec::new(),
            modifier: 3,
            formula: "+3".to_string(),
        };
        assert_eq!(HistoryEntry::from_roll(&flat, Utc::now()).summary(), "+3 = 3");
    }
}
