//! Roll results and critical classification.

use serde::{Deserialize, Serialize};

use super::DieFace;
use crate::modifier::format_signed;

/// Display-only classification of a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Critical {
    /// A d20 showing 20.
    Success,
    /// A d20 showing 1.
    Failure,
}

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedRoll {
    /// The die that was rolled.
    #[serde(rename = "sides")]
    pub face: DieFace,
    /// The value rolled (1 to face.sides()).
    pub value: u32,
}

impl DetailedRoll {
    /// Critical classification; only d20s can be critical.
    pub fn critical(&self) -> Option<Critical> {
        match (self.face, self.value) {
            (DieFace::D20, 20) => Some(Critical::Success),
            (DieFace::D20, 1) => Some(Critical::Failure),
            _ => None,
        }
    }
}

/// The outcome of one roll of a pool plus a modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Sum of all die values plus the modifier.
    pub total: i64,
    /// Individual dice, grouped by ascending face.
    pub rolls: Vec<DetailedRoll>,
    /// The flat modifier that was applied.
    pub modifier: i32,
    /// Canonical formula, e.g. `"2d6 + 1d20 + 3"`.
    pub formula: String,
}

impl RollResult {
    /// Sum of the die values alone.
    pub fn dice_total(&self) -> i64 {
        self.rolls.iter().map(|r| i64::from(r.value)).sum()
    }

    /// Values grouped per face, in ascending face order.
    pub fn breakdown(&self) -> Vec<(DieFace, Vec<u32>)> {
        let mut groups: Vec<(DieFace, Vec<u32>)> = Vec::new();
        for roll in &self.rolls {
            match groups.iter_mut().find(|(face, _)| *face == roll.face) {
                Some((_, values)) => values.push(roll.value),
                None => groups.push((roll.face, vec![roll.value])),
            }
        }
        groups.sort_by_key(|(face, _)| *face);
        groups
    }

    /// Number of critical successes and failures among the d20s.
    pub fn criticals(&self) -> (usize, usize) {
        self.rolls
            .iter()
            .filter_map(DetailedRoll::critical)
            .fold((0, 0), |(hits, misses), c| match c {
                Critical::Success => (hits + 1, misses),
                Critical::Failure => (hits, misses + 1),
            })
    }

    /// Multi-line breakdown such as `d6: [3, 5]` followed by the modifier.
    pub fn breakdown_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .breakdown()
            .into_iter()
            .map(|(face, values)| {
                let vals: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("{face}: [{}]", vals.join(", "))
            })
            .collect();
        if self.modifier != 0 {
            lines.push(format!("modifier: {}", format_signed(i64::from(self.modifier))));
        }
        lines
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(|d| d.value.to_string()).collect();
        write!(f, "{} = [{}] = {}", self.formula, values.join(", "), self.total)
    }
}
