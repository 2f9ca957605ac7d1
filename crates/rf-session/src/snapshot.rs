//! Read-only views of a session for the presentation layer.

use serde::Serialize;

use rf_mechanics::{
    Ability, AttackOptions, CharacterSheet, CheckKind, DicePool, MasteryRank, RollResult,
    formula,
};

use crate::error::SessionResult;
use crate::history::HistoryEntry;
use crate::reset::ResetState;
use crate::session::Session;
use crate::toast::Toast;

/// One row of the character sheet with its computed modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRow {
    /// Which check.
    pub kind: CheckKind,
    /// Display label.
    pub label: String,
    /// Ability feeding the modifier.
    pub ability: Ability,
    /// Mastery rank.
    pub mastery: MasteryRank,
    /// Equipment bonus.
    pub equipment_bonus: i32,
    /// Resulting modifier.
    pub modifier: i32,
}

/// Everything the presentation layer renders after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Selected dice.
    pub pool: DicePool,
    /// Free modifier.
    pub modifier: i32,
    /// Formula that the next roll would use.
    pub pending_formula: Option<String>,
    /// Strike traits.
    pub attack: AttackOptions,
    /// Result on display.
    pub last_roll: Option<RollResult>,
    /// Dice roller history, newest first.
    pub dice_history: Vec<HistoryEntry>,
    /// Character sheet.
    pub sheet: CharacterSheet,
    /// Every check with its modifier.
    pub checks: Vec<CheckRow>,
    /// Character log, newest first.
    pub sheet_history: Vec<HistoryEntry>,
    /// Reset confirmation state.
    pub reset: ResetState,
    /// Toast on screen.
    pub toast: Option<Toast>,
}

impl SessionSnapshot {
    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Session {
    /// Every check on the sheet with its current modifier.
    pub fn check_rows(&self) -> Vec<CheckRow> {
        let sheet = self.sheet();
        CheckKind::all()
            .into_iter()
            .map(|kind| {
                let profile = sheet.profile(kind);
                CheckRow {
                    kind,
                    label: kind.label(),
                    ability: profile.ability,
                    mastery: profile.mastery,
                    equipment_bonus: profile.equipment_bonus,
                    modifier: sheet.modifier(kind),
                }
            })
            .collect()
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            pool: self.pool().clone(),
            modifier: self.modifier(),
            pending_formula: formula(self.pool(), self.modifier()),
            attack: self.attack_options(),
            last_roll: self.last_roll().cloned(),
            dice_history: self.dice_history().snapshot(),
            sheet: self.sheet().clone(),
            checks: self.check_rows(),
            sheet_history: self.sheet_history().snapshot(),
            reset: self.reset_state(),
            toast: self.toast().cloned(),
        }
    }
}
