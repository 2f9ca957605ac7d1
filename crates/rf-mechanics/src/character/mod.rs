//! Character sheets: level, ability scores and per-check profiles.
//!
//! Every check derives its modifier the same way (see
//! [`compute_modifier`](crate::modifier::compute_modifier)); the only
//! difference between categories is which ability feeds it. Saves, skills
//! and perception bind a fixed ability, attacks toggle between STR and DEX.

pub mod ability;
pub mod check;
pub mod mastery;

pub use ability::{Ability, AbilityScores, Level};
pub use check::{ATTACK_ABILITIES, AttackSlot, CheckKind, CheckProfile, Save, Skill};
pub use mastery::MasteryRank;

use serde::{Deserialize, Serialize};

/// A character's session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Character level.
    pub level: Level,
    /// Ability scores.
    pub abilities: AbilityScores,
    perception: CheckProfile,
    saves: [CheckProfile; 3],
    skills: [CheckProfile; 18],
    attacks: [CheckProfile; AttackSlot::COUNT],
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            level: Level::default(),
            abilities: AbilityScores::default(),
            perception: CheckProfile::default_for(CheckKind::Perception),
            saves: Save::ALL.map(|s| CheckProfile::default_for(CheckKind::Save(s))),
            skills: Skill::ALL.map(|s| CheckProfile::default_for(CheckKind::Skill(s))),
            attacks: [CheckProfile::default_for(CheckKind::Attack(AttackSlot::FIRST));
                AttackSlot::COUNT],
        }
    }
}

impl CharacterSheet {
    /// A level 1 character with every score at zero and nothing trained.
    pub fn new() -> Self {
        Self::default()
    }

    /// The profile behind a check.
    pub fn profile(&self, kind: CheckKind) -> &CheckProfile {
        match kind {
            CheckKind::Perception => &self.perception,
            CheckKind::Save(save) => &self.saves[save.index()],
            CheckKind::Skill(skill) => &self.skills[skill.index()],
            CheckKind::Attack(slot) => &self.attacks[slot.index()],
        }
    }

    fn profile_mut(&mut self, kind: CheckKind) -> &mut CheckProfile {
        match kind {
            CheckKind::Perception => &mut self.perception,
            CheckKind::Save(save) => &mut self.saves[save.index()],
            CheckKind::Skill(skill) => &mut self.skills[skill.index()],
            CheckKind::Attack(slot) => &mut self.attacks[slot.index()],
        }
    }

    /// Replace a profile. Abilities not allowed for the check are defaulted.
    pub fn set_profile(&mut self, kind: CheckKind, profile: CheckProfile) {
        *self.profile_mut(kind) = profile.sanitized_for(kind);
    }

    /// The current modifier for a check.
    pub fn modifier(&self, kind: CheckKind) -> i32 {
        self.profile(kind).modifier(&self.abilities, self.level)
    }

    /// Advance a check's mastery rank, wrapping. Returns the new rank.
    pub fn cycle_mastery(&mut self, kind: CheckKind) -> MasteryRank {
        let profile = self.profile_mut(kind);
        profile.cycle_mastery();
        profile.mastery
    }

    /// Step a check's equipment bonus. Returns the new bonus.
    pub fn adjust_equipment_bonus(&mut self, kind: CheckKind, delta: i32) -> i32 {
        let profile = self.profile_mut(kind);
        profile.adjust_equipment_bonus(delta);
        profile.equipment_bonus
    }

    /// Toggle an attack row between STR and DEX. Returns the new ability.
    pub fn cycle_attack_ability(&mut self, slot: AttackSlot) -> Ability {
        let profile = self.profile_mut(CheckKind::Attack(slot));
        profile.cycle_attack_ability();
        profile.ability
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
