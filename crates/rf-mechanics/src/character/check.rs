//! Check categories and the static ability tables behind them.

use serde::{Deserialize, Serialize};

use super::ability::{Ability, AbilityScores, Level};
use super::mastery::MasteryRank;
use crate::modifier::compute_modifier;

/// Abilities an attack may key off.
pub const ATTACK_ABILITIES: [Ability; 2] = [Ability::Strength, Ability::Dexterity];

/// A saving throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Save {
    /// Fortitude, keyed off Constitution.
    Fortitude,
    /// Reflex, keyed off Dexterity.
    Reflex,
    /// Will, keyed off Wisdom.
    Will,
}

impl Save {
    /// All saves in sheet order.
    pub const ALL: [Save; 3] = [Self::Fortitude, Self::Reflex, Self::Will];

    /// The ability this save always uses.
    pub fn ability(self) -> Ability {
        match self {
            Self::Fortitude => Ability::Constitution,
            Self::Reflex => Ability::Dexterity,
            Self::Will => Ability::Wisdom,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fortitude => "Fortitude",
            Self::Reflex => "Reflex",
            Self::Will => "Will",
        }
    }
}

/// A skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    /// Acrobatics (DEX).
    Acrobatics,
    /// Arcana (INT).
    Arcana,
    /// Crafting (INT).
    Crafting,
    /// Athletics (STR).
    Athletics,
    /// Lore 1 (INT).
    Lore1,
    /// Lore 2 (INT).
    Lore2,
    /// Diplomacy (CHA).
    Diplomacy,
    /// Stealth (DEX).
    Stealth,
    /// Deception (CHA).
    Deception,
    /// Intimidation (CHA).
    Intimidation,
    /// Medicine (WIS).
    Medicine,
    /// Nature (WIS).
    Nature,
    /// Occultism (INT).
    Occultism,
    /// Religion (WIS).
    Religion,
    /// Performance (CHA).
    Performance,
    /// Society (INT).
    Society,
    /// Survival (WIS).
    Survival,
    /// Thievery (DEX).
    Thievery,
}

impl Skill {
    /// All skills in sheet order.
    pub const ALL: [Skill; 18] = [
        Self::Acrobatics,
        Self::Arcana,
        Self::Crafting,
        Self::Athletics,
        Self::Lore1,
        Self::Lore2,
        Self::Diplomacy,
        Self::Stealth,
        Self::Deception,
        Self::Intimidation,
        Self::Medicine,
        Self::Nature,
        Self::Occultism,
        Self::Religion,
        Self::Performance,
        Self::Society,
        Self::Survival,
        Self::Thievery,
    ];

    /// The ability this skill always uses.
    pub fn ability(self) -> Ability {
        match self {
            Self::Athletics => Ability::Strength,
            Self::Acrobatics | Self::Stealth | Self::Thievery => Ability::Dexterity,
            Self::Arcana
            | Self::Crafting
            | Self::Lore1
            | Self::Lore2
            | Self::Occultism
            | Self::Society => Ability::Intelligence,
            Self::Medicine | Self::Nature | Self::Religion | Self::Survival => Ability::Wisdom,
            Self::Diplomacy | Self::Deception | Self::Intimidation | Self::Performance => {
                Ability::Charisma
            }
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Acrobatics => "Acrobatics",
            Self::Arcana => "Arcana",
            Self::Crafting => "Crafting",
            Self::Athletics => "Athletics",
            Self::Lore1 => "Lore 1",
            Self::Lore2 => "Lore 2",
            Self::Diplomacy => "Diplomacy",
            Self::Stealth => "Stealth",
            Self::Deception => "Deception",
            Self::Intimidation => "Intimidation",
            Self::Medicine => "Medicine",
            Self::Nature => "Nature",
            Self::Occultism => "Occultism",
            Self::Religion => "Religion",
            Self::Performance => "Performance",
            Self::Society => "Society",
            Self::Survival => "Survival",
            Self::Thievery => "Thievery",
        }
    }
}

/// One of the six attack rows on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttackSlot(u8);

impl AttackSlot {
    /// Number of attack rows.
    pub const COUNT: usize = 6;

    /// The first attack row.
    pub const FIRST: AttackSlot = AttackSlot(0);

    /// Slot for a 1-based row number.
    pub fn new(number: usize) -> Option<Self> {
        (1..=Self::COUNT)
            .contains(&number)
            .then(|| Self(u8::try_from(number - 1).unwrap_or(0)))
    }

    /// All slots in order.
    pub fn all() -> impl Iterator<Item = AttackSlot> {
        (1..=Self::COUNT).filter_map(Self::new)
    }

    /// Zero-based index into the attack table.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Display label, e.g. `"Attack 2"`.
    pub fn label(self) -> String {
        format!("Attack {}", self.index() + 1)
    }
}

/// Any check a character can roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    /// Perception, keyed off Wisdom.
    Perception,
    /// A saving throw.
    Save(Save),
    /// A skill check.
    Skill(Skill),
    /// An attack row; its ability is chosen per row.
    Attack(AttackSlot),
}

impl CheckKind {
    /// The ability bound to this check, or `None` for attacks.
    pub fn fixed_ability(self) -> Option<Ability> {
        match self {
            Self::Perception => Some(Ability::Wisdom),
            Self::Save(save) => Some(save.ability()),
            Self::Skill(skill) => Some(skill.ability()),
            Self::Attack(_) => None,
        }
    }

    /// The ability a fresh profile starts with.
    pub fn default_ability(self) -> Ability {
        self.fixed_ability().unwrap_or(ATTACK_ABILITIES[0])
    }

    /// Display label.
    pub fn label(self) -> String {
        match self {
            Self::Perception => "Perception".to_string(),
            Self::Save(save) => save.label().to_string(),
            Self::Skill(skill) => skill.label().to_string(),
            Self::Attack(slot) => slot.label(),
        }
    }

    /// Parse a check name: `perception`, `reflex`, `lore1`, `attack3`, ...
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        if key == "perception" {
            return Some(Self::Perception);
        }
        if let Some(n) = key
            .strip_prefix("attack")
            .or_else(|| key.strip_prefix("atk"))
        {
            return n.parse().ok().and_then(AttackSlot::new).map(Self::Attack);
        }
        if let Some(save) = Save::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(&key))
        {
            return Some(Self::Save(save));
        }
        Skill::ALL
            .into_iter()
            .find(|s| s.label().replace(' ', "").eq_ignore_ascii_case(&key))
            .map(Self::Skill)
    }

    /// Every check on the sheet, in display order.
    pub fn all() -> Vec<CheckKind> {
        let mut kinds = vec![Self::Perception];
        kinds.extend(Save::ALL.into_iter().map(Self::Save));
        kinds.extend(Skill::ALL.into_iter().map(Self::Skill));
        kinds.extend(AttackSlot::all().map(Self::Attack));
        kinds
    }
}

/// The per-check inputs a player edits: ability, mastery and gear bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckProfile {
    /// Ability feeding the modifier.
    pub ability: Ability,
    /// Mastery rank.
    pub mastery: MasteryRank,
    /// Equipment bonus; unbounded.
    pub equipment_bonus: i32,
}

impl CheckProfile {
    /// A fresh profile for `kind`: its default ability, untrained, no gear.
    pub fn default_for(kind: CheckKind) -> Self {
        Self {
            ability: kind.default_ability(),
            mastery: MasteryRank::Untrained,
            equipment_bonus: 0,
        }
    }

    /// Replace an ability that is not allowed for `kind` with its default.
    pub fn sanitized_for(mut self, kind: CheckKind) -> Self {
        let allowed = match kind.fixed_ability() {
            Some(fixed) => self.ability == fixed,
            None => ATTACK_ABILITIES.contains(&self.ability),
        };
        if !allowed {
            tracing::warn!(
                check = %kind.label(),
                ability = %self.ability,
                "ability not allowed for check, using default"
            );
            self.ability = kind.default_ability();
        }
        self
    }

    /// Build a profile from loosely typed text, defaulting anything unknown.
    pub fn from_raw(kind: CheckKind, ability: &str, mastery: &str, equipment_bonus: i32) -> Self {
        Self {
            ability: Ability::parse(ability).unwrap_or_else(|| kind.default_ability()),
            mastery: MasteryRank::parse_or_default(mastery),
            equipment_bonus,
        }
        .sanitized_for(kind)
    }

    /// The modifier this profile yields for the given scores and level.
    pub fn modifier(&self, scores: &AbilityScores, level: Level) -> i32 {
        compute_modifier(
            scores.get(self.ability),
            self.mastery,
            level.value(),
            self.equipment_bonus,
        )
    }

    /// Advance to the next mastery rank, wrapping.
    pub fn cycle_mastery(&mut self) {
        self.mastery = self.mastery.next();
    }

    /// Step the equipment bonus by `delta`.
    pub fn adjust_equipment_bonus(&mut self, delta: i32) {
        self.equipment_bonus = self.equipment_bonus.saturating_add(delta);
    }

    /// Toggle between the two attack abilities.
    pub fn cycle_attack_ability(&mut self) {
        let idx = ATTACK_ABILITIES
            .iter()
            .position(|&a| a == self.ability)
            .map_or(0, |i| (i + 1) % ATTACK_ABILITIES.len());
        self.ability = ATTACK_ABILITIES[idx];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_table() {
        assert_eq!(Save::Fortitude.ability(), Ability::Constitution);
        assert_eq!(Save::Reflex.ability(), Ability::Dexterity);
        assert_eq!(Save::Will.ability(), Ability::Wisdom);
    }

    #[test]
    fn skill_table_spot_checks() {
        assert_eq!(Skill::ALL.len(), 18);
        assert_eq!(Skill::Athletics.ability(), Ability::Strength);
        assert_eq!(Skill::Thievery.ability(), Ability::Dexterity);
        assert_eq!(Skill::Lore2.ability(), Ability::Intelligence);
        assert_eq!(Skill::Survival.ability(), Ability::Wisdom);
        assert_eq!(Skill::Performance.ability(), Ability::Charisma);
        assert!(!Skill::ALL.iter().any(|s| s.ability() == Ability::Constitution));
    }

    #[test]
    fn attack_slots() {
        assert_eq!(AttackSlot::new(0), None);
        assert_eq!(AttackSlot::new(7), None);
        let slot = AttackSlot::new(3).unwrap();
        assert_eq!(slot.index(), 2);
        assert_eq!(slot.label(), "Attack 3");
        assert_eq!(AttackSlot::all().count(), 6);
    }

    #[test]
    fn parse_kinds() {
        assert_eq!(CheckKind::parse("Perception"), Some(CheckKind::Perception));
        assert_eq!(CheckKind::parse("reflex"), Some(CheckKind::Save(Save::Reflex)));
        assert_eq!(CheckKind::parse("lore 1"), Some(CheckKind::Skill(Skill::Lore1)));
        assert_eq!(CheckKind::parse("lore2"), Some(CheckKind::Skill(Skill::Lore2)));
        assert_eq!(
            CheckKind::parse("attack2"),
            Some(CheckKind::Attack(AttackSlot::new(2).unwrap()))
        );
        assert_eq!(CheckKind::parse("attack9"), None);
        assert_eq!(CheckKind::parse("juggling"), None);
        assert_eq!(CheckKind::all().len(), 1 + 3 + 18 + 6);
    }

    #[test]
    fn raw_profile_defaults_corrupted_values() {
        let p = CheckProfile::from_raw(CheckKind::Save(Save::Will), "STR", "wizard", 2);
        assert_eq!(p.ability, Ability::Wisdom);
        assert_eq!(p.mastery, MasteryRank::Untrained);
        assert_eq!(p.equipment_bonus, 2);

        let slot = CheckKind::Attack(AttackSlot::new(1).unwrap());
        let p = CheckProfile::from_raw(slot, "CHA", "expert", 0);
        assert_eq!(p.ability, Ability::Strength);
        assert_eq!(p.mastery, MasteryRank::Expert);

        let p = CheckProfile::from_raw(slot, "dex", "M", 0);
        assert_eq!(p.ability, Ability::Dexterity);
        assert_eq!(p.mastery, MasteryRank::Master);
    }

    #[test]
    fn attack_ability_cycles_between_two() {
        let mut p = CheckProfile::default_for(CheckKind::Attack(AttackSlot::new(1).unwrap()));
        assert_eq!(p.ability, Ability::Strength);
        p.cycle_attack_ability();
        assert_eq!(p.ability, Ability::Dexterity);
        p.cycle_attack_ability();
        assert_eq!(p.ability, Ability::Strength);
    }

    #[test]
    fn profile_modifier() {
        let mut scores = AbilityScores::new();
        scores.set(Ability::Strength, 2);
        let mut p = CheckProfile::default_for(CheckKind::Skill(Skill::Athletics));
        p.mastery = MasteryRank::Expert;
        p.adjust_equipment_bonus(-1);
        assert_eq!(p.modifier(&scores, Level::new(5)), 10);
    }
}
