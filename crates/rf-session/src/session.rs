//! The session: one dice roller and one character sheet sharing a clock.
//!
//! `Session` owns every piece of mutable state and is the only thing the
//! presentation layer talks to. Intents go in as method calls, snapshots come
//! out through the accessors (or [`Session::snapshot`]).

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rf_mechanics::{
    Ability, AttackOptions, AttackSlot, CharacterSheet, CheckKind, DicePool, DieFace, Level,
    MasteryRank, MechError, RandomSource, RollResult, Strike, format_signed,
};

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::history::{HistoryEntry, HistoryLog};
use crate::reset::{ResetConfirmation, ResetOutcome, ResetState};
use crate::sound::{Silent, SoundPlayer, play_roll_sound};
use crate::toast::{Toast, ToastNotifier};

/// Toast shown when a roll is requested with nothing selected.
pub const NOTHING_TO_ROLL: &str = "Select at least one die or a modifier.";
/// Toast shown on the first reset request.
pub const RESET_ARMED: &str = "Press reset again to confirm.";
/// Toast shown once the sheet has been reset.
pub const RESET_DONE: &str = "Character sheet reset!";
/// Toast shown when the character log is cleared.
pub const HISTORY_CLEARED: &str = "History cleared.";

/// An interactive dice roller and character sheet.
pub struct Session {
    config: SessionConfig,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    sound: Box<dyn SoundPlayer>,
    pool: DicePool,
    modifier: i32,
    attack: AttackOptions,
    last_roll: Option<RollResult>,
    dice_history: HistoryLog,
    sheet: CharacterSheet,
    sheet_history: HistoryLog,
    reset: ResetConfirmation,
    toast: ToastNotifier,
}

impl Session {
    /// A session on the wall clock, with no sound device.
    ///
    /// Rolls come from a `StdRng` seeded from the config, or from OS entropy.
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_parts(config, Box::new(SystemClock), Box::new(rng), Box::new(Silent))
    }

    /// A session with explicit collaborators.
    pub fn with_parts(
        config: SessionConfig,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        Self {
            dice_history: HistoryLog::new(config.dice_history_capacity, config.freshness_window),
            sheet_history: HistoryLog::new(config.sheet_history_capacity, config.freshness_window),
            reset: ResetConfirmation::new(config.reset_window),
            toast: ToastNotifier::new(config.toast),
            pool: DicePool::new(),
            modifier: 0,
            attack: AttackOptions::default(),
            last_roll: None,
            sheet: CharacterSheet::new(),
            config,
            clock,
            rng,
            sound,
        }
    }

    /// Replace the sound player.
    pub fn set_sound_player(&mut self, sound: Box<dyn SoundPlayer>) {
        self.sound = sound;
    }

    /// Enable or disable roll sounds.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.config.sound_enabled = enabled;
    }

    // ---------------------------------------------------------------
    // Timers
    // ---------------------------------------------------------------

    /// Fire every timer that is due. Reads the clock once.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.dice_history.tick(now);
        self.sheet_history.tick(now);
        self.reset.tick(now);
        self.toast.tick(now);
    }

    /// The earliest pending timer across all components.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        [
            self.dice_history.next_deadline(),
            self.sheet_history.next_deadline(),
            self.reset.next_deadline(),
            self.toast.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Current time according to the session clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ---------------------------------------------------------------
    // Dice roller
    // ---------------------------------------------------------------

    /// Set how many dice of `face` are selected. Negative counts become zero.
    pub fn set_quantity(&mut self, face: DieFace, qty: i64) {
        self.pool.set_quantity(face, qty);
    }

    /// Add one die of `face`.
    pub fn increment_die(&mut self, face: DieFace) {
        self.pool.increment(face);
    }

    /// Remove one die of `face`; nothing happens at zero.
    pub fn decrement_die(&mut self, face: DieFace) {
        self.pool.decrement(face);
    }

    /// Step the free modifier. Returns the new value.
    pub fn adjust_modifier(&mut self, delta: i32) -> i32 {
        self.modifier = self.modifier.saturating_add(delta);
        self.modifier
    }

    /// Set the free modifier.
    pub fn set_modifier(&mut self, modifier: i32) {
        self.modifier = modifier;
    }

    /// Toggle the agile trait. Returns the new value.
    pub fn toggle_agile(&mut self) -> bool {
        self.attack.agile = !self.attack.agile;
        self.attack.agile
    }

    /// Toggle the sweep trait. Returns the new value.
    pub fn toggle_sweep(&mut self) -> bool {
        self.attack.sweep = !self.attack.sweep;
        self.attack.sweep
    }

    /// Clear the pool, the modifier, the attack traits and the shown result.
    pub fn clear_selection(&mut self) {
        self.pool.reset();
        self.modifier = 0;
        self.attack = AttackOptions::default();
        self.last_roll = None;
    }

    /// Roll the selected pool with the free modifier.
    pub fn roll(&mut self) -> SessionResult<RollResult> {
        self.roll_pool(self.modifier)
    }

    /// Roll the selected pool as the given strike of the turn.
    pub fn roll_strike(&mut self, strike: Strike) -> SessionResult<RollResult> {
        let penalty = self.attack.penalty(strike);
        tracing::debug!(?strike, penalty, "rolling strike");
        self.roll_pool(self.modifier.saturating_add(penalty))
    }

    fn roll_pool(&mut self, modifier: i32) -> SessionResult<RollResult> {
        let now = self.clock.now();
        let result = match rf_mechanics::roll(&self.pool, modifier, self.rng.as_mut()) {
            Ok(result) => result,
            Err(e @ MechError::NothingToRoll) => {
                self.toast.show(NOTHING_TO_ROLL, now);
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        self.dice_history
            .record(HistoryEntry::from_roll(&result, now), now);
        self.last_roll = Some(result.clone());
        play_roll_sound(self.sound.as_ref(), self.config.sound_enabled);
        Ok(result)
    }

    // ---------------------------------------------------------------
    // Character sheet
    // ---------------------------------------------------------------

    /// Step the level, clamped to 1..=20. Returns the new level.
    pub fn adjust_level(&mut self, delta: i32) -> Level {
        self.sheet.level.adjust(delta);
        self.sheet.level
    }

    /// Set the level, clamped to 1..=20.
    pub fn set_level(&mut self, level: i32) {
        self.sheet.level = Level::new(level);
    }

    /// Step an ability score, clamped to -5..=5. Returns the new score.
    pub fn adjust_ability(&mut self, ability: Ability, delta: i32) -> i32 {
        self.sheet.abilities.adjust(ability, delta);
        self.sheet.abilities.get(ability)
    }

    /// Set an ability score, clamped to -5..=5.
    pub fn set_ability(&mut self, ability: Ability, value: i32) {
        self.sheet.abilities.set(ability, value);
    }

    /// Advance a check's mastery rank. Returns the new rank.
    pub fn cycle_mastery(&mut self, kind: CheckKind) -> MasteryRank {
        self.sheet.cycle_mastery(kind)
    }

    /// Step a check's equipment bonus. Returns the new bonus.
    pub fn adjust_equipment_bonus(&mut self, kind: CheckKind, delta: i32) -> i32 {
        self.sheet.adjust_equipment_bonus(kind, delta)
    }

    /// Toggle an attack slot between STR and DEX. Returns the new ability.
    pub fn cycle_attack_ability(&mut self, slot: AttackSlot) -> Ability {
        self.sheet.cycle_attack_ability(slot)
    }

    /// The current modifier for a check.
    pub fn modifier_for(&self, kind: CheckKind) -> i32 {
        self.sheet.modifier(kind)
    }

    /// Roll a d20 check, log it and announce it.
    pub fn roll_check(&mut self, kind: CheckKind) -> RollResult {
        let now = self.clock.now();
        let modifier = self.sheet.modifier(kind);
        let result = rf_mechanics::roll_d20(modifier, self.rng.as_mut());
        let label = kind.label();
        let die = result.rolls.first().map_or(0, |r| r.value);

        self.toast.show(
            format!(
                "{label}: d20 = {die} | modifier {} | total {}",
                format_signed(i64::from(modifier)),
                result.total
            ),
            now,
        );
        self.sheet_history
            .record(HistoryEntry::from_roll(&result, now).with_label(label), now);
        play_roll_sound(self.sound.as_ref(), self.config.sound_enabled);
        result
    }

    /// Request a sheet reset. The first request only arms it; a second one
    /// inside the window wipes the sheet and its log.
    pub fn request_reset(&mut self) -> ResetOutcome {
        let now = self.clock.now();
        let outcome = self.reset.request(now);
        match outcome {
            ResetOutcome::Armed { .. } => self.toast.show(RESET_ARMED, now),
            ResetOutcome::Confirmed => {
                self.sheet.reset();
                self.sheet_history.clear();
                self.toast.show(RESET_DONE, now);
            }
        }
        outcome
    }

    /// Empty the character-sheet log.
    pub fn clear_sheet_history(&mut self) {
        self.sheet_history.clear();
        self.toast.show(HISTORY_CLEARED, self.clock.now());
    }

    /// Empty the dice roller's history.
    pub fn clear_dice_history(&mut self) {
        self.dice_history.clear();
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Selected dice.
    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// The free modifier.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Attack traits applied to strikes.
    pub fn attack_options(&self) -> AttackOptions {
        self.attack
    }

    /// The result currently displayed by the dice roller.
    pub fn last_roll(&self) -> Option<&RollResult> {
        self.last_roll.as_ref()
    }

    /// The dice roller's history.
    pub fn dice_history(&self) -> &HistoryLog {
        &self.dice_history
    }

    /// The character sheet.
    pub fn sheet(&self) -> &CharacterSheet {
        &self.sheet
    }

    /// The character-sheet log.
    pub fn sheet_history(&self) -> &HistoryLog {
        &self.sheet_history
    }

    /// Reset confirmation state.
    pub fn reset_state(&self) -> ResetState {
        self.reset.state()
    }

    /// The toast on screen.
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.current()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::error::SessionError;
    use rf_mechanics::{Save, SequenceSource, Skill};

    struct CountingSound(Rc<Cell<u32>>);

    impl SoundPlayer for CountingSound {
        fn play(&self) -> SessionResult<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct BrokenSound;

    impl SoundPlayer for BrokenSound {
        fn play(&self) -> SessionResult<()> {
            Err(SessionError::Sound("no device".into()))
        }
    }

    fn session_with(values: Vec<u32>) -> (Session, ManualClock) {
        let clock = ManualClock::default();
        let session = Session::with_parts(
            SessionConfig::default(),
            Box::new(clock.clone()),
            Box::new(SequenceSource::new(values)),
            Box::new(Silent),
        );
        (session, clock)
    }

    fn reflex() -> CheckKind {
        CheckKind::Save(Save::Reflex)
    }

    #[test]
    fn roll_pool_with_modifier() {
        let (mut s, _) = session_with(vec![2, 5, 17]);
        s.set_quantity(DieFace::D20, 1);
        s.set_quantity(DieFace::D6, 2);
        s.set_modifier(3);
        let result = s.roll().unwrap();
        assert_eq!(result.formula, "2d6 + 1d20 + 3");
        assert_eq!(result.total, 2 + 5 + 17 + 3);
        assert_eq!(s.last_roll(), Some(&result));
        assert_eq!(s.dice_history().len(), 1);
        assert!(s.dice_history().newest().unwrap().is_new);
    }

    #[test]
    fn empty_roll_is_rejected_without_history() {
        let (mut s, _) = session_with(vec![]);
        let err = s.roll().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Mechanics(MechError::NothingToRoll)
        ));
        assert!(s.dice_history().is_empty());
        assert_eq!(s.toast().unwrap().message, NOTHING_TO_ROLL);
    }

    #[test]
    fn decrement_at_zero_stays_zero() {
        let (mut s, _) = session_with(vec![]);
        s.decrement_die(DieFace::D8);
        assert_eq!(s.pool().quantity(DieFace::D8), 0);
        s.increment_die(DieFace::D8);
        s.decrement_die(DieFace::D8);
        s.decrement_die(DieFace::D8);
        assert_eq!(s.pool().quantity(DieFace::D8), 0);
    }

    #[test]
    fn dice_history_is_bounded_to_five() {
        let (mut s, _) = session_with(vec![4]);
        s.increment_die(DieFace::D4);
        for _ in 0..6 {
            s.roll().unwrap();
        }
        assert_eq!(s.dice_history().len(), 5);
    }

    #[test]
    fn freshness_expires_on_tick() {
        let (mut s, clock) = session_with(vec![3]);
        s.increment_die(DieFace::D6);
        s.roll().unwrap();
        clock.advance_ms(749);
        s.tick();
        assert!(s.dice_history().newest().unwrap().is_new);
        clock.advance_ms(1);
        s.tick();
        assert!(!s.dice_history().newest().unwrap().is_new);
    }

    #[test]
    fn clear_selection_resets_roller() {
        let (mut s, _) = session_with(vec![6]);
        s.increment_die(DieFace::D12);
        s.adjust_modifier(2);
        s.toggle_agile();
        s.roll().unwrap();
        s.clear_selection();
        assert!(!s.pool().has_any_selection());
        assert_eq!(s.modifier(), 0);
        assert_eq!(s.attack_options(), AttackOptions::default());
        assert!(s.last_roll().is_none());
        assert_eq!(s.dice_history().len(), 1);
    }

    #[test]
    fn strikes_apply_multiple_attack_penalty() {
        let (mut s, _) = session_with(vec![15]);
        s.increment_die(DieFace::D20);
        s.set_modifier(7);
        assert_eq!(s.roll_strike(Strike::First).unwrap().total, 22);
        assert_eq!(s.roll_strike(Strike::Second).unwrap().total, 17);
        s.toggle_agile();
        s.toggle_sweep();
        let third = s.roll_strike(Strike::Third).unwrap();
        assert_eq!(third.modifier, 7 - 8 + 1);
        assert_eq!(third.formula, "1d20");
        assert_eq!(third.total, 15);
    }

    #[test]
    fn check_records_labelled_entry_and_toasts() {
        let (mut s, _) = session_with(vec![14]);
        s.adjust_ability(Ability::Dexterity, 2);
        let result = s.roll_check(reflex());
        assert_eq!(result.total, 14 + 2 + 1);

        let entry = s.sheet_history().newest().unwrap();
        assert_eq!(entry.label.as_deref(), Some("Reflex"));
        assert_eq!(entry.formula, "1d20 + 3");
        assert_eq!(
            s.toast().unwrap().message,
            "Reflex: d20 = 14 | modifier +3 | total 17"
        );
        assert!(s.dice_history().is_empty());
    }

    #[test]
    fn sheet_history_is_bounded_to_ten() {
        let (mut s, _) = session_with(vec![10]);
        for _ in 0..12 {
            s.roll_check(CheckKind::Perception);
        }
        assert_eq!(s.sheet_history().len(), 10);
    }

    #[test]
    fn modifier_scenario() {
        let (mut s, _) = session_with(vec![]);
        let slot = AttackSlot::FIRST;
        let kind = CheckKind::Attack(slot);
        s.adjust_ability(Ability::Strength, 2);
        s.set_level(5);
        s.cycle_mastery(kind);
        s.cycle_mastery(kind);
        s.adjust_equipment_bonus(kind, -1);
        assert_eq!(s.modifier_for(kind), 10);

        assert_eq!(s.cycle_attack_ability(slot), Ability::Dexterity);
        assert_eq!(s.modifier_for(kind), 8);
    }

    #[test]
    fn steppers_clamp() {
        let (mut s, _) = session_with(vec![]);
        assert_eq!(s.adjust_level(-3).value(), 1);
        assert_eq!(s.adjust_level(40).value(), 20);
        assert_eq!(s.adjust_ability(Ability::Wisdom, 9), 5);
        assert_eq!(s.adjust_ability(Ability::Wisdom, -20), -5);
    }

    fn customise(s: &mut Session) {
        s.adjust_level(4);
        s.adjust_ability(Ability::Charisma, 3);
        s.cycle_mastery(CheckKind::Skill(Skill::Diplomacy));
        s.adjust_equipment_bonus(CheckKind::Skill(Skill::Diplomacy), 1);
        s.cycle_attack_ability(AttackSlot::FIRST);
        s.roll_check(CheckKind::Skill(Skill::Diplomacy));
    }

    #[test]
    fn first_reset_request_changes_nothing() {
        let (mut s, _) = session_with(vec![12]);
        customise(&mut s);
        let before = s.sheet().clone();
        assert!(matches!(s.request_reset(), ResetOutcome::Armed { .. }));
        assert_eq!(s.sheet(), &before);
        assert_eq!(s.sheet_history().len(), 1);
        assert_eq!(s.toast().unwrap().message, RESET_ARMED);
    }

    #[test]
    fn second_reset_inside_window_wipes_sheet() {
        let (mut s, clock) = session_with(vec![12]);
        customise(&mut s);
        s.request_reset();
        clock.advance_ms(2999);
        s.tick();
        assert_eq!(s.request_reset(), ResetOutcome::Confirmed);
        assert_eq!(s.sheet(), &CharacterSheet::default());
        assert!(s.sheet_history().is_empty());
        assert_eq!(s.reset_state(), ResetState::Idle);
        assert_eq!(s.toast().unwrap().message, RESET_DONE);
    }

    #[test]
    fn reset_request_lapses_after_window() {
        let (mut s, clock) = session_with(vec![12]);
        customise(&mut s);
        let before = s.sheet().clone();
        s.request_reset();
        clock.advance_ms(3000);
        s.tick();
        assert_eq!(s.reset_state(), ResetState::Idle);
        assert_eq!(s.sheet(), &before);

        assert!(matches!(s.request_reset(), ResetOutcome::Armed { .. }));
        assert_eq!(s.sheet(), &before);
    }

    #[test]
    fn reset_keeps_dice_roller_history() {
        let (mut s, _) = session_with(vec![5]);
        s.increment_die(DieFace::D10);
        s.roll().unwrap();
        s.request_reset();
        s.request_reset();
        assert_eq!(s.dice_history().len(), 1);
    }

    #[test]
    fn clear_sheet_history_toasts() {
        let (mut s, _) = session_with(vec![8]);
        s.roll_check(CheckKind::Perception);
        s.clear_sheet_history();
        assert!(s.sheet_history().is_empty());
        assert_eq!(s.toast().unwrap().message, HISTORY_CLEARED);
    }

    #[test]
    fn toast_dismisses_itself() {
        let (mut s, clock) = session_with(vec![8]);
        s.roll_check(CheckKind::Perception);
        clock.advance_ms(2480);
        s.tick();
        assert!(s.toast().is_none());
    }

    #[test]
    fn next_deadline_is_earliest_timer() {
        let (mut s, _) = session_with(vec![8]);
        assert_eq!(s.next_deadline(), None);
        let start = s.now();
        s.roll_check(CheckKind::Perception);
        assert_eq!(
            s.next_deadline(),
            Some(start + chrono::TimeDelta::milliseconds(200))
        );
    }

    #[test]
    fn sound_follows_setting_and_failures_are_ignored() {
        let plays = Rc::new(Cell::new(0));
        let (mut s, _) = session_with(vec![1]);
        s.set_sound_player(Box::new(CountingSound(plays.clone())));
        s.increment_die(DieFace::D4);
        s.roll().unwrap();
        s.roll_check(CheckKind::Perception);
        assert_eq!(plays.get(), 2);

        s.set_sound_enabled(false);
        s.roll().unwrap();
        assert_eq!(plays.get(), 2);

        s.set_sound_enabled(true);
        s.set_sound_player(Box::new(BrokenSound));
        assert!(s.roll().is_ok());
    }

    #[test]
    fn seeded_sessions_agree() {
        let cfg = SessionConfig::default().with_seed(42);
        let mut a = Session::new(cfg.clone());
        let mut b = Session::new(cfg);
        for s in [&mut a, &mut b] {
            s.set_quantity(DieFace::D100, 3);
        }
        assert_eq!(a.roll().unwrap().rolls, b.roll().unwrap().rolls);
    }
}
