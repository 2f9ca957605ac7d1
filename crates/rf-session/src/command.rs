//! Text command interpreter over a [`Session`].

use rf_mechanics::{
    Ability, AttackSlot, CheckKind, Critical, DieFace, RollResult, Strike, format_signed,
};

use crate::error::{SessionError, SessionResult};
use crate::history::HistoryLog;
use crate::reset::{ResetOutcome, ResetState};
use crate::session::Session;

/// A numeric argument: `+2`/`-2` steps, `2` sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Amount {
    Step(i32),
    Set(i32),
}

impl Amount {
    fn parse(s: &str) -> SessionResult<Self> {
        let s = s.trim();
        let value: i32 = s
            .parse()
            .map_err(|_| SessionError::InvalidArgument(format!("not a number: '{s}'")))?;
        if s.starts_with('+') || s.starts_with('-') {
            Ok(Self::Step(value))
        } else {
            Ok(Self::Set(value))
        }
    }
}

impl Session {
    /// Process a line of user input and return a response.
    ///
    /// Due timers fire before the command runs.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        self.tick();

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "add" => self.do_add(rest),
            "remove" | "rm" => self.do_remove(rest),
            "set" => self.do_set(rest),
            "mod" | "modifier" => self.do_modifier(rest),
            "clear" => {
                self.clear_selection();
                Ok("Selection cleared.".to_string())
            }
            "roll" | "r" => self.do_roll(),
            "strike" => self.do_strike(rest),
            "agile" => Ok(format!("Agile: {}", on_off(self.toggle_agile()))),
            "sweep" => Ok(format!("Sweep: {}", on_off(self.toggle_sweep()))),
            "history" => Ok(render_log(self.dice_history(), "No rolls yet.")),
            "level" => self.do_level(rest),
            "stat" => self.do_stat(rest),
            "check" => self.do_check(rest),
            "mastery" => self.do_mastery(rest),
            "equip" => self.do_equip(rest),
            "weapon" => self.do_weapon(rest),
            "sheet" => Ok(self.render_sheet()),
            "log" => Ok(render_log(self.sheet_history(), "No checks rolled yet.")),
            "clearlog" => {
                self.clear_sheet_history();
                Ok(crate::session::HISTORY_CLEARED.to_string())
            }
            "reset" => self.do_reset(),
            "status" => Ok(self.render_status()),
            "help" => Ok(help_text(rest)),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(SessionError::UnknownCommand(cmd)),
        }
    }

    fn pool_line(&self) -> String {
        match rf_mechanics::formula(self.pool(), self.modifier()) {
            Some(f) => format!("To roll: {f}"),
            None => "To roll: nothing selected".to_string(),
        }
    }

    fn do_add(&mut self, rest: &str) -> SessionResult<String> {
        let face = parse_face(rest)?;
        self.increment_die(face);
        Ok(self.pool_line())
    }

    fn do_remove(&mut self, rest: &str) -> SessionResult<String> {
        let face = parse_face(rest)?;
        self.decrement_die(face);
        Ok(self.pool_line())
    }

    fn do_set(&mut self, rest: &str) -> SessionResult<String> {
        let (face, qty) = rest.split_once(' ').ok_or_else(|| {
            SessionError::InvalidArgument("usage: set <die> <count>".to_string())
        })?;
        let face = parse_face(face)?;
        let qty: i64 = qty.trim().parse().map_err(|_| {
            SessionError::InvalidArgument(format!("not a count: '{}'", qty.trim()))
        })?;
        self.set_quantity(face, qty);
        Ok(self.pool_line())
    }

    fn do_modifier(&mut self, rest: &str) -> SessionResult<String> {
        if rest.is_empty() {
            return Err(SessionError::InvalidArgument(
                "usage: mod <+n|-n|n>".to_string(),
            ));
        }
        match Amount::parse(rest)? {
            Amount::Step(delta) => {
                self.adjust_modifier(delta);
            }
            Amount::Set(value) => self.set_modifier(value),
        }
        Ok(self.pool_line())
    }

    fn do_roll(&mut self) -> SessionResult<String> {
        let result = self.roll()?;
        Ok(render_roll(&result))
    }

    fn do_strike(&mut self, rest: &str) -> SessionResult<String> {
        let strike = rest
            .parse::<u32>()
            .ok()
            .and_then(Strike::from_number)
            .ok_or_else(|| SessionError::InvalidArgument("usage: strike <1|2|3>".to_string()))?;
        let result = self.roll_strike(strike)?;
        Ok(render_roll(&result))
    }

    fn do_level(&mut self, rest: &str) -> SessionResult<String> {
        if rest.is_empty() {
            return Ok(format!("Level {}", self.sheet().level));
        }
        match Amount::parse(rest)? {
            Amount::Step(delta) => {
                self.adjust_level(delta);
            }
            Amount::Set(value) => self.set_level(value),
        }
        Ok(format!("Level {}", self.sheet().level))
    }

    fn do_stat(&mut self, rest: &str) -> SessionResult<String> {
        let (name, amount) = rest.split_once(' ').ok_or_else(|| {
            SessionError::InvalidArgument("usage: stat <ability> <+n|-n|n>".to_string())
        })?;
        let ability = parse_ability(name)?;
        match Amount::parse(amount)? {
            Amount::Step(delta) => {
                self.adjust_ability(ability, delta);
            }
            Amount::Set(value) => self.set_ability(ability, value),
        }
        let score = self.sheet().abilities.get(ability);
        Ok(format!(
            "{} {}",
            ability.abbreviation(),
            format_signed(i64::from(score))
        ))
    }

    fn do_check(&mut self, rest: &str) -> SessionResult<String> {
        let kind = parse_check(rest)?;
        let result = self.roll_check(kind);
        Ok(format!("{}: {}", kind.label(), render_roll(&result)))
    }

    fn do_mastery(&mut self, rest: &str) -> SessionResult<String> {
        let kind = parse_check(rest)?;
        let rank = self.cycle_mastery(kind);
        Ok(format!(
            "{}: {} ({})",
            kind.label(),
            rank,
            format_signed(i64::from(self.modifier_for(kind)))
        ))
    }

    fn do_equip(&mut self, rest: &str) -> SessionResult<String> {
        let (target, amount) = rest.rsplit_once(' ').ok_or_else(|| {
            SessionError::InvalidArgument("usage: equip <check> <+n|-n>".to_string())
        })?;
        let kind = parse_check(target)?;
        let delta = match Amount::parse(amount)? {
            Amount::Step(delta) => delta,
            Amount::Set(value) => value - self.sheet().profile(kind).equipment_bonus,
        };
        let bonus = self.adjust_equipment_bonus(kind, delta);
        Ok(format!(
            "{}: equipment {} ({})",
            kind.label(),
            format_signed(i64::from(bonus)),
            format_signed(i64::from(self.modifier_for(kind)))
        ))
    }

    fn do_weapon(&mut self, rest: &str) -> SessionResult<String> {
        let slot = rest
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(AttackSlot::new)
            .ok_or_else(|| {
                SessionError::InvalidArgument(format!(
                    "usage: weapon <1-{}>",
                    AttackSlot::COUNT
                ))
            })?;
        let ability = self.cycle_attack_ability(slot);
        Ok(format!("{}: {}", slot.label(), ability.abbreviation()))
    }

    fn do_reset(&mut self) -> SessionResult<String> {
        match self.request_reset() {
            ResetOutcome::Armed { .. } => Ok(crate::session::RESET_ARMED.to_string()),
            ResetOutcome::Confirmed => Ok(crate::session::RESET_DONE.to_string()),
        }
    }

    fn render_sheet(&self) -> String {
        let sheet = self.sheet();
        let mut out = format!("Level {}\n", sheet.level);
        let scores: Vec<String> = sheet
            .abilities
            .iter()
            .map(|(a, v)| format!("{} {}", a.abbreviation(), format_signed(i64::from(v))))
            .collect();
        out.push_str(&scores.join("  "));
        out.push('\n');
        for row in self.check_rows() {
            out.push_str(&format!(
                "  {:<14} {} {} {:>3}  {:>3}\n",
                row.label,
                row.ability.abbreviation(),
                row.mastery.abbreviation(),
                format_signed(i64::from(row.equipment_bonus)),
                format_signed(i64::from(row.modifier)),
            ));
        }
        out.trim_end().to_string()
    }

    fn render_status(&self) -> String {
        let mut out = format!("{}\n", self.pool_line());
        let opts = self.attack_options();
        out.push_str(&format!(
            "Agile: {}  Sweep: {}\n",
            on_off(opts.agile),
            on_off(opts.sweep)
        ));
        match self.last_roll() {
            Some(r) => out.push_str(&format!("Last roll: {r}\n")),
            None => out.push_str("Last roll: none\n"),
        }
        out.push_str(&format!(
            "Dice history: {}/{}\n",
            self.dice_history().len(),
            self.dice_history().capacity()
        ));
        out.push_str(&format!(
            "Character log: {}/{}\n",
            self.sheet_history().len(),
            self.sheet_history().capacity()
        ));
        match self.reset_state() {
            ResetState::Idle => out.push_str("Reset: idle"),
            ResetState::PendingConfirm { .. } => out.push_str("Reset: awaiting confirmation"),
        }
        out
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn parse_face(s: &str) -> SessionResult<DieFace> {
    DieFace::from_str_tag(s)
        .ok_or_else(|| SessionError::InvalidArgument(format!("unknown die: '{}'", s.trim())))
}

fn parse_ability(s: &str) -> SessionResult<Ability> {
    Ability::parse(s)
        .ok_or_else(|| SessionError::InvalidArgument(format!("unknown ability: '{}'", s.trim())))
}

fn parse_check(s: &str) -> SessionResult<CheckKind> {
    CheckKind::parse(s)
        .ok_or_else(|| SessionError::InvalidArgument(format!("unknown check: '{}'", s.trim())))
}

fn render_roll(result: &RollResult) -> String {
    let mut out = result.to_string();
    for line in result.breakdown_lines() {
        out.push_str(&format!("\n  {line}"));
    }
    for roll in &result.rolls {
        match roll.critical() {
            Some(Critical::Success) => out.push_str("\n  Natural 20!"),
            Some(Critical::Failure) => out.push_str("\n  Natural 1!"),
            None => {}
        }
    }
    out
}

fn render_log(log: &HistoryLog, empty: &str) -> String {
    if log.is_empty() {
        return empty.to_string();
    }
    let mut out = String::new();
    for entry in log.entries() {
        let marker = if entry.is_new { '*' } else { ' ' };
        out.push_str(&format!(
            "{marker} {}  {}\n",
            entry.timestamp.format("%H:%M:%S"),
            entry.summary()
        ));
    }
    out.trim_end().to_string()
}

fn help_text(topic: &str) -> String {
    match topic.to_lowercase().as_str() {
        "dice" | "roll" => "\
Dice Commands:
  add <die>                     Add one die (d4, d6, d8, d10, d12, d20, d100)
  remove <die>                  Remove one die
  set <die> <n>                 Set how many of a die
  mod <+n|-n|n>                 Step or set the modifier
  clear                         Clear dice, modifier and traits
  roll                          Roll the selection
  strike <1|2|3>                Roll with the multiple attack penalty
  agile | sweep                 Toggle weapon traits
  history                       Show recent rolls"
            .to_string(),
        "sheet" | "character" => "\
Character Commands:
  level <+n|-n|n>               Step or set the level (1-20)
  stat <ability> <+n|-n|n>      Step or set an ability (-5 to +5)
  check <target>                Roll d20 + modifier
  mastery <target>              Cycle mastery U/T/E/M/L
  equip <target> <+n|-n|n>      Step or set the equipment bonus
  weapon <1-6>                  Toggle an attack between STR and DEX
  sheet                         Show the character sheet
  log                           Show recent checks
  clearlog                      Clear the check log
  reset                         Reset the sheet (press twice)

Targets: perception, fortitude, reflex, will, a skill name, attack1-attack6"
            .to_string(),
        _ => "\
Rollfinder Commands:
  add | remove | set            Edit the dice selection
  mod <+n|-n|n>                 Free modifier
  roll | strike <n>             Roll the selection
  agile | sweep                 Toggle weapon traits
  history                       Show recent rolls
  level | stat | mastery        Edit the character sheet
  equip | weapon                Edit gear and attacks
  check <target>                Roll a check
  sheet | log | clearlog        Show the sheet or its log
  reset                         Reset the sheet (press twice)
  status                        Show session status
  help [dice|sheet]             Show help
  quit                          Exit"
            .to_string(),
    }
}
