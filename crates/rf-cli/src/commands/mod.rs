pub mod modifier;
pub mod play;
pub mod roll;
pub mod tables;

use colored::{ColoredString, Colorize};

use rf_mechanics::{Critical, DetailedRoll, format_signed};

/// Render a signed value, green when positive and red when negative.
fn signed(value: i64) -> ColoredString {
    let text = format_signed(value);
    match value {
        v if v > 0 => text.green(),
        v if v < 0 => text.red(),
        _ => text.normal(),
    }
}

/// Render one die value, highlighting natural 20s and 1s on a d20.
fn die_value(roll: &DetailedRoll) -> ColoredString {
    let text = roll.value.to_string();
    match roll.critical() {
        Some(Critical::Success) => text.green().bold(),
        Some(Critical::Failure) => text.red().bold(),
        None => text.normal(),
    }
}
