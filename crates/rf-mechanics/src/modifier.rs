//! Modifier math shared by saves, skills, perception, and attacks.

use crate::character::MasteryRank;

/// Sum an ability score, mastery bonus, level and equipment bonus.
///
/// No clamping or rounding is applied; the result may be negative.
pub fn compute_modifier(
    ability_score: i32,
    mastery: MasteryRank,
    level: i32,
    equipment_bonus: i32,
) -> i32 {
    ability_score + mastery.bonus() + level + equipment_bonus
}

/// Render a value with an explicit sign: `+3`, `-2`, `+0`.
pub fn format_signed(value: i64) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}
