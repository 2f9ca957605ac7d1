//! Executing a pool and modifier into a [`RollResult`].

use super::pool::DicePool;
use super::random::RandomSource;
use super::roll::{DetailedRoll, RollResult};
use super::DieFace;
use crate::error::{MechError, MechResult};

/// Build the canonical formula for a pool and modifier.
///
/// Dice terms come in ascending face order joined by `" + "`. A non-zero
/// modifier is appended as `" + 3"` or `" - 3"`, or stands alone as `"+3"`
/// or `"-3"` when there are no dice. Returns `None` when there is nothing
/// to roll.
pub fn formula(pool: &DicePool, modifier: i32) -> Option<String> {
    let dice = pool.terms().join(" + ");
    match (dice.is_empty(), modifier) {
        (true, 0) => None,
        (false, 0) => Some(dice),
        (true, m) if m > 0 => Some(format!("+{m}")),
        (true, m) => Some(m.to_string()),
        (false, m) if m > 0 => Some(format!("{dice} + {m}")),
        (false, m) => Some(format!("{dice} - {}", m.unsigned_abs())),
    }
}

/// Roll every die in `pool` and add `modifier`.
///
/// Fails with [`MechError::NothingToRoll`] when the pool is empty and the
/// modifier is zero.
pub fn roll<R: RandomSource + ?Sized>(
    pool: &DicePool,
    modifier: i32,
    rng: &mut R,
) -> MechResult<RollResult> {
    let formula = formula(pool, modifier).ok_or(MechError::NothingToRoll)?;

    let mut rolls = Vec::new();
    for (face, qty) in pool.iter() {
        for _ in 0..qty {
            rolls.push(DetailedRoll {
                face,
                value: rng.roll(face),
            });
        }
    }

    let total = rolls.iter().map(|r| i64::from(r.value)).sum::<i64>() + i64::from(modifier);
    tracing::debug!(%formula, total, dice = rolls.len(), "rolled pool");

    Ok(RollResult {
        total,
        rolls,
        modifier,
        formula,
    })
}

/// Roll a single d20 and add `modifier`, as for a character check.
pub fn roll_d20<R: RandomSource + ?Sized>(modifier: i32, rng: &mut R) -> RollResult {
    let pool = DicePool::new().with(DieFace::D20, 1);
    let value = rng.roll(DieFace::D20);
    let formula = formula(&pool, modifier).unwrap_or_else(|| "1d20".to_string());
    RollResult {
        total: i64::from(value) + i64::from(modifier),
        rolls: vec![DetailedRoll {
            face: DieFace::D20,
            value,
        }],
        modifier,
        formula,
    }
}
