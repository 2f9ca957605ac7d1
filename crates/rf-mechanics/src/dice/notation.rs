//! Parsing formula text such as `"2d6 + 1d20 - 3"` back into a pool.

use super::DieFace;
use super::pool::DicePool;
use crate::error::{MechError, MechResult};

/// Parse a dice formula into a pool and a flat modifier.
///
/// Terms are separated by `+` or `-`. A dice term is `NdF` or `dF` where `F`
/// is one of the supported faces; repeated faces accumulate. Numeric terms
/// add to the modifier. Dice cannot be subtracted.
pub fn parse_formula(input: &str) -> MechResult<(DicePool, i32)> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(MechError::notation(input, "empty formula"));
    }

    let mut pool = DicePool::new();
    let mut modifier: i32 = 0;

    for (negative, term) in split_terms(&compact) {
        if term.is_empty() {
            return Err(MechError::notation(input, "missing term"));
        }

        let lower = term.to_lowercase();
        if let Some((count, face)) = lower.split_once('d') {
            if negative {
                return Err(MechError::notation(input, "dice cannot be subtracted"));
            }
            let count: u32 = if count.is_empty() {
                1
            } else {
                count
                    .parse()
                    .map_err(|_| MechError::notation(input, format!("bad dice count in '{term}'")))?
            };
            let face = face
                .parse()
                .ok()
                .and_then(DieFace::from_sides)
                .ok_or_else(|| MechError::notation(input, format!("unsupported die 'd{face}'")))?;
            let qty = i64::from(pool.quantity(face)) + i64::from(count);
            pool.set_quantity(face, qty);
        } else {
            let value: i32 = term
                .parse()
                .map_err(|_| MechError::notation(input, format!("bad number '{term}'")))?;
            let signed = if negative { -value } else { value };
            modifier = modifier
                .checked_add(signed)
                .ok_or_else(|| MechError::notation(input, "modifier out of range"))?;
        }
    }

    Ok((pool, modifier))
}

/// Split `"2d6+3-1"` into `[(false, "2d6"), (false, "3"), (true, "1")]`.
fn split_terms(compact: &str) -> Vec<(bool, &str)> {
    let mut terms = Vec::new();
    let mut negative = false;
    let mut start = 0;
    for (i, c) in compact.char_indices() {
        if c == '+' || c == '-' {
            if i > 0 {
                terms.push((negative, &compact[start..i]));
            }
            negative = c == '-';
            start = i + 1;
        }
    }
    terms.push((negative, &compact[start..]));
    terms
}
