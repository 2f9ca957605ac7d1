//! Multiple attack penalty for strikes rolled from the dice pool.

use serde::{Deserialize, Serialize};

/// Which strike of the turn is being rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strike {
    /// First strike; no penalty.
    First,
    /// Second strike.
    Second,
    /// Third and later strikes.
    Third,
}

impl Strike {
    /// Strike for a 1-based number; anything past three counts as third.
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            0 => None,
            1 => Some(Self::First),
            2 => Some(Self::Second),
            _ => Some(Self::Third),
        }
    }
}

/// Weapon traits that soften the multiple attack penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOptions {
    /// Agile weapons take -4/-8 instead of -5/-10.
    pub agile: bool,
    /// Sweep grants +1 on follow-up strikes.
    pub sweep: bool,
}

impl AttackOptions {
    /// The penalty added to the modifier for `strike`.
    pub fn penalty(self, strike: Strike) -> i32 {
        let base = match (strike, self.agile) {
            (Strike::First, _) => return 0,
            (Strike::Second, false) => -5,
            (Strike::Second, true) => -4,
            (Strike::Third, false) => -10,
            (Strike::Third, true) => -8,
        };
        if self.sweep { base + 1 } else { base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_strike_never_penalized() {
        for agile in [false, true] {
            for sweep in [false, true] {
                let opts = AttackOptions { agile, sweep };
                assert_eq!(opts.penalty(Strike::First), 0);
            }
        }
    }

    #[test]
    fn standard_penalties() {
        let opts = AttackOptions::default();
        assert_eq!(opts.penalty(Strike::Second), -5);
        assert_eq!(opts.penalty(Strike::Third), -10);
    }

    #[test]
    fn agile_and_sweep() {
        let agile = AttackOptions { agile: true, sweep: false };
        assert_eq!(agile.penalty(Strike::Second), -4);
        assert_eq!(agile.penalty(Strike::Third), -8);

        let both = AttackOptions { agile: true, sweep: true };
        assert_eq!(both.penalty(Strike::Second), -3);
        assert_eq!(both.penalty(Strike::Third), -7);

        let sweep = AttackOptions { agile: false, sweep: true };
        assert_eq!(sweep.penalty(Strike::Third), -9);
    }

    #[test]
    fn strike_numbers() {
        assert_eq!(Strike::from_number(0), None);
        assert_eq!(Strike::from_number(2), Some(Strike::Second));
        assert_eq!(Strike::from_number(5), Some(Strike::Third));
    }
}
