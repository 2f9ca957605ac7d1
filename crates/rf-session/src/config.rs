//! Configuration for a session.

use chrono::TimeDelta;

use crate::toast::ToastTiming;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls; OS entropy when `None`.
    pub seed: Option<u64>,
    /// How many free-roll entries the dice history keeps.
    pub dice_history_capacity: usize,
    /// How many check entries the character-sheet log keeps.
    pub sheet_history_capacity: usize,
    /// How long the newest history entry stays highlighted.
    pub freshness_window: TimeDelta,
    /// How long a first reset request waits for confirmation.
    pub reset_window: TimeDelta,
    /// Toast choreography.
    pub toast: ToastTiming,
    /// Whether a successful roll plays a sound.
    pub sound_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dice_history_capacity: 5,
            sheet_history_capacity: 10,
            freshness_window: TimeDelta::milliseconds(750),
            reset_window: TimeDelta::milliseconds(3000),
            toast: ToastTiming::default(),
            sound_enabled: true,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the dice history bound (at least 1).
    pub fn with_dice_history(mut self, capacity: usize) -> Self {
        self.dice_history_capacity = capacity.max(1);
        self
    }

    /// Set the character-sheet log bound (at least 1).
    pub fn with_sheet_history(mut self, capacity: usize) -> Self {
        self.sheet_history_capacity = capacity.max(1);
        self
    }

    /// Enable or disable roll sounds.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Set the freshness highlight window.
    pub fn with_freshness_window(mut self, window: TimeDelta) -> Self {
        self.freshness_window = window;
        self
    }

    /// Set the reset confirmation window.
    pub fn with_reset_window(mut self, window: TimeDelta) -> Self {
        self.reset_window = window;
        self
    }
}
