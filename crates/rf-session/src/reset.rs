//! Two-step confirmation guarding the character-sheet reset.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Whether a reset is waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResetState {
    /// No reset requested.
    #[default]
    Idle,
    /// A first request was made; a second one before `expires_at` confirms.
    PendingConfirm {
        /// When the request lapses.
        expires_at: DateTime<Utc>,
    },
}

/// What a reset request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// First request: nothing was reset, confirmation is now pending.
    Armed {
        /// When the pending request lapses.
        expires_at: DateTime<Utc>,
    },
    /// Second request inside the window: the caller must perform the reset.
    Confirmed,
}

/// Timed double-confirmation state machine.
#[derive(Debug, Clone)]
pub struct ResetConfirmation {
    state: ResetState,
    window: TimeDelta,
}

impl ResetConfirmation {
    /// A machine in `Idle` that waits `window` for confirmation.
    pub fn new(window: TimeDelta) -> Self {
        Self {
            state: ResetState::Idle,
            window,
        }
    }

    /// Handle a reset request at `now`.
    ///
    /// A request while pending and before expiry confirms; any other request
    /// (re)arms the window, replacing an earlier deadline.
    pub fn request(&mut self, now: DateTime<Utc>) -> ResetOutcome {
        match self.state {
            ResetState::PendingConfirm { expires_at } if now < expires_at => {
                self.state = ResetState::Idle;
                tracing::debug!("reset confirmed");
                ResetOutcome::Confirmed
            }
            _ => {
                let expires_at = now + self.window;
                self.state = ResetState::PendingConfirm { expires_at };
                tracing::debug!(%expires_at, "reset armed");
                ResetOutcome::Armed { expires_at }
            }
        }
    }

    /// Lapse a pending request whose window has passed. Returns whether it did.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match self.state {
            ResetState::PendingConfirm { expires_at } if now >= expires_at => {
                self.state = ResetState::Idle;
                tracing::debug!("reset request expired");
                true
            }
            _ => false,
        }
    }

    /// Drop any pending request without acting on it.
    pub fn cancel(&mut self) {
        self.state = ResetState::Idle;
    }

    /// Current state.
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// When the pending request lapses, if one is pending.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        match self.state {
            ResetState::PendingConfirm { expires_at } => Some(expires_at),
            ResetState::Idle => None,
        }
    }
}
