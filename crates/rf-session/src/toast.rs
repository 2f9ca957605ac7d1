//! Transient status messages.
//!
//! A toast fades in, lingers, fades out and then dismisses itself. Showing a
//! new message cancels whatever is left of the previous one.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::timer::Scheduler;

/// Durations of the toast choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    /// Fade/slide in.
    pub fade_in: TimeDelta,
    /// Fully visible.
    pub linger: TimeDelta,
    /// Fade out before dismissal.
    pub fade_out: TimeDelta,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            fade_in: TimeDelta::milliseconds(200),
            linger: TimeDelta::milliseconds(2000),
            fade_out: TimeDelta::milliseconds(280),
        }
    }
}

impl ToastTiming {
    /// Time from `show` to automatic dismissal.
    pub fn total(&self) -> TimeDelta {
        self.fade_in + self.linger + self.fade_out
    }
}

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    /// Fading in.
    Entering,
    /// Fully visible.
    Visible,
    /// Fading out.
    Leaving,
}

/// The message currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Message text.
    pub message: String,
    /// Current phase.
    pub phase: ToastPhase,
    /// When it was shown.
    pub shown_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Visible,
    Leaving,
    Dismissed,
}

/// Shows one toast at a time and retires it on schedule.
#[derive(Debug, Clone, Default)]
pub struct ToastNotifier {
    timing: ToastTiming,
    current: Option<Toast>,
    timers: Scheduler<Stage>,
}

impl ToastNotifier {
    /// A notifier with the given choreography.
    pub fn new(timing: ToastTiming) -> Self {
        Self {
            timing,
            current: None,
            timers: Scheduler::new(),
        }
    }

    /// Show `message`, replacing any toast still on screen.
    pub fn show(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        let message = message.into();
        if let Some(old) = &self.current {
            tracing::debug!(old = %old.message, new = %message, "toast superseded");
        }
        self.timers.clear();
        self.timers.schedule(Stage::Visible, now + self.timing.fade_in);
        self.timers
            .schedule(Stage::Leaving, now + self.timing.fade_in + self.timing.linger);
        self.timers.schedule(Stage::Dismissed, now + self.timing.total());
        self.current = Some(Toast {
            message,
            phase: ToastPhase::Entering,
            shown_at: now,
        });
    }

    /// Advance the choreography to `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for stage in self.timers.due(now) {
            match stage {
                Stage::Visible => self.set_phase(ToastPhase::Visible),
                Stage::Leaving => self.set_phase(ToastPhase::Leaving),
                Stage::Dismissed => self.current = None,
            }
        }
    }

    /// Remove the toast immediately.
    pub fn dismiss(&mut self) {
        self.timers.clear();
        self.current = None;
    }

    /// The toast on screen, if any.
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// When the next phase change happens.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_deadline()
    }

    fn set_phase(&mut self, phase: ToastPhase) {
        if let Some(toast) = &mut self.current {
            toast.phase = phase;
        }
    }
}
