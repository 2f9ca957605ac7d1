//! Session state for the Rollfinder dice roller and character sheet.
//!
//! Owns the bounded roll-history logs with their freshness highlight, the
//! two-step reset confirmation, the transient toast notifier, and the
//! [`Session`] that ties them to the mechanics engine. All timing goes
//! through an injectable [`Clock`], so tests advance a [`ManualClock`]
//! instead of sleeping.

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod history;
pub mod reset;
pub mod session;
pub mod snapshot;
pub mod sound;
pub mod timer;
pub mod toast;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use history::{HistoryEntry, HistoryLog};
pub use reset::{ResetConfirmation, ResetOutcome, ResetState};
pub use session::Session;
pub use snapshot::{CheckRow, SessionSnapshot};
pub use sound::{Silent, SoundPlayer};
pub use timer::Scheduler;
pub use toast::{Toast, ToastNotifier, ToastPhase, ToastTiming};
