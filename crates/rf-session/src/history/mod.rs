//! Bounded roll history with a freshness highlight.

pub mod entry;
pub mod log;

pub use entry::HistoryEntry;
pub use log::HistoryLog;
