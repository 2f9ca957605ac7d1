//! Error types for the roll and modifier engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// The pool is empty and the modifier is zero, so there is nothing to roll.
    #[error("nothing to roll: select some dice or set a modifier")]
    NothingToRoll,

    /// A dice formula could not be parsed.
    #[error("invalid dice notation '{input}': {reason}")]
    InvalidNotation {
        /// The offending input text.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl MechError {
    pub(crate) fn notation(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNotation {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
