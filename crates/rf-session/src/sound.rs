//! Roll sound boundary.

use crate::error::SessionResult;

/// Plays the dice sound. Failures are logged by the caller and never
/// affect the roll.
pub trait SoundPlayer {
    /// Play the sound once.
    fn play(&self) -> SessionResult<()>;
}

/// A player that makes no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&self) -> SessionResult<()> {
        Ok(())
    }
}

/// Play the roll sound if enabled, swallowing failures.
pub(crate) fn play_roll_sound(player: &dyn SoundPlayer, enabled: bool) {
    if !enabled {
        return;
    }
    if let Err(e) = player.play() {
        tracing::warn!(error = %e, "failed to play roll sound");
    }
}
