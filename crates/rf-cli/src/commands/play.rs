use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use colored::Colorize;

use rf_session::{Session, SessionConfig, SessionError, SessionResult, SoundPlayer};

/// Rings the terminal bell on stderr.
struct BellSound;

impl SoundPlayer for BellSound {
    fn play(&self) -> SessionResult<()> {
        let mut err = io::stderr();
        err.write_all(b"\x07")
            .and_then(|()| err.flush())
            .map_err(|e| SessionError::Sound(e.to_string()))
    }
}

pub fn run(
    seed: Option<u64>,
    history: usize,
    sheet_history: usize,
    mute: bool,
) -> Result<(), String> {
    let mut config = SessionConfig::default()
        .with_dice_history(history)
        .with_sheet_history(sheet_history)
        .with_sound(!mute);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut session = Session::new(config);
    session.set_sound_player(Box::new(BellSound));

    println!("  {} Rollfinder session", "Starting".bold());
    match seed {
        Some(seed) => println!("  Seed: {seed} | Sound: {}", if mute { "off" } else { "on" }),
        None => println!("  Sound: {}", if mute { "off" } else { "on" }),
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    let mut seen_toast: Option<DateTime<Utc>> = None;

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}", e.to_string().yellow());
            }
        }

        // Announce a toast once, when it first appears.
        if let Some(toast) = session.toast()
            && seen_toast != Some(toast.shown_at)
        {
            seen_toast = Some(toast.shown_at);
            println!("  {}", toast.message.cyan());
        }
        println!();
    }

    tracing::debug!(
        dice = session.dice_history().len(),
        checks = session.sheet_history().len(),
        "session ended"
    );
    Ok(())
}
