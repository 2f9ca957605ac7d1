//! CLI frontend for the Rollfinder dice roller and character companion.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "rollfinder",
    about = "Rollfinder: dice roller and character sheet companion",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice formula such as "2d6 + 1d20 + 3"
    Roll {
        /// Dice formula
        formula: String,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute a check modifier from its parts
    Modifier {
        /// Ability score (-5 to +5)
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        score: i32,

        /// Mastery rank: untrained, trained, expert, master, legendary (or U/T/E/M/L)
        #[arg(short, long, default_value = "untrained")]
        mastery: String,

        /// Character level
        #[arg(short, long, default_value = "1")]
        level: i32,

        /// Equipment bonus
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        equip: i32,
    },

    /// Show the check tables and mastery bonuses
    Tables,

    /// Start an interactive dice and character session
    Play {
        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// How many dice rolls to keep in history
        #[arg(long, default_value = "5")]
        history: usize,

        /// How many checks to keep in the character log
        #[arg(long, default_value = "10")]
        sheet_history: usize,

        /// Disable the roll sound
        #[arg(long)]
        mute: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            formula,
            seed,
            json,
        } => commands::roll::run(&formula, seed, json),
        Commands::Modifier {
            score,
            mastery,
            level,
            equip,
        } => commands::modifier::run(score, &mastery, level, equip),
        Commands::Tables => commands::tables::run(),
        Commands::Play {
            seed,
            history,
            sheet_history,
            mute,
        } => commands::play::run(seed, history, sheet_history, mute),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
