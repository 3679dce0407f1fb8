//! CLI frontend for the dice engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use dice_core::{DiceConfig, Notification, Pacing, StandardDice};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(
    name = "dice",
    about = "Polyhedral dice, ability checks, and ability scores",
    version,
    propagate_version = true
)]
struct Cli {
    /// RNG seed for reproducible rolls (overrides DICE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pause briefly after each roll, for presentation
    #[arg(long, global = true)]
    pace: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print every die notification and debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll one die
    Roll {
        /// Die name (coin, d4 ... d20) or side count (default: d6)
        spec: Option<String>,
    },

    /// Roll several of the same die and print the total
    Rolls {
        /// Number of dice to roll
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Die name or side count (default: d6)
        spec: Option<String>,
    },

    /// Roll one die several times and print every result in order
    Sequence {
        /// Number of rolls
        #[arg(short = 'n', long)]
        count: u32,

        /// Die name or side count (default: d6)
        spec: Option<String>,
    },

    /// Flip the coin
    Flip,

    /// Make an ability check on the d20
    Check {
        /// Modifier added to the roll
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        modifier: i32,

        /// Difficulty class to meet or beat
        #[arg(long, allow_negative_numbers = true)]
        dc: i32,
    },

    /// Roll one ability score (best three of five d6)
    Ability,

    /// Roll a full set of six ability scores
    Abilities {
        /// Keep the set even if a score is below 12
        #[arg(long)]
        keep_low: bool,
    },

    /// List the standard dice
    Dice,
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn print_notification(notification: &Notification) {
    eprintln!("  {} {notification}", "»".dimmed());
}

/// Build the standard dice from the environment plus command-line overrides.
fn standard_dice(cli: &Cli) -> Result<StandardDice, String> {
    let mut config = DiceConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.pace {
        config = config.with_pacing(Pacing::Presentation);
    }
    tracing::debug!(?config, "building standard dice");

    let mut dice = StandardDice::new(&config).map_err(|e| e.to_string())?;
    if cli.verbose {
        dice.subscribe_all(print_notification);
    }
    Ok(dice)
}

fn run(cli: Cli) -> Result<(), String> {
    let mut dice = standard_dice(&cli)?;
    let json = cli.json;

    match cli.command {
        Commands::Roll { spec } => commands::roll::single(&mut dice, spec.as_deref(), json),
        Commands::Rolls { count, spec } => {
            commands::roll::batch(&mut dice, count, spec.as_deref(), json)
        }
        Commands::Sequence { count, spec } => {
            commands::roll::sequence(&mut dice, count, spec.as_deref(), json)
        }
        Commands::Flip => commands::roll::flip(&mut dice, json),
        Commands::Check { modifier, dc } => commands::check::run(&mut dice, modifier, dc, json),
        Commands::Ability => commands::ability::score(&mut dice, json),
        Commands::Abilities { keep_low } => commands::ability::set(&mut dice, keep_low, json),
        Commands::Dice => commands::list::run(&dice, json),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
