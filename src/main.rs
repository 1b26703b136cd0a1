use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "study-progress")]
#[command(about = "Track learner XP, levels, study streaks and badges")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.study-progress/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the progress database (overrides storage.db_path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Grant experience points
    Grant {
        user: String,
        #[arg(allow_negative_numbers = true)]
        points: i64,
    },

    /// Record a streak-qualifying activity (e.g. a login)
    Activity {
        user: String,
        /// Activity day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record a study session in minutes
    Study {
        user: String,
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
        /// Session day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record a completed quiz worth some XP
    Quiz {
        user: String,
        #[arg(allow_negative_numbers = true)]
        points: i64,
        /// Quiz day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Award a badge
    Badge { user: String, badge: String },

    /// Show a user's progress
    Stats {
        user: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let open = || cli::Context::open(cli.config.as_deref(), cli.db.as_deref());

    match cli.command {
        Commands::Init { force } => {
            cli::init::init_command(cli.config.as_deref(), force)?;
        }
        Commands::Grant { user, points } => {
            cli::record::grant_command(&open()?, &user, points)?;
        }
        Commands::Activity { user, date } => {
            cli::record::activity_command(&open()?, &user, date)?;
        }
        Commands::Study {
            user,
            minutes,
            date,
        } => {
            cli::record::study_command(&open()?, &user, minutes, date)?;
        }
        Commands::Quiz { user, points, date } => {
            cli::record::quiz_command(&open()?, &user, points, date)?;
        }
        Commands::Badge { user, badge } => {
            cli::record::badge_command(&open()?, &user, &badge)?;
        }
        Commands::Stats { user, json } => {
            cli::stats::stats_command(&open()?, &user, json)?;
        }
    }

    Ok(())
}
