//! Command-line interface for digitguess.

use clap::{Parser, Subcommand};

/// Digitguess - four-digit guessing game with a SQLite leaderboard
#[derive(Parser, Debug)]
#[command(name = "digitguess")]
#[command(about = "Guess the 4-digit number with no duplicate digits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the game in the terminal
    Play {
        /// Path to the leaderboard database (created if it doesn't exist)
        #[arg(long, default_value = "digitguess.db")]
        db_path: String,

        /// Skip score saving and the leaderboard even if the database works
        #[arg(long)]
        no_scores: bool,
    },

    /// Show the leaderboard
    Leaderboard {
        /// Path to the leaderboard database
        #[arg(long, default_value = "digitguess.db")]
        db_path: String,

        /// Number of entries to show
        #[arg(short, long, default_value = "5")]
        limit: i64,

        /// Print entries as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
