//! Digitguess - terminal driver
//!
//! Reference UI driver for the game core: maps terminal input to session
//! actions, prints outcomes, and persists won rounds to the leaderboard when
//! the database is reachable. All cosmetic content (facts, encouragement,
//! rules text) lives here, outside the core.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use digitguess::{
    Action, GameError, GameSession, Outcome, Phase, RoundSummary, ScoreRepository, ScoreStore,
    StoreError,
};
use rand::seq::IndexedRandom;
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Delay between reveal animation frames.
const REVEAL_FRAME_DELAY: Duration = Duration::from_millis(500);

/// How many leaderboard entries to show after a round.
const LEADERBOARD_SIZE: i64 = 5;

const NUMBER_FACTS: &[&str] = &[
    "The fear of the number 13 is called triskaidekaphobia.",
    "The number 4 is considered unlucky in many East Asian cultures.",
    "Zero was invented as a number in India by mathematician Aryabhata.",
    "Pi has been calculated to over 31 trillion digits.",
    "The most common lucky number across cultures is 7.",
    "All odd numbers have the letter 'e' in their spelling in English.",
    "A googol is the number 1 followed by 100 zeros.",
    "123454321 is a palindromic number that forms a pyramid shape when written in sequence.",
    "The Golden Ratio (approximately 1.618) appears frequently in nature.",
];

const ENCOURAGEMENTS: &[&str] = &[
    "You're getting closer!",
    "Keep going!",
    "You've got this!",
    "Almost there!",
    "Don't give up now!",
    "You're doing great!",
    "One step closer!",
    "Your next guess could be it!",
    "Keep those digits coming!",
];

const RULES: &str = "\
Rules:
  1. A random 4-digit number with no duplicate digits has been chosen.
  2. Guess it in as few attempts as possible.
  3. After each guess: '+' means a digit is correct and in the right
     position, '-' means it is in the number but in the wrong position.
  4. Example: secret 1234, guess 1672 -> '+-'.
  5. Score = guesses * 10 + seconds / 5. Lower is better.
Commands: a 4-digit guess, 'giveup', 'fact', 'rules', or 'quit'.";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play { db_path, no_scores } => run_play(&db_path, no_scores),
        Command::Leaderboard {
            db_path,
            limit,
            json,
        } => run_leaderboard(&db_path, limit, json),
    }
}

/// Opens the leaderboard store, applying pending migrations.
///
/// Returns `None` when the database is unreachable: gameplay continues
/// without score saving and the leaderboard view degrades.
fn open_store(db_path: &str) -> Option<ScoreRepository> {
    let result = SqliteConnection::establish(db_path)
        .map_err(StoreError::from)
        .and_then(|mut conn| {
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| StoreError::new(format!("Migrations failed: {e}")))?;
            ScoreRepository::new(db_path.to_string())
        });

    match result {
        Ok(repo) => Some(repo),
        Err(e) => {
            warn!(error = %e, path = %db_path, "Leaderboard unavailable, running without scores");
            println!("Leaderboard unavailable ({e}). Playing without score saving.");
            None
        }
    }
}

/// Runs interactive rounds until the player quits.
fn run_play(db_path: &str, no_scores: bool) -> Result<()> {
    let store = if no_scores { None } else { open_store(db_path) };
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    println!("Guessing Number Game");
    println!("Fun fact: {}", random_line(NUMBER_FACTS));
    println!();

    loop {
        let mut session = GameSession::new();
        apply_expect(&mut session, Action::Start)?;

        // Name entry: retry until a non-empty name is accepted.
        loop {
            let name = prompt(&mut input, "Enter your name: ")?;
            match session.apply(Action::SubmitName(name)) {
                Ok(Outcome::RoundStarted { player }) => {
                    println!("Good luck, {player}! {RULES}");
                    break;
                }
                Ok(outcome) => warn!(?outcome, "Unexpected outcome during name entry"),
                Err(e) => println!("{e}"),
            }
        }

        run_round(&mut session, &mut input, store.as_ref())?;

        if session.phase() != Phase::Idle {
            apply_expect(&mut session, Action::PlayAgain)?;
        }
        if let Some(store) = store.as_ref() {
            print_leaderboard(store, LEADERBOARD_SIZE);
        }

        let again = prompt(&mut input, "Play again? (y/n): ")?;
        if !again.trim().eq_ignore_ascii_case("y") {
            println!("Thanks for playing!");
            return Ok(());
        }
    }
}

/// Drives one round from first guess to win, forfeit, or quit.
fn run_round(
    session: &mut GameSession,
    input: &mut impl BufRead,
    store: Option<&ScoreRepository>,
) -> Result<()> {
    while session.phase() == Phase::Active {
        let line = prompt(input, "Your guess: ")?;
        let trimmed = line.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "quit" | "q" => {
                println!("Thanks for playing!");
                std::process::exit(0);
            }
            "fact" => {
                println!("Fun fact: {}", random_line(NUMBER_FACTS));
                continue;
            }
            "rules" => {
                println!("{RULES}");
                continue;
            }
            "giveup" | "give up" => {
                run_reveal(session)?;
                return Ok(());
            }
            _ => {}
        }

        match session.apply(Action::SubmitGuess(trimmed.to_string())) {
            Ok(Outcome::Feedback(record)) => {
                println!(
                    "Guess {}: {}  ->  {}",
                    record.guess_number, record.guess, record.result
                );
                if record.guess_number % 3 == 0 {
                    println!("{}", random_line(ENCOURAGEMENTS));
                }
            }
            Ok(Outcome::Won { record, summary }) => {
                println!(
                    "Congratulations! You guessed the number in {} attempts.",
                    record.guess_number
                );
                println!(
                    "Time taken: {:.2} seconds. Score: {:.2} (lower is better).",
                    summary.time_taken(),
                    summary.score()
                );
                save_score(store, &summary);
                return Ok(());
            }
            Ok(outcome) => warn!(?outcome, "Unexpected outcome for a guess"),
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

/// Plays the reveal animation to completion.
fn run_reveal(session: &mut GameSession) -> Result<()> {
    println!("Revealing the secret number...");
    match apply_expect(session, Action::GiveUp)? {
        Outcome::RevealFrame(frame) => println!("  {frame}"),
        outcome => warn!(?outcome, "Unexpected outcome starting reveal"),
    }

    loop {
        std::thread::sleep(REVEAL_FRAME_DELAY);
        match apply_expect(session, Action::AdvanceReveal)? {
            Outcome::RevealFrame(frame) => println!("  {frame}"),
            Outcome::RevealDone { secret } => {
                println!("The secret number was: {secret}");
                return Ok(());
            }
            outcome => warn!(?outcome, "Unexpected outcome during reveal"),
        }
    }
}

/// Persists a won round, degrading gracefully when the store fails.
fn save_score(store: Option<&ScoreRepository>, summary: &RoundSummary) {
    let Some(store) = store else {
        info!("No store configured, score dropped");
        return;
    };
    match store.insert_score(summary) {
        Ok(entry) => info!(player = %entry.name(), score = entry.score(), "Score saved"),
        Err(e) => {
            warn!(error = %e, "Failed to save score, continuing without it");
            println!("Could not save your score ({e}).");
        }
    }
}

fn print_leaderboard(store: &ScoreRepository, limit: i64) {
    match store.top_scores(limit) {
        Ok(entries) if entries.is_empty() => {
            println!("No scores yet. Be the first on the leaderboard!");
        }
        Ok(entries) => {
            println!("Leaderboard - top {} scores:", entries.len());
            for (rank, entry) in entries.iter().enumerate() {
                println!(
                    "  {}. {} - {} guesses, {:.2}s, score {:.2}",
                    rank + 1,
                    entry.name(),
                    entry.guesses(),
                    entry.time_taken(),
                    entry.score()
                );
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to load leaderboard");
            println!("Leaderboard unavailable ({e}).");
        }
    }
}

/// Shows the leaderboard and exits.
fn run_leaderboard(db_path: &str, limit: i64, json: bool) -> Result<()> {
    let Some(store) = open_store(db_path) else {
        println!("Leaderboard unavailable.");
        return Ok(());
    };
    if json {
        let entries = store.top_scores(limit)?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_leaderboard(&store, limit);
    }
    Ok(())
}

/// Applies an action the driver knows to be valid in the current phase.
fn apply_expect(session: &mut GameSession, action: Action) -> Result<Outcome, GameError> {
    session.apply(action).inspect_err(|e| {
        warn!(error = %e, "Driver sent an inapplicable action");
    })
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

fn random_line(lines: &'static [&'static str]) -> &'static str {
    lines
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Numbers are fun.")
}
