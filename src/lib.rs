//! Digitguess library - four-digit guessing game core
//!
//! The player guesses a secret 4-digit number with all-distinct digits and
//! receives `'+'`/`'-'` feedback per guess; won rounds can be persisted to a
//! SQLite leaderboard.
//!
//! # Architecture
//!
//! - **Game**: secret generation, guess evaluation, and a caller-owned
//!   session state machine that returns effects instead of performing them
//! - **Score**: the score formula and the store-agnostic [`ScoreStore`] trait
//! - **Db**: diesel/SQLite [`ScoreRepository`] implementing [`ScoreStore`]
//!
//! # Example
//!
//! ```
//! use digitguess::{Action, GameSession, Outcome, Phase};
//!
//! let mut session = GameSession::new();
//! session.apply(Action::Start)?;
//! session.apply(Action::SubmitName("Alice".to_string()))?;
//! assert_eq!(session.phase(), Phase::Active);
//!
//! match session.apply(Action::SubmitGuess("0123".to_string()))? {
//!     Outcome::Feedback(record) => println!("{}", record.result),
//!     Outcome::Won { summary, .. } => println!("won with score {}", summary.score()),
//!     _ => unreachable!(),
//! }
//! # Ok::<(), digitguess::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod db;
mod game;
mod score;

// Crate-level exports - Game core
pub use game::{
    Action, DIGIT_COUNT, GameError, GameSession, Guess, GuessError, GuessRecord, GuessResult,
    Outcome, Phase, RevealFrames, SecretNumber, evaluate,
};

// Crate-level exports - Scoring and the storage boundary
pub use score::{RoundSummary, ScoreEntry, ScoreStore, StoreError, compute_score};

// Crate-level exports - Diesel-backed store
pub use db::{NewScore, ScoreRepository, ScoreRow};
