//! Scoring and the leaderboard storage boundary.
//!
//! The score formula and the [`ScoreStore`] trait live here so the game core
//! never depends on a specific store's client library; the diesel-backed
//! implementation is in the `db` module.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Computes the round score. Lower is better.
///
/// Formula: `guesses * 10 + elapsed_seconds / 5`.
#[instrument]
pub fn compute_score(guesses: u32, elapsed_secs: f64) -> f64 {
    f64::from(guesses) * 10.0 + elapsed_secs / 5.0
}

/// Everything the leaderboard needs from a won round.
///
/// Produced by the state machine on a win; the caller decides whether and
/// where to persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct RoundSummary {
    name: String,
    guesses: u32,
    time_taken: f64,
    score: f64,
}

impl RoundSummary {
    /// Creates a summary, deriving the score from the formula.
    #[instrument]
    pub fn new(name: String, guesses: u32, time_taken: f64) -> Self {
        let score = compute_score(guesses, time_taken);
        debug!(%name, guesses, time_taken, score, "Round summary created");
        Self {
            name,
            guesses,
            time_taken,
            score,
        }
    }
}

/// A persisted leaderboard entry as read back from a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ScoreEntry {
    /// Player name.
    name: String,
    /// Accepted guesses in the round.
    guesses: u32,
    /// Elapsed seconds for the round.
    time_taken: f64,
    /// Computed score (lower is better).
    score: f64,
    /// Wall-clock time the entry was recorded.
    recorded_at: NaiveDateTime,
}

impl ScoreEntry {
    /// Creates an entry from stored fields.
    pub fn new(
        name: String,
        guesses: u32,
        time_taken: f64,
        score: f64,
        recorded_at: NaiveDateTime,
    ) -> Self {
        Self {
            name,
            guesses,
            time_taken,
            score,
            recorded_at,
        }
    }
}

/// Storage boundary error with caller location tracking.
///
/// Store failures are always recoverable: gameplay proceeds without scoring
/// and the leaderboard view degrades instead of blocking.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Minimal leaderboard storage interface: append a record, read the top N.
///
/// Implementations provide whatever atomicity their backend has for a single
/// insert; the core imposes no cross-session ordering beyond that.
pub trait ScoreStore {
    /// Appends a won round to the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write.
    fn insert_score(&self, round: &RoundSummary) -> Result<ScoreEntry, StoreError>;

    /// Reads the best `limit` entries, score ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn top_scores(&self, limit: i64) -> Result<Vec<ScoreEntry>, StoreError>;
}
