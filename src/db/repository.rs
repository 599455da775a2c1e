//! Diesel/SQLite implementation of the leaderboard store.

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::{NewScore, ScoreRow, schema};
use crate::score::{RoundSummary, ScoreEntry, ScoreStore, StoreError};

/// Leaderboard repository backed by a SQLite database file.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
}

impl ScoreRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Creating ScoreRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }
}

impl ScoreStore for ScoreRepository {
    /// Appends a won round to the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails.
    #[instrument(skip(self, round), fields(player = %round.name(), score = round.score()))]
    fn insert_score(&self, round: &RoundSummary) -> Result<ScoreEntry, StoreError> {
        debug!("Recording score");
        let mut conn = self.connection()?;

        let new_score = NewScore::from(round);
        let row = diesel::insert_into(schema::scores::table)
            .values(&new_score)
            .returning(ScoreRow::as_returning())
            .get_result::<ScoreRow>(&mut conn)?;

        info!(
            score_id = row.id(),
            player = %row.name(),
            score = row.score(),
            "Score recorded"
        );
        Ok(row.into())
    }

    /// Reads the best `limit` entries, score ascending (lower is better).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    #[instrument(skip(self))]
    fn top_scores(&self, limit: i64) -> Result<Vec<ScoreEntry>, StoreError> {
        debug!(limit, "Loading top scores");
        let mut conn = self.connection()?;

        let rows = schema::scores::table
            .order(schema::scores::score.asc())
            .limit(limit)
            .load::<ScoreRow>(&mut conn)?;

        info!(count = rows.len(), "Top scores loaded");
        Ok(rows.into_iter().map(ScoreEntry::from).collect())
    }
}
