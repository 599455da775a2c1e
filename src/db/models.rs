//! Leaderboard database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;
use crate::score::{RoundSummary, ScoreEntry};

/// Persisted leaderboard row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::scores)]
pub struct ScoreRow {
    id: i32,
    name: String,
    guesses: i32,
    time_taken: f64,
    score: f64,
    recorded_at: NaiveDateTime,
}

impl From<ScoreRow> for ScoreEntry {
    fn from(row: ScoreRow) -> Self {
        ScoreEntry::new(
            row.name,
            row.guesses.max(0) as u32,
            row.time_taken,
            row.score,
            row.recorded_at,
        )
    }
}

/// Insertable leaderboard row. `recorded_at` defaults server-side.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    name: String,
    guesses: i32,
    time_taken: f64,
    score: f64,
}

impl From<&RoundSummary> for NewScore {
    fn from(round: &RoundSummary) -> Self {
        Self::new(
            round.name().clone(),
            *round.guesses() as i32,
            *round.time_taken(),
            *round.score(),
        )
    }
}
