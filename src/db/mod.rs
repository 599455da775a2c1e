//! Diesel/SQLite persistence for the leaderboard.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use models::{NewScore, ScoreRow};
pub use repository::ScoreRepository;
