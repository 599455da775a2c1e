//! Game core: domain types, evaluation rules, reveal frames, and the
//! session state machine.

mod evaluate;
mod reveal;
mod session;
mod types;

pub use evaluate::evaluate;
pub use reveal::RevealFrames;
pub use session::{Action, GameError, GameSession, Outcome, Phase};
pub use types::{DIGIT_COUNT, Guess, GuessError, GuessRecord, GuessResult, SecretNumber};
