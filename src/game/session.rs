//! Session state machine for one player's game.
//!
//! The session is an explicit value owned by the caller (the UI driver); the
//! machine is a function from (current state, action) to (next state,
//! outcome). Effects are returned, never performed: a win hands back a
//! [`RoundSummary`] for the caller to persist, and reveal frames are pulled
//! one at a time so the driver owns animation pacing.

use super::evaluate::evaluate;
use super::reveal::RevealFrames;
use super::types::{Guess, GuessError, GuessRecord, SecretNumber};
use crate::score::RoundSummary;
use derive_more::Display;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    /// No round underway; the start screen.
    #[display("idle")]
    Idle,
    /// Waiting for the player to enter a name.
    #[display("name-entry")]
    NameEntry,
    /// A round is in progress and accepting guesses.
    #[display("active")]
    Active,
    /// The player gave up; the secret is being revealed frame by frame.
    #[display("revealing")]
    Revealing,
    /// The round was won; waiting for play-again.
    #[display("won")]
    Won,
}

/// A user action fed to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    /// Begin a new round from the start screen.
    #[display("start")]
    Start,
    /// Submit the player's name.
    #[display("submit-name")]
    SubmitName(String),
    /// Submit a raw guess string.
    #[display("submit-guess")]
    SubmitGuess(String),
    /// Forfeit the round and reveal the secret.
    #[display("give-up")]
    GiveUp,
    /// Pull the next reveal frame.
    #[display("advance-reveal")]
    AdvanceReveal,
    /// Return to the start screen after a win or a finished reveal.
    #[display("play-again")]
    PlayAgain,
}

/// What the machine reports back to the driver after an accepted action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Moved to name entry; the driver should prompt for a name.
    AwaitingName,
    /// A round started for the named player; a fresh secret exists.
    RoundStarted {
        /// The accepted player name.
        player: String,
    },
    /// A valid, non-winning guess was evaluated.
    Feedback(GuessRecord),
    /// The round was won.
    Won {
        /// The winning guess's history record.
        record: GuessRecord,
        /// Data for the caller to persist to the leaderboard.
        summary: RoundSummary,
    },
    /// The next reveal frame to display.
    RevealFrame(String),
    /// All frames shown; the plain secret.
    RevealDone {
        /// The secret that was being revealed.
        secret: String,
    },
    /// The session returned to the start screen.
    Reset,
}

/// Rejected action. Every variant is recoverable and leaves the session
/// untouched; the driver surfaces the message and carries on.
#[derive(Debug, Clone, PartialEq, Display, derive_more::Error)]
pub enum GameError {
    /// The guess failed format validation.
    #[display("Invalid guess: {_0}")]
    InvalidGuess(GuessError),

    /// The submitted name was empty or whitespace.
    #[display("Please enter a name")]
    EmptyName,

    /// The action does not apply in the current phase.
    #[display("{action} is not available while {phase}")]
    UnexpectedAction {
        /// The rejected action.
        #[error(not(source))]
        action: Action,
        /// The phase it arrived in.
        phase: Phase,
    },
}

impl From<GuessError> for GameError {
    fn from(err: GuessError) -> Self {
        Self::InvalidGuess(err)
    }
}

/// One player's session: round bookkeeping plus the current phase.
///
/// Create with [`GameSession::new`], drive with [`GameSession::apply`]. The
/// caller owns the value; nothing here is global.
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: Phase,
    player_name: String,
    secret: Option<SecretNumber>,
    guesses: u32,
    started_at: Option<Instant>,
    history: Vec<GuessRecord>,
    reveal: Option<RevealFrames>,
}

impl GameSession {
    /// Creates an idle session.
    #[instrument]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            player_name: String::new(),
            secret: None,
            guesses: 0,
            started_at: None,
            history: Vec::new(),
            reveal: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player's name, empty until submitted.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// The current round's secret, if a round is underway.
    ///
    /// The driver owns the session, so the secret is not hidden from it; the
    /// reveal animation and tests both need it.
    pub fn secret(&self) -> Option<SecretNumber> {
        self.secret
    }

    /// Accepted guesses this round. Rejected submissions do not count.
    pub fn guesses(&self) -> u32 {
        self.guesses
    }

    /// History of accepted guesses, oldest first.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Seconds since the round started, 0 if no round is underway.
    pub fn elapsed_secs(&self) -> f64 {
        self.started_at
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Applies one action, advancing the session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] when the action is rejected; the session is left
    /// exactly as it was.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn apply(&mut self, action: Action) -> Result<Outcome, GameError> {
        match (self.phase, action) {
            (Phase::Idle, Action::Start) => {
                debug!("Entering name entry");
                self.phase = Phase::NameEntry;
                Ok(Outcome::AwaitingName)
            }
            (Phase::NameEntry, Action::SubmitName(name)) => self.start_round(name),
            (Phase::Active, Action::SubmitGuess(input)) => self.submit_guess(&input),
            (Phase::Active, Action::GiveUp) => self.give_up(),
            (Phase::Revealing, Action::AdvanceReveal) => self.advance_reveal(),
            (Phase::Won, Action::PlayAgain) => Ok(self.reset()),
            (Phase::Revealing, Action::PlayAgain) => {
                let exhausted = self.reveal.as_ref().is_some_and(RevealFrames::is_exhausted);
                if exhausted {
                    Ok(self.reset())
                } else {
                    warn!("Play-again before the reveal finished");
                    Err(GameError::UnexpectedAction {
                        action: Action::PlayAgain,
                        phase: self.phase,
                    })
                }
            }
            (phase, action) => {
                warn!(%phase, %action, "Action not applicable in phase");
                Err(GameError::UnexpectedAction { action, phase })
            }
        }
    }

    fn start_round(&mut self, name: String) -> Result<Outcome, GameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            warn!("Empty name submitted");
            return Err(GameError::EmptyName);
        }

        self.player_name = name.clone();
        self.secret = Some(SecretNumber::generate());
        self.guesses = 0;
        self.history.clear();
        self.started_at = Some(Instant::now());
        self.reveal = None;
        self.phase = Phase::Active;

        info!(player = %self.player_name, "Round started");
        Ok(Outcome::RoundStarted { player: name })
    }

    fn submit_guess(&mut self, input: &str) -> Result<Outcome, GameError> {
        // Validate before mutating anything: a rejected guess must leave the
        // counter and history untouched.
        let guess = Guess::parse(input)?;
        let secret = self.secret.expect("Active phase always has a secret");

        let result = evaluate(&secret, &guess);
        self.guesses += 1;
        let record = GuessRecord {
            guess,
            result,
            guess_number: self.guesses,
            elapsed_secs: self.elapsed_secs(),
        };
        self.history.push(record);

        if result.is_win() {
            let summary = RoundSummary::new(
                self.player_name.clone(),
                self.guesses,
                record.elapsed_secs,
            );
            info!(
                player = %self.player_name,
                guesses = self.guesses,
                elapsed = record.elapsed_secs,
                score = summary.score(),
                "Round won"
            );
            self.phase = Phase::Won;
            return Ok(Outcome::Won { record, summary });
        }

        debug!(guess = %guess, result = %result, guess_number = self.guesses, "Guess evaluated");
        Ok(Outcome::Feedback(record))
    }

    fn give_up(&mut self) -> Result<Outcome, GameError> {
        let secret = self.secret.expect("Active phase always has a secret");

        info!(player = %self.player_name, guesses = self.guesses, "Player gave up");
        let mut frames = RevealFrames::new(secret);
        self.phase = Phase::Revealing;
        let outcome = match frames.next() {
            Some(frame) => Outcome::RevealFrame(frame),
            None => Outcome::RevealDone {
                secret: secret.to_string(),
            },
        };
        self.reveal = Some(frames);
        Ok(outcome)
    }

    fn advance_reveal(&mut self) -> Result<Outcome, GameError> {
        let frames = self
            .reveal
            .as_mut()
            .expect("Revealing phase always has frames");

        match frames.next() {
            Some(frame) => Ok(Outcome::RevealFrame(frame)),
            None => Ok(Outcome::RevealDone {
                secret: frames.secret().to_string(),
            }),
        }
    }

    fn reset(&mut self) -> Outcome {
        info!(player = %self.player_name, "Session reset");
        *self = Self::new();
        Outcome::Reset
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
