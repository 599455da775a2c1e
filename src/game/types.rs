//! Core domain types for the guessing game.

use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of digits in a secret and in a guess.
pub const DIGIT_COUNT: usize = 4;

/// The secret 4-digit target for one round.
///
/// Invariant: all four digits are distinct. The invariant is established at
/// construction and the type is immutable, so evaluation code may rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretNumber {
    digits: [u8; DIGIT_COUNT],
}

impl SecretNumber {
    /// Generates a fresh secret: 4 distinct digits drawn uniformly without
    /// replacement from 0-9, concatenated in draw order. No leading-zero
    /// restriction. Call once per round; never reuse across rounds.
    #[instrument]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generates a secret from the given RNG. Seam for deterministic tests.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let sample = rand::seq::index::sample(rng, 10, DIGIT_COUNT);
        let mut digits = [0u8; DIGIT_COUNT];
        for (slot, idx) in digits.iter_mut().zip(sample.into_iter()) {
            *slot = idx as u8;
        }
        let secret = Self { digits };
        debug!(secret = %secret, "Generated secret");
        secret
    }

    /// Returns the digits in draw order.
    pub fn digits(&self) -> &[u8; DIGIT_COUNT] {
        &self.digits
    }

    /// Checks whether the digit occurs anywhere in the secret.
    pub fn contains(&self, digit: u8) -> bool {
        self.digits.contains(&digit)
    }
}

impl std::str::FromStr for SecretNumber {
    type Err = GuessError;

    /// Parses a secret from a 4-digit string, under the same validation as
    /// [`Guess::parse`]. Seam for replay and tests; live rounds use
    /// [`SecretNumber::generate`].
    fn from_str(s: &str) -> Result<Self, GuessError> {
        let guess = Guess::parse(s)?;
        Ok(Self {
            digits: *guess.digits(),
        })
    }
}

impl std::fmt::Display for SecretNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// A player's guess: 4 distinct digits in submission order.
///
/// Construction goes through [`Guess::parse`], which enforces the same
/// no-duplicate invariant as [`SecretNumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    digits: [u8; DIGIT_COUNT],
}

impl Guess {
    /// Parses raw player input into a guess.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError`] if the input is not exactly 4 characters, any
    /// character is not an ASCII digit, or any digit repeats.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, GuessError> {
        let trimmed = input.trim();
        if trimmed.chars().count() != DIGIT_COUNT {
            debug!(input = %trimmed, "Rejected guess: wrong length");
            return Err(GuessError::WrongLength(trimmed.chars().count()));
        }

        let mut digits = [0u8; DIGIT_COUNT];
        for (slot, c) in digits.iter_mut().zip(trimmed.chars()) {
            let d = c
                .to_digit(10)
                .ok_or(GuessError::NonDigit(c))
                .inspect_err(|_| debug!(input = %trimmed, "Rejected guess: non-digit"))?;
            *slot = d as u8;
        }

        for i in 1..DIGIT_COUNT {
            if digits[..i].contains(&digits[i]) {
                debug!(input = %trimmed, digit = digits[i], "Rejected guess: duplicate digit");
                return Err(GuessError::DuplicateDigit(digits[i]));
            }
        }

        Ok(Self { digits })
    }

    /// Returns the digits in submission order.
    pub fn digits(&self) -> &[u8; DIGIT_COUNT] {
        &self.digits
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Validation failure for raw guess input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_more::Error)]
pub enum GuessError {
    /// Input was not exactly 4 characters long.
    #[display("Expected exactly 4 digits, got {_0} characters")]
    WrongLength(#[error(not(source))] usize),

    /// Input contained a character that is not a digit.
    #[display("'{_0}' is not a digit")]
    NonDigit(#[error(not(source))] char),

    /// Input repeated a digit.
    #[display("Digit {_0} appears more than once")]
    DuplicateDigit(#[error(not(source))] u8),
}

/// Feedback for one evaluated guess: exact-position and value-only counts.
///
/// Renders as exact-count `'+'` followed by partial-count `'-'`, e.g. `"+-"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    exact: u8,
    partial: u8,
}

impl GuessResult {
    /// Creates a result from match counts.
    pub(crate) fn new(exact: u8, partial: u8) -> Self {
        Self { exact, partial }
    }

    /// Digits that match the secret at the same position.
    pub fn exact(&self) -> u8 {
        self.exact
    }

    /// Digits present in the secret at a different position.
    pub fn partial(&self) -> u8 {
        self.partial
    }

    /// True when all four digits are in the correct position.
    pub fn is_win(&self) -> bool {
        self.exact as usize == DIGIT_COUNT
    }
}

impl std::fmt::Display for GuessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.exact {
            write!(f, "+")?;
        }
        for _ in 0..self.partial {
            write!(f, "-")?;
        }
        Ok(())
    }
}

/// One entry in a round's guess history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The guess as submitted.
    pub guess: Guess,
    /// Feedback for the guess.
    pub result: GuessResult,
    /// 1-based index of this guess within the round.
    pub guess_number: u32,
    /// Seconds elapsed since the round started, sampled at submission.
    pub elapsed_secs: f64,
}
