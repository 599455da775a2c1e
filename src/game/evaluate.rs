//! Guess evaluation rules.
//!
//! Pure functions over [`SecretNumber`] and [`Guess`], separated from session
//! bookkeeping so they can be tested and reasoned about in isolation.

use super::types::{DIGIT_COUNT, Guess, GuessResult, SecretNumber};
use tracing::{debug, instrument};

/// Scores a guess against the secret.
///
/// Single left-to-right pass: a position-equal digit counts as exact, else a
/// digit present anywhere in the secret counts as partial. There is no
/// claimed-position bookkeeping; that is sound only because both types
/// guarantee all-distinct digits, so no digit can be counted twice. If the
/// no-duplicate invariant is ever relaxed this must be redesigned around
/// multiset matching rather than quietly generalized.
#[instrument]
pub fn evaluate(secret: &SecretNumber, guess: &Guess) -> GuessResult {
    let mut exact = 0u8;
    let mut partial = 0u8;

    for i in 0..DIGIT_COUNT {
        let d = guess.digits()[i];
        if d == secret.digits()[i] {
            exact += 1;
        } else if secret.contains(d) {
            partial += 1;
        }
    }

    let result = GuessResult::new(exact, partial);
    debug!(%secret, %guess, %result, "Evaluated guess");
    result
}
