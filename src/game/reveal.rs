//! Post-forfeit reveal animation frames.
//!
//! When the player gives up, the secret is disclosed through a short noise
//! animation: each frame shows each digit either as itself or as a random
//! filler character, with the odds of the real digit rising frame by frame
//! until the final frame is the plain secret. The sequence is lazy, finite,
//! and restartable; the UI driver pulls one frame at a time and owns the
//! pacing.

use super::types::SecretNumber;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Characters used as noise before a digit settles.
const NOISE_CHARS: &[u8] =
    b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of noise frames before the secret is shown plainly.
const NOISE_FRAMES: usize = 5;

/// Lazy sequence of reveal frames for one forfeited round.
#[derive(Debug, Clone)]
pub struct RevealFrames {
    secret: SecretNumber,
    next_frame: usize,
}

impl RevealFrames {
    /// Creates a fresh sequence for the given secret.
    #[instrument]
    pub fn new(secret: SecretNumber) -> Self {
        debug!(%secret, "Preparing reveal sequence");
        Self {
            secret,
            next_frame: 0,
        }
    }

    /// Total number of frames, the final one being the plain secret.
    pub fn frame_count(&self) -> usize {
        NOISE_FRAMES + 1
    }

    /// True once every frame has been pulled.
    pub fn is_exhausted(&self) -> bool {
        self.next_frame >= self.frame_count()
    }

    /// Rewinds the sequence to its first frame.
    pub fn restart(&mut self) {
        self.next_frame = 0;
    }

    /// The secret being revealed.
    pub fn secret(&self) -> SecretNumber {
        self.secret
    }

    fn render_frame<R: Rng + ?Sized>(&self, frame: usize, rng: &mut R) -> String {
        if frame >= NOISE_FRAMES {
            return self.secret.to_string();
        }
        // Digit i settles with probability frame / (NOISE_FRAMES - 1), so the
        // first frame is pure noise and later frames converge on the secret.
        let settle = frame as f64 / (NOISE_FRAMES - 1) as f64;
        self.secret
            .digits()
            .iter()
            .map(|d| {
                if rng.random_bool(settle.min(1.0)) {
                    char::from(b'0' + d)
                } else {
                    char::from(*NOISE_CHARS.choose(rng).unwrap_or(&b'?'))
                }
            })
            .collect()
    }
}

impl Iterator for RevealFrames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.is_exhausted() {
            return None;
        }
        let frame = self.render_frame(self.next_frame, &mut rand::rng());
        self.next_frame += 1;
        Some(frame)
    }
}
