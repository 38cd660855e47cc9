use rand::RngCore;
use word_scramble_types::RoundToken;

use crate::shuffle_word;

pub const CORRECT_MESSAGE: &str = "Correct!";
pub const TRY_AGAIN_MESSAGE: &str = "Try again!";

/// One word-guessing challenge. A new round never inherits the guess text or
/// message of the round it replaces.
#[derive(Debug, Clone)]
pub struct Round {
    pub token: RoundToken,
    pub original: String, // Hidden from the player until time runs out
    pub shuffled: String,
    pub guess: String,
    pub remaining_seconds: u32,
    pub disabled: bool,
    pub terminal: bool,
    pub message: Option<String>,
}

impl Round {
    pub fn new(token: RoundToken, original: String, seconds: u32, rng: &mut dyn RngCore) -> Self {
        let shuffled = shuffle_word(&original, rng);
        Self {
            token,
            original,
            shuffled,
            guess: String::new(),
            remaining_seconds: seconds,
            disabled: false,
            terminal: false,
            message: None,
        }
    }

    pub fn is_accepting_input(&self) -> bool {
        !self.disabled
    }

    /// One second elapsed. Returns true when the countdown just hit zero.
    pub fn count_down(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    pub fn mark_correct(&mut self) {
        self.disabled = true;
        self.message = Some(CORRECT_MESSAGE.to_string());
    }

    pub fn mark_incorrect(&mut self) {
        self.message = Some(TRY_AGAIN_MESSAGE.to_string());
    }

    pub fn mark_timed_out(&mut self) {
        self.disabled = true;
        self.terminal = true;
        self.message = Some(format!("Time's up! The word was \"{}\"", self.original));
    }
}
