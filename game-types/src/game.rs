use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies one round. A new round always gets a fresh token, so a
/// countdown tick carrying an old token can be told apart from a live one.
pub type RoundToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Loading,  // Word pool not available yet
    Active,   // Word shown, countdown running
    Correct,  // Guessed, next round about to start
    TimedOut, // Countdown hit zero, session over
    Finished, // No word left for the current tier/length
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::TimedOut | GamePhase::Finished)
    }
}

/// Render-ready snapshot of the engine. Never contains the unscrambled word
/// while the round is still being played.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundView {
    pub phase: GamePhase,
    pub player_name: String,
    pub shuffled: Option<String>,
    pub guess: String,
    pub remaining_seconds: u32,
    pub skips_remaining: u32,
    pub points: u32,
    pub difficulty: String,
    pub message: Option<String>,
    pub disabled: bool,
}
