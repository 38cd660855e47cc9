use uuid::Uuid;
use word_scramble_types::{LeaderboardEntry, ScoreSubmission};

/// Points awarded for each word unscrambled in time.
pub const POINTS_PER_WORD: u32 = 1;

/// How many leaderboard rows the client shows by default.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Compare a guess with the original word, ignoring case.
///
/// Surrounding whitespace is significant: `" cat"` does not match `"cat"`.
pub fn is_correct_guess(guess: &str, target: &str) -> bool {
    guess.to_lowercase() == target.to_lowercase()
}

/// Latched flag guaranteeing at most one score submission per session.
#[derive(Debug, Default, Clone)]
pub struct SubmissionLatch {
    claimed: bool,
}

impl SubmissionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once until the latch is re-armed.
    pub fn try_claim(&mut self) -> bool {
        if self.claimed {
            return false;
        }
        self.claimed = true;
        true
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Re-arm for a new session
    pub fn rearm(&mut self) {
        self.claimed = false;
    }
}

/// Build the record sent to the score service, with a fresh id for dedupe.
pub fn build_submission(name: &str, points: u32) -> ScoreSubmission {
    ScoreSubmission {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        points: i32::try_from(points).unwrap_or(i32::MAX),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// Order leaderboard rows by points, highest first, and keep the top `limit`.
/// Rows with equal points keep the order the service returned them in.
pub fn rank_leaderboard(mut entries: Vec<LeaderboardEntry>, limit: usize) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.points.cmp(&a.points));
    entries.truncate(limit);
    entries
}
