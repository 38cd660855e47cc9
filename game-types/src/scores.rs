use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LENGTH: usize = 32;

/// Body of `POST /scores`. The id is generated by the client and doubles as
/// the dedupe key on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreSubmission {
    pub id: String,
    pub name: String,
    pub points: i32,
    pub timestamp: String, // ISO 8601 string
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub name: String,
    pub points: i32,
    pub timestamp: String, // ISO 8601 string
}

impl From<&ScoreSubmission> for LeaderboardEntry {
    fn from(submission: &ScoreSubmission) -> Self {
        LeaderboardEntry {
            name: submission.name.clone(),
            points: submission.points,
            timestamp: submission.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SubmissionStatus {
    Recorded,
    Duplicate,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionReceipt {
    pub status: SubmissionStatus,
}
