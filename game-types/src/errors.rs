use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// JSON error body returned by every failing HTTP endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SubmissionRejection {
    MissingId,
    EmptyName,
    NameTooLong { max: u32 },
    NegativePoints { points: i32 },
    InvalidTimestamp { value: String },
}

impl fmt::Display for SubmissionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionRejection::MissingId => write!(f, "Score id is required"),
            SubmissionRejection::EmptyName => write!(f, "Player name is required"),
            SubmissionRejection::NameTooLong { max } => {
                write!(f, "Player name longer than {} characters", max)
            }
            SubmissionRejection::NegativePoints { points } => {
                write!(f, "Points cannot be negative: {}", points)
            }
            SubmissionRejection::InvalidTimestamp { value } => {
                write!(f, "Invalid timestamp: {}", value)
            }
        }
    }
}
