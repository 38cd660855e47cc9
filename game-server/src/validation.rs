use word_scramble_types::{MAX_NAME_LENGTH, ScoreSubmission, SubmissionRejection};

/// Check a submission and return it with the player name trimmed.
pub fn validate_submission(
    submission: &ScoreSubmission,
) -> Result<ScoreSubmission, SubmissionRejection> {
    if submission.id.trim().is_empty() {
        return Err(SubmissionRejection::MissingId);
    }

    let name = submission.name.trim();
    if name.is_empty() {
        return Err(SubmissionRejection::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(SubmissionRejection::NameTooLong {
            max: MAX_NAME_LENGTH as u32,
        });
    }

    if submission.points < 0 {
        return Err(SubmissionRejection::NegativePoints {
            points: submission.points,
        });
    }

    if chrono::DateTime::parse_from_rfc3339(&submission.timestamp).is_err() {
        return Err(SubmissionRejection::InvalidTimestamp {
            value: submission.timestamp.clone(),
        });
    }

    Ok(ScoreSubmission {
        name: name.to_string(),
        ..submission.clone()
    })
}
