use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use word_scramble_types::{
    ApiError, LeaderboardEntry, ScoreSubmission, SubmissionReceipt, SubmissionStatus,
};

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Score service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Score service returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// The remote side that stores finished sessions and ranks them.
#[async_trait]
pub trait ScoreService: Send + Sync {
    async fn submit_score(
        &self,
        submission: &ScoreSubmission,
    ) -> Result<SubmissionStatus, ScoreError>;

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreError>;
}

pub struct HttpScoreService {
    client: Client,
    base_url: String,
}

impl HttpScoreService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Turn a non-success response into a `ScoreError`, keeping the server's
/// `{"error": ..}` message when it sent one.
async fn error_from_response(response: reqwest::Response) -> ScoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|api_error| api_error.error)
        .unwrap_or(body);

    ScoreError::Status { status, message }
}

#[async_trait]
impl ScoreService for HttpScoreService {
    async fn submit_score(
        &self,
        submission: &ScoreSubmission,
    ) -> Result<SubmissionStatus, ScoreError> {
        let url = format!("{}/scores", self.base_url);
        debug!("Submitting score {} to {}", submission.id, url);

        let response = self.client.post(&url).json(submission).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let receipt: SubmissionReceipt = response.json().await?;
        Ok(receipt.status)
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreError> {
        let url = format!("{}/leaderboard", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }
}
