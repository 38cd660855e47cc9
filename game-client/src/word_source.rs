use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use word_scramble_core::{FixedTier, WordPool};

use crate::error::ClientError;

/// Delay before the second fetch attempt; doubled after every failure.
pub const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Where the game gets its candidate words.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch_words(&self) -> Result<WordPool, ClientError>;

    fn describe(&self) -> String;
}

/// The built-in easy and hard lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWordLists;

#[async_trait]
impl WordSource for FixedWordLists {
    async fn fetch_words(&self) -> Result<WordPool, ClientError> {
        Ok(FixedTier::default_pool())
    }

    fn describe(&self) -> String {
        "built-in word lists".to_string()
    }
}

/// Newline-delimited corpus served over HTTP.
pub struct HttpWordSource {
    client: Client,
    url: String,
}

impl HttpWordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    async fn fetch_words(&self) -> Result<WordPool, ClientError> {
        debug!("Fetching words from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        non_empty(WordPool::from_word_list(&text))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Newline-delimited corpus on disk.
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WordSource for FileWordSource {
    async fn fetch_words(&self) -> Result<WordPool, ClientError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        non_empty(WordPool::from_word_list(&text))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn non_empty(pool: WordPool) -> Result<WordPool, ClientError> {
    if pool.is_empty() {
        Err(ClientError::EmptyWordSource)
    } else {
        Ok(pool)
    }
}

/// Fetch words, retrying with a doubling delay. Returns the last error once
/// every attempt has failed.
pub async fn fetch_with_retry(
    source: &dyn WordSource,
    attempts: u32,
    initial_delay: Duration,
) -> Result<WordPool, ClientError> {
    let attempts = attempts.max(1);
    let mut delay = initial_delay;

    for attempt in 1..attempts {
        match source.fetch_words().await {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                warn!(
                    "Fetching words from {} failed (attempt {}/{}): {}",
                    source.describe(),
                    attempt,
                    attempts,
                    e
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }
    }

    source.fetch_words().await
}
