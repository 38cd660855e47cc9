use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("Word source returned no words")]
    EmptyWordSource,

    #[error("Word request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Word request returned status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed profile: {0}")]
    Profile(#[from] serde_json::Error),
}
