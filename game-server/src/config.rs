use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub words_file: String,
    pub max_stored_scores: u64,
    pub default_leaderboard_limit: u64,
    pub max_leaderboard_limit: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port)?,
            words_file: env::var("WORDS_FILE").unwrap_or(defaults.words_file),
            max_stored_scores: env_or("MAX_STORED_SCORES", defaults.max_stored_scores)?,
            default_leaderboard_limit: env_or(
                "LEADERBOARD_LIMIT",
                defaults.default_leaderboard_limit,
            )?,
            max_leaderboard_limit: defaults.max_leaderboard_limit,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            words_file: "./shared/words.txt".to_string(),
            max_stored_scores: 1000,
            default_leaderboard_limit: 10,
            max_leaderboard_limit: 100,
        }
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
