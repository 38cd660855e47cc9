use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use word_scramble_core::{
    DEFAULT_LEADERBOARD_SIZE, EngineConfig, FixedTier, ProgressionPolicy, ProgressiveLength,
};

use crate::error::ClientError;
use crate::word_source::{FileWordSource, FixedWordLists, HttpWordSource, WordSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSourceKind {
    /// Built-in easy and hard lists, played tier by tier.
    Fixed,
    /// Corpus fetched from the score service's `/words`.
    Http,
    /// Corpus read from a local file.
    File,
}

impl FromStr for WordSourceKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "fixed" => Ok(WordSourceKind::Fixed),
            "http" => Ok(WordSourceKind::Http),
            "file" => Ok(WordSourceKind::File),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub score_service_url: String,
    pub word_source: WordSourceKind,
    pub words_url: Option<String>,
    pub words_file: PathBuf,
    pub round_seconds: u32,
    pub skip_budget: u32,
    pub level_up_after: u32,
    pub profile_path: PathBuf,
    pub leaderboard_size: usize,
    pub words_fetch_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).map(|value| value.trim().to_string());

        Ok(Self {
            score_service_url: text("SCORE_SERVICE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.score_service_url),
            word_source: parse_or(&lookup, "WORD_SOURCE", defaults.word_source)?,
            words_url: text("WORDS_URL").or(defaults.words_url),
            words_file: text("WORDS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.words_file),
            round_seconds: parse_or(&lookup, "ROUND_SECONDS", defaults.round_seconds)?,
            skip_budget: parse_or(&lookup, "SKIP_BUDGET", defaults.skip_budget)?,
            level_up_after: parse_or(&lookup, "LEVEL_UP_AFTER", defaults.level_up_after)?,
            profile_path: text("PROFILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.profile_path),
            leaderboard_size: parse_or(&lookup, "LEADERBOARD_SIZE", defaults.leaderboard_size)?,
            words_fetch_attempts: parse_or(
                &lookup,
                "WORDS_FETCH_ATTEMPTS",
                defaults.words_fetch_attempts,
            )?,
        })
    }

    pub fn words_url(&self) -> String {
        self.words_url
            .clone()
            .unwrap_or_else(|| format!("{}/words", self.score_service_url))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            round_seconds: self.round_seconds,
            skip_budget: self.skip_budget,
        }
    }

    /// Fixed lists are played tier by tier; corpora grow by word length.
    pub fn progression(&self) -> Box<dyn ProgressionPolicy> {
        match self.word_source {
            WordSourceKind::Fixed => Box::new(FixedTier::new()),
            WordSourceKind::Http | WordSourceKind::File => Box::new(ProgressiveLength::new(
                ProgressiveLength::DEFAULT_START_LENGTH,
                self.level_up_after,
            )),
        }
    }

    pub fn build_word_source(&self) -> Arc<dyn WordSource> {
        match self.word_source {
            WordSourceKind::Fixed => Arc::new(FixedWordLists),
            WordSourceKind::Http => Arc::new(HttpWordSource::new(self.words_url())),
            WordSourceKind::File => Arc::new(FileWordSource::new(self.words_file.clone())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            score_service_url: "http://127.0.0.1:8080".to_string(),
            word_source: WordSourceKind::Fixed,
            words_url: None,
            words_file: PathBuf::from("./shared/words.txt"),
            round_seconds: EngineConfig::default().round_seconds,
            skip_budget: EngineConfig::default().skip_budget,
            level_up_after: ProgressiveLength::DEFAULT_LEVEL_UP_AFTER,
            profile_path: PathBuf::from("./word_scramble_profile.json"),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            words_fetch_attempts: 5,
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ClientError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ClientError::InvalidConfig { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.word_source, WordSourceKind::Fixed);
        assert_eq!(config.round_seconds, 30);
        assert_eq!(config.skip_budget, 3);
        assert_eq!(config.leaderboard_size, 10);
        assert_eq!(config.words_url(), "http://127.0.0.1:8080/words");
        assert_eq!(config.progression().difficulty_label(), "Easy");
    }

    #[test]
    fn test_values_read_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("SCORE_SERVICE_URL", "http://scores.local:9000/"),
            ("WORD_SOURCE", "HTTP"),
            ("ROUND_SECONDS", " 45 "),
            ("SKIP_BUDGET", "0"),
        ]))
        .unwrap();

        assert_eq!(config.score_service_url, "http://scores.local:9000");
        assert_eq!(config.word_source, WordSourceKind::Http);
        assert_eq!(config.round_seconds, 45);
        assert_eq!(config.skip_budget, 0);
        assert_eq!(config.words_url(), "http://scores.local:9000/words");
        assert_eq!(config.progression().difficulty_label(), "3 letters");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = Config::from_lookup(lookup_from(&[("ROUND_SECONDS", "soon")]));
        assert!(matches!(
            result,
            Err(ClientError::InvalidConfig {
                key: "ROUND_SECONDS",
                ..
            })
        ));

        let result = Config::from_lookup(lookup_from(&[("WORD_SOURCE", "carrier-pigeon")]));
        assert!(matches!(
            result,
            Err(ClientError::InvalidConfig {
                key: "WORD_SOURCE",
                ..
            })
        ));
    }
}
