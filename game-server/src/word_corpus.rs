use anyhow::{Context, Result, bail};
use std::path::Path;
use word_scramble_core::parse_word_list;

/// Newline-delimited word list served at `GET /words`.
#[derive(Debug, Clone)]
pub struct WordCorpus {
    words: Vec<String>,
}

impl WordCorpus {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;

        let corpus = Self::from_text(&text);
        if corpus.is_empty() {
            bail!("Word list {} contains no words", path.display());
        }
        Ok(corpus)
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            words: parse_word_list(text),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_text(&self) -> String {
        let mut text = self.words.join("\n");
        text.push('\n');
        text
    }
}
