use rand::RngCore;
use tracing::debug;

use crate::WordPool;

/// Hand-authored lists used by the fixed-tier variant.
pub const EASY_WORDS: &[&str] = &["carro", "nuvem", "livro", "piano", "pessoa"];
pub const HARD_WORDS: &[&str] = &[
    "computador",
    "apontador",
    "geladeira",
    "eletricidade",
    "avenida",
    "encomenda",
];

/// Decides which word comes next and how difficulty grows over a session.
pub trait ProgressionPolicy: Send {
    /// Human readable name of the current tier or target length
    fn difficulty_label(&self) -> String;

    /// Called once after every correct answer.
    fn advance(&mut self);

    /// True when no further word can be drawn at the current difficulty.
    fn is_exhausted(&self, pool: &WordPool) -> bool;

    /// Draw the next word, moving to a harder tier if the policy allows it.
    fn next_word(&mut self, pool: &mut WordPool, rng: &mut dyn RngCore) -> Option<String>;

    /// Back to the starting difficulty for a new session.
    fn reset(&mut self);
}

/// "Easy" list first, then "hard"; every word is used once per session and the
/// session ends when the last tier runs dry.
#[derive(Debug, Clone)]
pub struct FixedTier {
    labels: Vec<String>,
    current: usize,
}

impl FixedTier {
    pub fn new() -> Self {
        Self::with_labels(vec!["Easy".to_string(), "Hard".to_string()])
    }

    pub fn with_labels(labels: Vec<String>) -> Self {
        Self { labels, current: 0 }
    }

    /// Pool matching the built-in easy/hard lists.
    pub fn default_pool() -> WordPool {
        WordPool::tiered(vec![
            EASY_WORDS.iter().map(|w| w.to_string()).collect(),
            HARD_WORDS.iter().map(|w| w.to_string()).collect(),
        ])
    }

    pub fn current_tier(&self) -> usize {
        self.current
    }
}

impl Default for FixedTier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionPolicy for FixedTier {
    fn difficulty_label(&self) -> String {
        self.labels
            .get(self.current)
            .cloned()
            .unwrap_or_else(|| format!("Tier {}", self.current + 1))
    }

    fn advance(&mut self) {
        // Tiers change on exhaustion only
    }

    fn is_exhausted(&self, pool: &WordPool) -> bool {
        (self.current..pool.tier_count()).all(|tier| pool.tier(tier).is_empty())
    }

    fn next_word(&mut self, pool: &mut WordPool, rng: &mut dyn RngCore) -> Option<String> {
        while self.current < pool.tier_count() {
            if let Some(word) = pool.take_random(self.current, &mut *rng) {
                return Some(word);
            }
            if self.current + 1 >= pool.tier_count() {
                return None;
            }
            self.current += 1;
            debug!("Moving to tier {}", self.difficulty_label());
        }
        None
    }

    fn reset(&mut self) {
        self.current = 0;
    }
}

/// Target length starts small and grows by one letter after a fixed number of
/// correct answers at the current length. Meant for large corpora, so by
/// default words are not removed once drawn.
#[derive(Debug, Clone)]
pub struct ProgressiveLength {
    start_length: usize,
    level_up_after: u32,
    remove_used: bool,
    target_length: usize,
    correct_at_length: u32,
}

impl ProgressiveLength {
    pub const DEFAULT_START_LENGTH: usize = 3;
    pub const DEFAULT_LEVEL_UP_AFTER: u32 = 8;

    pub fn new(start_length: usize, level_up_after: u32) -> Self {
        Self {
            start_length,
            level_up_after: level_up_after.max(1),
            remove_used: false,
            target_length: start_length,
            correct_at_length: 0,
        }
    }

    /// Remove drawn words from the pool so a length never repeats a word.
    pub fn removing_used_words(mut self) -> Self {
        self.remove_used = true;
        self
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn correct_at_length(&self) -> u32 {
        self.correct_at_length
    }
}

impl Default for ProgressiveLength {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START_LENGTH, Self::DEFAULT_LEVEL_UP_AFTER)
    }
}

impl ProgressionPolicy for ProgressiveLength {
    fn difficulty_label(&self) -> String {
        format!("{} letters", self.target_length)
    }

    fn advance(&mut self) {
        self.correct_at_length += 1;
        if self.correct_at_length >= self.level_up_after {
            self.target_length += 1;
            self.correct_at_length = 0;
            debug!("Target length raised to {}", self.target_length);
        }
    }

    fn is_exhausted(&self, pool: &WordPool) -> bool {
        pool.count_of_length(0, self.target_length) == 0
    }

    fn next_word(&mut self, pool: &mut WordPool, rng: &mut dyn RngCore) -> Option<String> {
        pool.draw_of_length(0, self.target_length, self.remove_used, rng)
    }

    fn reset(&mut self) {
        self.target_length = self.start_length;
        self.correct_at_length = 0;
    }
}
