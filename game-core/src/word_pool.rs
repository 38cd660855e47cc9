use rand::RngCore;
use rand::seq::IndexedRandom;

/// Normalise a newline-delimited word list: lines are trimmed, blank lines
/// and `#` comments are dropped. Duplicates and original order are kept.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Length of a word in characters, which is what the player sees.
pub fn word_length(word: &str) -> usize {
    word.chars().count()
}

/// Pick a uniformly random word of exactly `length` characters.
pub fn pick_word(available: &[String], length: usize, rng: &mut dyn RngCore) -> Option<String> {
    pick_index(available, length, rng).map(|index| available[index].clone())
}

/// Index of a uniformly random word of exactly `length` characters.
pub fn pick_index(available: &[String], length: usize, rng: &mut dyn RngCore) -> Option<usize> {
    let matching: Vec<usize> = available
        .iter()
        .enumerate()
        .filter(|(_, word)| word_length(word) == length)
        .map(|(index, _)| index)
        .collect();

    matching.choose(rng).copied()
}

/// Candidate words grouped into ordered tiers.
///
/// A corpus loaded from a file or URL is a single tier; the hand-authored
/// lists are one tier per difficulty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordPool {
    tiers: Vec<Vec<String>>,
}

impl WordPool {
    pub fn single(words: Vec<String>) -> Self {
        Self { tiers: vec![words] }
    }

    pub fn tiered(tiers: Vec<Vec<String>>) -> Self {
        Self { tiers }
    }

    pub fn from_word_list(text: &str) -> Self {
        Self::single(parse_word_list(text))
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    pub fn tier(&self, index: usize) -> &[String] {
        self.tiers.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(Vec::is_empty)
    }

    /// Count words of a given length in one tier
    pub fn count_of_length(&self, tier: usize, length: usize) -> usize {
        self.tier(tier)
            .iter()
            .filter(|word| word_length(word) == length)
            .count()
    }

    /// Draw any word from a tier at random and remove it.
    pub fn take_random(&mut self, tier: usize, rng: &mut dyn RngCore) -> Option<String> {
        let words = self.tiers.get_mut(tier)?;
        let indices: Vec<usize> = (0..words.len()).collect();
        let index = *indices.choose(rng)?;
        Some(words.swap_remove(index))
    }

    /// Draw a word of exactly `length` characters from a tier, optionally
    /// removing it so it cannot come up again.
    pub fn draw_of_length(
        &mut self,
        tier: usize,
        length: usize,
        remove: bool,
        rng: &mut dyn RngCore,
    ) -> Option<String> {
        let words = self.tiers.get_mut(tier)?;
        let index = pick_index(words, length, rng)?;
        if remove {
            Some(words.swap_remove(index))
        } else {
            Some(words[index].clone())
        }
    }
}
