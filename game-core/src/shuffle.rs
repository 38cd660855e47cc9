use rand::RngCore;
use rand::seq::SliceRandom;

/// Upper bound on reshuffles spent trying to move away from the original order.
pub const MAX_SHUFFLE_ATTEMPTS: usize = 10;

/// Scramble the characters of `word`.
///
/// Each attempt is a uniform Fisher-Yates permutation. The first attempt that
/// differs from `word` wins; if every attempt lands on the original order
/// (only likely for inputs such as `"aaa"`) the last attempt is returned as is.
/// Words of zero or one character come back unchanged.
pub fn shuffle_word(word: &str, rng: &mut dyn RngCore) -> String {
    let original: Vec<char> = word.chars().collect();
    if original.len() <= 1 {
        return word.to_string();
    }

    let mut attempt = original.clone();
    for _ in 0..MAX_SHUFFLE_ATTEMPTS {
        attempt.shuffle(&mut *rng);
        if attempt != original {
            break;
        }
    }

    attempt.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted_chars(word: &str) -> Vec<char> {
        let mut chars: Vec<char> = word.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn test_short_words_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(shuffle_word("", &mut rng), "");
        assert_eq!(shuffle_word("a", &mut rng), "a");
        assert_eq!(shuffle_word("é", &mut rng), "é");
    }

    #[test]
    fn test_shuffle_is_permutation_and_differs() {
        let mut rng = StdRng::seed_from_u64(42);
        for word in ["cat", "dog", "piano", "computador", "eletricidade"] {
            for _ in 0..50 {
                let shuffled = shuffle_word(word, &mut rng);
                assert_eq!(sorted_chars(&shuffled), sorted_chars(word));
                assert_ne!(shuffled, word, "shuffle of {} returned the original", word);
            }
        }
    }

    #[test]
    fn test_multibyte_characters_preserved() {
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = shuffle_word("ação", &mut rng);
        assert_eq!(shuffled.chars().count(), 4);
        assert_eq!(sorted_chars(&shuffled), sorted_chars("ação"));
    }

    #[test]
    fn test_identical_characters_accepted() {
        // No permutation differs, so the last attempt comes back as the original
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(shuffle_word("aaaa", &mut rng), "aaaa");
    }
}
