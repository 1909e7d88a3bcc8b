use std::collections::HashSet;

use rand::Rng;

use crate::error::{GameError, GameResult};

/// Letters used for placed words and for noise fill
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Pick a uniformly random uppercase letter
pub fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// Trim and upper-case a word, rejecting anything that is not plain ASCII letters
pub fn normalize_word(raw: &str) -> GameResult<String> {
    let word = raw.trim().to_ascii_uppercase();

    if word.is_empty() {
        return Err(GameError::InvalidWord {
            word,
            reason: "word is empty",
        });
    }

    if !word.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(GameError::InvalidWord {
            word,
            reason: "word must contain only letters A-Z",
        });
    }

    Ok(word)
}

/// Normalize a round's word list; each word may appear only once. Whether a
/// word fits on the grid is the generator's call, not an input error.
pub fn normalize_word_list<S: AsRef<str>>(raw: &[S]) -> GameResult<Vec<String>> {
    if raw.is_empty() {
        return Err(GameError::EmptyWordList);
    }

    let mut seen = HashSet::with_capacity(raw.len());
    let mut words = Vec::with_capacity(raw.len());

    for entry in raw {
        let word = normalize_word(entry.as_ref())?;
        if !seen.insert(word.clone()) {
            return Err(GameError::DuplicateWord(word));
        }
        words.push(word);
    }

    Ok(words)
}

pub fn reversed(word: &str) -> String {
    word.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_letter_is_uppercase() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let letter = random_letter(&mut rng);
            assert!(letter.is_ascii_uppercase(), "Got non-letter {letter:?}");
        }
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  tiger ").unwrap(), "TIGER");
        assert!(normalize_word("").is_err());
        assert!(normalize_word("sea lion").is_err());
        assert!(normalize_word("café").is_err());
    }

    #[test]
    fn test_normalize_word_list_rejects_duplicates() {
        let err = normalize_word_list(&["cat", "CAT"]).unwrap_err();
        assert!(matches!(err, GameError::DuplicateWord(ref w) if w == "CAT"));
    }

    #[test]
    fn test_normalize_word_list_keeps_long_words() {
        assert_eq!(
            normalize_word_list(&["hippopotamus", "ant"]).unwrap(),
            vec!["HIPPOPOTAMUS", "ANT"]
        );
        assert!(normalize_word_list::<&str>(&[]).is_err());
        assert!(normalize_word_list(&["ant", "b e"]).is_err());
    }

    #[test]
    fn test_reversed() {
        assert_eq!(reversed("CAT"), "TAC");
        assert_eq!(reversed("A"), "A");
    }
}
