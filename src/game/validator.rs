use std::collections::HashSet;

use crate::{
    models::{Grid, Position},
    utils::letters::reversed,
};

/// A selection that spells one of the round's words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMatch {
    pub word: String,
    /// Index of the word in the active list (drives its colour)
    pub index: usize,
    /// True when the letters were selected back to front
    pub reversed: bool,
}

pub struct WordValidator;

impl WordValidator {
    /// Extract word from grid positions
    pub fn extract_word(grid: &Grid, positions: &[Position]) -> Option<String> {
        grid.letters_at(positions)
    }

    /// Compare a selected letter string against one word, in either reading direction.
    /// Returns `Some(reversed)` on a match.
    pub fn matches(selected: &str, word: &str) -> Option<bool> {
        if selected == word {
            Some(false)
        } else if selected == reversed(word) {
            Some(true)
        } else {
            None
        }
    }

    /// Find the word spelled by `positions`.
    ///
    /// Words already in `found` are skipped. If more than one remaining word
    /// matches, the one earliest in `words` wins.
    pub fn find_match(
        grid: &Grid,
        positions: &[Position],
        words: &[String],
        found: &HashSet<String>,
    ) -> Option<SelectionMatch> {
        if positions.is_empty() {
            return None;
        }
        let selected = Self::extract_word(grid, positions)?;

        words
            .iter()
            .enumerate()
            .filter(|(_, word)| !found.contains(*word))
            .find_map(|(index, word)| {
                Self::matches(&selected, word).map(|reversed| SelectionMatch {
                    word: word.clone(),
                    index,
                    reversed,
                })
            })
    }
}
