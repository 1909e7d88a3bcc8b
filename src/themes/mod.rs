use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use rand::{seq::SliceRandom, Rng};
use tokio::fs;

use crate::{
    error::{GameError, GameResult},
    utils::letters::normalize_word,
};

pub const DEFAULT_WORDS_PER_ROUND: usize = 10;

/// Themes shipped with the game, used when no theme file is configured
static EMBEDDED_THEMES: Lazy<ThemeCatalog> = Lazy::new(|| {
    let raw: [(&str, &[&str]); 5] = [
        (
            "animals",
            &[
                "LION", "TIGER", "ELEPHANT", "GIRAFFE", "ZEBRA", "MONKEY", "KANGAROO", "PANDA",
                "KOALA", "OTTER", "RABBIT", "TURTLE", "WOLF", "BEAR", "FOX",
            ],
        ),
        (
            "colors",
            &[
                "RED", "BLUE", "GREEN", "YELLOW", "ORANGE", "PURPLE", "PINK", "BROWN", "BLACK",
                "WHITE", "GRAY", "VIOLET", "INDIGO", "CYAN",
            ],
        ),
        (
            "countries",
            &[
                "FRANCE", "GERMANY", "SPAIN", "ITALY", "CANADA", "BRAZIL", "JAPAN", "CHINA",
                "INDIA", "EGYPT", "KENYA", "PERU", "CHILE", "NEPAL",
            ],
        ),
        (
            "fruits",
            &[
                "APPLE", "BANANA", "CHERRY", "GRAPE", "LEMON", "MANGO", "ORANGE", "PEACH",
                "PEAR", "PLUM", "KIWI", "MELON", "PAPAYA", "LIME",
            ],
        ),
        (
            "sports",
            &[
                "SOCCER", "TENNIS", "GOLF", "HOCKEY", "RUGBY", "BOXING", "ROWING", "SKIING",
                "CRICKET", "POLO", "JUDO", "KARATE", "SURFING", "CYCLING",
            ],
        ),
    ];

    let themes = raw
        .iter()
        .map(|(name, words)| {
            (
                name.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect();
    ThemeCatalog { themes }
});

/// Named pools of candidate words.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: BTreeMap<String, Vec<String>>,
}

impl ThemeCatalog {
    /// The built-in catalog
    pub fn embedded() -> Self {
        (*EMBEDDED_THEMES).clone()
    }

    /// Load a catalog from a JSON file shaped like `{"animals": ["LION", ...]}`
    pub async fn load<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let content = fs::read_to_string(path).await?;
        let catalog = Self::from_json(&content)?;

        tracing::info!("Loaded {} themes", catalog.themes.len());

        Ok(catalog)
    }

    /// Parse a catalog from JSON. Words are upper-cased; entries that are
    /// not plain letters are skipped, as are themes left with no words.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut themes = BTreeMap::new();

        for (name, entries) in raw {
            let mut words: Vec<String> = Vec::with_capacity(entries.len());
            for entry in &entries {
                match normalize_word(entry) {
                    Ok(word) if !words.contains(&word) => words.push(word),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Skipping entry in theme {}: {}", name, e),
                }
            }
            if words.is_empty() {
                tracing::warn!("Theme {} has no usable words", name);
                continue;
            }
            themes.insert(name.trim().to_lowercase(), words);
        }

        if themes.is_empty() {
            return Err(GameError::EmptyWordList);
        }

        Ok(Self { themes })
    }

    pub fn theme_names(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    pub fn words(&self, theme: &str) -> GameResult<&[String]> {
        self.themes
            .get(theme)
            .map(Vec::as_slice)
            .ok_or_else(|| GameError::UnknownTheme(theme.to_string()))
    }

    /// Choose up to `count` distinct words from a theme at random
    pub fn sample<R: Rng + ?Sized>(
        &self,
        theme: &str,
        count: usize,
        rng: &mut R,
    ) -> GameResult<Vec<String>> {
        let mut words = self.words(theme)?.to_vec();
        words.shuffle(rng);
        words.truncate(count);
        Ok(words)
    }

    /// Label for a theme selector, e.g. "animals" -> "Animals"
    pub fn display_name(theme: &str) -> String {
        let mut chars = theme.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
