use std::{env, str::FromStr, time::Duration};

use anyhow::{bail, Context, Result};

use crate::{
    game::{
        grid::{DEFAULT_GRID_SIZE, DEFAULT_PLACEMENT_ATTEMPTS},
        round::DEFAULT_REGENERATION_LIMIT,
        GeneratorConfig, RoundConfig,
    },
    session::SessionConfig,
    themes::DEFAULT_WORDS_PER_ROUND,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub game: GameConfig,
    /// JSON theme file; the embedded themes are used when unset
    pub themes_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub grid_size: usize,
    pub words_per_round: usize,
    pub placement_attempts: usize,
    pub regeneration_limit: usize,
    pub tick_interval_ms: u64,
    pub default_theme: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            words_per_round: DEFAULT_WORDS_PER_ROUND,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            regeneration_limit: DEFAULT_REGENERATION_LIMIT,
            tick_interval_ms: 1000,
            default_theme: "animals".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = GameConfig::default();

        let game = GameConfig {
            grid_size: parse_or(&lookup, "GRID_SIZE", defaults.grid_size)?,
            words_per_round: parse_or(&lookup, "WORDS_PER_ROUND", defaults.words_per_round)?,
            placement_attempts: parse_or(
                &lookup,
                "PLACEMENT_ATTEMPTS",
                defaults.placement_attempts,
            )?,
            regeneration_limit: parse_or(
                &lookup,
                "REGENERATION_LIMIT",
                defaults.regeneration_limit,
            )?,
            tick_interval_ms: parse_or(&lookup, "TICK_INTERVAL_MS", defaults.tick_interval_ms)?,
            default_theme: lookup("DEFAULT_THEME")
                .map(|t| t.trim().to_lowercase())
                .unwrap_or(defaults.default_theme),
        };

        if game.grid_size < 2 {
            bail!("GRID_SIZE must be at least 2");
        }
        if game.words_per_round == 0 {
            bail!("WORDS_PER_ROUND must be at least 1");
        }
        if game.tick_interval_ms == 0 {
            bail!("TICK_INTERVAL_MS must be positive");
        }

        Ok(Config {
            game,
            themes_path: lookup("THEMES_PATH").filter(|p| !p.trim().is_empty()),
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            round: RoundConfig {
                generator: GeneratorConfig {
                    size: self.game.grid_size,
                    placement_attempts: self.game.placement_attempts,
                },
                regeneration_limit: self.game.regeneration_limit,
            },
            words_per_round: self.game.words_per_round,
            default_theme: self.game.default_theme.clone(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.game.tick_interval_ms)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.game.grid_size, 10);
        assert_eq!(config.game.words_per_round, 10);
        assert_eq!(config.game.placement_attempts, 100);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.themes_path.is_none());

        let session = config.session_config();
        assert_eq!(session.round.generator.size, 10);
        assert_eq!(session.default_theme, "animals");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GRID_SIZE", "12"),
            ("PLACEMENT_ATTEMPTS", "250"),
            ("DEFAULT_THEME", " Fruits "),
            ("THEMES_PATH", "./themes.json"),
        ]))
        .unwrap();
        assert_eq!(config.game.grid_size, 12);
        assert_eq!(config.session_config().round.generator.placement_attempts, 250);
        assert_eq!(config.game.default_theme, "fruits");
        assert_eq!(config.themes_path.as_deref(), Some("./themes.json"));
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("GRID_SIZE", "ten")])).unwrap_err();
        assert!(err.to_string().contains("GRID_SIZE"));
        assert!(Config::from_lookup(lookup(&[("GRID_SIZE", "1")])).is_err());
        assert!(Config::from_lookup(lookup(&[("WORDS_PER_ROUND", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TICK_INTERVAL_MS", "0")])).is_err());
    }
}
