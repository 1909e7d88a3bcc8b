pub mod driver;
pub mod messages;

pub use driver::run;
pub use messages::{ClientMessage, ServerMessage, ThemeInfo, WordInfo};

use rand::RngCore;
use uuid::Uuid;

use crate::{
    error::{GameError, GameResult},
    game::{RoundConfig, RoundState, Scorer, SelectionOutcome, SelectionTracker},
    models::Position,
    notify::Notifier,
    themes::{ThemeCatalog, DEFAULT_WORDS_PER_ROUND},
};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub round: RoundConfig,
    pub words_per_round: usize,
    pub default_theme: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            words_per_round: DEFAULT_WORDS_PER_ROUND,
            default_theme: "animals".to_string(),
        }
    }
}

/// One player's game: the theme they picked, the current round and the drag in progress.
///
/// Every input is handled synchronously and answered with the messages the
/// presentation surface should apply, in order.
pub struct GameSession {
    catalog: ThemeCatalog,
    config: SessionConfig,
    theme: String,
    words: Vec<String>,
    round: RoundState,
    tracker: SelectionTracker,
    rng: Box<dyn RngCore + Send>,
    notifier: Box<dyn Notifier>,
}

impl GameSession {
    pub fn new(
        catalog: ThemeCatalog,
        config: SessionConfig,
        mut rng: Box<dyn RngCore + Send>,
        notifier: Box<dyn Notifier>,
    ) -> GameResult<Self> {
        let theme = if catalog.contains(&config.default_theme) {
            config.default_theme.clone()
        } else {
            let fallback = catalog
                .theme_names()
                .into_iter()
                .next()
                .ok_or_else(|| GameError::UnknownTheme(config.default_theme.clone()))?;
            tracing::warn!(
                "Default theme {} not in catalog, using {}",
                config.default_theme,
                fallback
            );
            fallback
        };

        let words = catalog.sample(&theme, config.words_per_round, &mut *rng)?;
        let round = RoundState::generate(&words, &config.round, &mut *rng)?;

        Ok(Self {
            catalog,
            config,
            theme,
            words,
            round,
            tracker: SelectionTracker::new(),
            rng,
            notifier,
        })
    }

    /// What a freshly attached presentation surface needs to draw the game
    pub fn opening_messages(&self) -> Vec<ServerMessage> {
        vec![self.themes_message(), self.round_started_message()]
    }

    pub fn handle(&mut self, message: ClientMessage) -> Vec<ServerMessage> {
        match message {
            ClientMessage::ListThemes => vec![self.themes_message()],
            ClientMessage::SelectTheme { theme } => self.select_theme(theme),
            ClientMessage::StartGame => self.restart(),
            ClientMessage::PointerDown { row, col } => self.pointer_down(Position::new(row, col)),
            ClientMessage::PointerEnter { row, col } => self.pointer_enter(Position::new(row, col)),
            ClientMessage::PointerUp => self.pointer_up(),
        }
    }

    /// One second of the round clock. Ticks addressed to a round that has
    /// since been replaced are dropped.
    pub fn tick(&mut self, round_id: Uuid) -> Vec<ServerMessage> {
        if round_id != self.round.id() {
            tracing::debug!("Dropping tick for stale round {}", round_id);
            return Vec::new();
        }
        match self.round.tick() {
            Some(elapsed_seconds) => vec![ServerMessage::TimerTick {
                round_id,
                elapsed_seconds,
            }],
            None => Vec::new(),
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    /// Switch theme only once the new round exists; a failure leaves the
    /// previous theme and round in place.
    fn select_theme(&mut self, theme: String) -> Vec<ServerMessage> {
        let theme = theme.trim().to_lowercase();
        let words = match self
            .catalog
            .sample(&theme, self.config.words_per_round, &mut *self.rng)
        {
            Ok(words) => words,
            Err(e) => return vec![error_message(e)],
        };

        match RoundState::generate(&words, &self.config.round, &mut *self.rng) {
            Ok(round) => {
                tracing::info!("Theme changed to {}", theme);
                self.theme = theme;
                self.words = words;
                self.replace_round(round)
            }
            Err(e) => {
                tracing::error!("Failed to start a round for theme {}: {}", theme, e);
                vec![error_message(e)]
            }
        }
    }

    /// Replace the round wholesale with a new grid for the current words
    fn restart(&mut self) -> Vec<ServerMessage> {
        match RoundState::generate(&self.words, &self.config.round, &mut *self.rng) {
            Ok(round) => self.replace_round(round),
            Err(e) => {
                tracing::error!("Failed to start a new round: {}", e);
                vec![error_message(e)]
            }
        }
    }

    fn replace_round(&mut self, round: RoundState) -> Vec<ServerMessage> {
        self.round = round;
        self.tracker.cancel();
        vec![self.round_started_message()]
    }

    fn pointer_down(&mut self, cell: Position) -> Vec<ServerMessage> {
        if let Err(e) = self.check_bounds(cell) {
            return vec![error_message(e)];
        }
        self.tracker.begin(cell);
        vec![self.selection_message()]
    }

    fn pointer_enter(&mut self, cell: Position) -> Vec<ServerMessage> {
        if self.check_bounds(cell).is_err() {
            return Vec::new();
        }
        if self.tracker.extend(cell) {
            vec![self.selection_message()]
        } else {
            Vec::new()
        }
    }

    fn pointer_up(&mut self) -> Vec<ServerMessage> {
        let Some(path) = self.tracker.end() else {
            return Vec::new();
        };

        let mut replies = vec![ServerMessage::Selection { cells: Vec::new() }];

        let SelectionOutcome::Found { record, completed } = self.round.validate(&path) else {
            return replies;
        };

        if let Err(e) = self.notifier.word_found(&record) {
            tracing::warn!("Word-found notification failed: {}", e);
        }
        replies.push(ServerMessage::WordFound {
            record,
            found_words: self.round.found_words(),
        });

        if let Some(summary) = completed {
            if let Err(e) = self.notifier.round_complete(&summary) {
                tracing::warn!("Round-complete notification failed: {}", e);
            }
            replies.push(ServerMessage::RoundComplete { summary });
            replies.extend(self.restart());
        }

        replies
    }

    fn check_bounds(&self, cell: Position) -> GameResult<()> {
        let size = self.round.grid().size();
        if self.round.grid().contains(cell) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                size,
            })
        }
    }

    fn themes_message(&self) -> ServerMessage {
        ServerMessage::Themes {
            themes: self
                .catalog
                .theme_names()
                .into_iter()
                .map(|name| ThemeInfo {
                    label: ThemeCatalog::display_name(&name),
                    name,
                })
                .collect(),
            selected: self.theme.clone(),
        }
    }

    fn round_started_message(&self) -> ServerMessage {
        ServerMessage::RoundStarted {
            round_id: self.round.id(),
            theme: self.theme.clone(),
            size: self.round.grid().size(),
            grid: self.round.grid().rows(),
            words: self
                .round
                .words()
                .iter()
                .enumerate()
                .map(|(index, word)| WordInfo {
                    word: word.clone(),
                    color: Scorer::color_for(index).to_string(),
                })
                .collect(),
            unplaced: self.round.unplaced().to_vec(),
        }
    }

    fn selection_message(&self) -> ServerMessage {
        ServerMessage::Selection {
            cells: self.tracker.path().to_vec(),
        }
    }
}

fn error_message(error: GameError) -> ServerMessage {
    ServerMessage::Error {
        message: error.to_string(),
    }
}
