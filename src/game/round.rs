use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{GameError, GameResult},
    game::{
        grid::{GeneratedGrid, GeneratorConfig, GridGenerator},
        scorer::Scorer,
        validator::WordValidator,
    },
    models::{FoundRecord, Grid, Placements, Position, RoundSummary},
    utils::letters::normalize_word_list,
};

pub const DEFAULT_REGENERATION_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub generator: GeneratorConfig,
    /// Extra full-grid attempts when some words did not fit
    pub regeneration_limit: usize,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            regeneration_limit: DEFAULT_REGENERATION_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Waiting for the first find
    Idle,
    Running,
    /// Round complete
    Stopped,
}

/// What a finished selection did to the round.
#[derive(Debug, Clone)]
pub enum SelectionOutcome {
    NoMatch,
    Found {
        record: FoundRecord,
        /// Present on the find that completes the round
        completed: Option<RoundSummary>,
    },
}

/// All state scoped to one round. A new round replaces the whole value.
#[derive(Debug, Clone)]
pub struct RoundState {
    id: Uuid,
    started_at: DateTime<Utc>,
    words: Vec<String>,
    unplaced: Vec<String>,
    grid: Grid,
    placements: Placements,
    found: HashSet<String>,
    found_records: Vec<FoundRecord>,
    scorer: Scorer,
    timer: TimerState,
    elapsed_seconds: u64,
}

impl RoundState {
    /// Generate a fresh grid for `words`.
    ///
    /// If some words do not fit, the whole grid is regenerated up to
    /// `regeneration_limit` more times. The best grid found is kept and any
    /// words still missing are taken off the active list.
    pub fn generate<S: AsRef<str>, R: Rng + ?Sized>(
        words: &[S],
        config: &RoundConfig,
        rng: &mut R,
    ) -> GameResult<Self> {
        let words = normalize_word_list(words)?;
        let generator = GridGenerator::new(config.generator)?;

        let mut best: Option<GeneratedGrid> = None;
        for attempt in 0..=config.regeneration_limit {
            let generated = generator.generate(&words, rng);
            if generated.unplaced.is_empty() {
                if attempt > 0 {
                    tracing::debug!("All words placed after {} regenerations", attempt);
                }
                best = Some(generated);
                break;
            }
            let improves = best
                .as_ref()
                .map_or(true, |b| generated.unplaced.len() < b.unplaced.len());
            if improves {
                best = Some(generated);
            }
        }

        let generated = best.ok_or(GameError::NothingPlaced)?;
        if !generated.unplaced.is_empty() {
            tracing::warn!(
                "Dropping {} word(s) that did not fit a {}x{} grid: {:?}",
                generated.unplaced.len(),
                config.generator.size,
                config.generator.size,
                generated.unplaced
            );
        }

        Self::from_parts(&words, generated.grid, generated.placements)
    }

    /// Build a round from an already generated grid. Words without a
    /// placement are recorded as unplaced and are not part of the round.
    pub fn from_parts<S: AsRef<str>>(
        words: &[S],
        grid: Grid,
        placements: Placements,
    ) -> GameResult<Self> {
        let words = normalize_word_list(words)?;
        let (active, unplaced): (Vec<String>, Vec<String>) = words
            .into_iter()
            .partition(|word| placements.contains_key(word));

        if active.is_empty() {
            return Err(GameError::NothingPlaced);
        }

        let round = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            words: active,
            unplaced,
            grid,
            placements,
            found: HashSet::new(),
            found_records: Vec::new(),
            scorer: Scorer::new(),
            timer: TimerState::Idle,
            elapsed_seconds: 0,
        };

        tracing::info!(
            "Round {} ready with {} words on a {}x{} grid",
            round.id,
            round.words.len(),
            round.grid.size(),
            round.grid.size()
        );

        Ok(round)
    }

    /// Check a finished selection against the round's words.
    ///
    /// A match marks the word found, logs its duration and starts the clock
    /// on the first find. The find that completes the list stops the clock
    /// and carries the round summary. Anything else leaves the round untouched.
    pub fn validate(&mut self, path: &[Position]) -> SelectionOutcome {
        if self.is_complete() {
            return SelectionOutcome::NoMatch;
        }

        let Some(found) = WordValidator::find_match(&self.grid, path, &self.words, &self.found)
        else {
            return SelectionOutcome::NoMatch;
        };

        let duration = self.scorer.record_find(self.elapsed_seconds);
        if self.timer == TimerState::Idle {
            self.timer = TimerState::Running;
        }

        let record = FoundRecord {
            word: found.word.clone(),
            start: path[0],
            end: path[path.len() - 1],
            color: Scorer::color_for(found.index).to_string(),
            reversed: found.reversed,
            duration_seconds: duration,
            elapsed_seconds: self.elapsed_seconds,
            found_at: Utc::now(),
        };
        self.found.insert(found.word);
        self.found_records.push(record.clone());

        tracing::debug!(
            "Round {}: found {} ({}/{}) in {}s",
            self.id,
            record.word,
            self.found.len(),
            self.words.len(),
            duration
        );

        let completed = if self.found.len() == self.words.len() {
            self.timer = TimerState::Stopped;
            let summary = self.summary();
            tracing::info!(
                "Round {} complete in {}s, average {:.2}s per word",
                self.id,
                summary.total_seconds,
                summary.average_seconds
            );
            Some(summary)
        } else {
            None
        };

        SelectionOutcome::Found { record, completed }
    }

    /// Advance the round clock by one second. Returns the new elapsed time,
    /// or `None` if the clock is not running.
    pub fn tick(&mut self) -> Option<u64> {
        if self.timer != TimerState::Running {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(self.elapsed_seconds)
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            round_id: self.id,
            total_seconds: self.elapsed_seconds,
            average_seconds: self.scorer.average_time(),
            word_times: self.scorer.word_times().to_vec(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Words to find this round, in display order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placements(&self) -> &Placements {
        &self.placements
    }

    pub fn found(&self) -> &HashSet<String> {
        &self.found
    }

    /// Found words in list order
    pub fn found_words(&self) -> Vec<String> {
        self.words
            .iter()
            .filter(|word| self.found.contains(*word))
            .cloned()
            .collect()
    }

    pub fn found_records(&self) -> &[FoundRecord] {
        &self.found_records
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer == TimerState::Running
    }

    pub fn is_complete(&self) -> bool {
        self.timer == TimerState::Stopped
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
}
