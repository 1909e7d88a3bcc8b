use anyhow::Result;

use crate::models::{FoundRecord, RoundSummary};

/// Side effects for game events: a sound on a find, a dialog on completion.
///
/// Failures are logged by the session and never reach game state.
pub trait Notifier: Send {
    fn word_found(&mut self, record: &FoundRecord) -> Result<()>;

    fn round_complete(&mut self, summary: &RoundSummary) -> Result<()>;
}

/// Writes notifications to the log. Used when no presentation layer plays sounds.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn word_found(&mut self, record: &FoundRecord) -> Result<()> {
        tracing::info!("Found {} in {}s", record.word, record.duration_seconds);
        Ok(())
    }

    fn round_complete(&mut self, summary: &RoundSummary) -> Result<()> {
        tracing::info!(
            "Congrats! All words found in {} seconds (avg {:.2}s per word)",
            summary.total_seconds,
            summary.average_seconds
        );
        Ok(())
    }
}
