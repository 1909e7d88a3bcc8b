/// Colours handed out to found words, cycled by the word's index in the round's list
pub const WORD_COLORS: [&str; 5] = ["#FF5733", "#33FF57", "#3357FF", "#FF33A1", "#FFC300"];

/// Per-word timing for a round.
///
/// Durations are whole seconds measured on the round clock: the first find is
/// timed from the round start, every later one from the find before it.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    word_times: Vec<u64>,
    last_find_at: u64,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a find at `elapsed` seconds and return how long it took.
    pub fn record_find(&mut self, elapsed: u64) -> u64 {
        let duration = elapsed.saturating_sub(self.last_find_at);
        self.word_times.push(duration);
        self.last_find_at = elapsed;
        duration
    }

    pub fn word_times(&self) -> &[u64] {
        &self.word_times
    }

    pub fn average_time(&self) -> f64 {
        Self::average(&self.word_times)
    }

    /// Arithmetic mean, 0 for an empty log
    pub fn average(durations: &[u64]) -> f64 {
        if durations.is_empty() {
            0.0
        } else {
            durations.iter().sum::<u64>() as f64 / durations.len() as f64
        }
    }

    pub fn color_for(index: usize) -> &'static str {
        WORD_COLORS[index % WORD_COLORS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_durations() {
        assert_eq!(Scorer::average(&[3, 5, 4]), 4.0);
        assert_eq!(Scorer::average(&[1, 2]), 1.5);
    }

    #[test]
    fn test_average_of_empty_log_is_zero() {
        assert_eq!(Scorer::average(&[]), 0.0);
        assert_eq!(Scorer::new().average_time(), 0.0);
    }

    #[test]
    fn test_record_find_measures_since_previous_find() {
        let mut scorer = Scorer::new();
        assert_eq!(scorer.record_find(0), 0, "First find is timed from the round start");
        assert_eq!(scorer.record_find(3), 3);
        assert_eq!(scorer.record_find(8), 5);
        assert_eq!(scorer.record_find(12), 4);
        assert_eq!(scorer.word_times(), &[0, 3, 5, 4]);
        assert_eq!(scorer.average_time(), 3.0);
    }

    #[test]
    fn test_colors_cycle_through_palette() {
        assert_eq!(Scorer::color_for(0), "#FF5733");
        assert_eq!(Scorer::color_for(4), "#FFC300");
        assert_eq!(Scorer::color_for(5), "#FF5733");
        assert_eq!(Scorer::color_for(7), "#3357FF");
    }
}
