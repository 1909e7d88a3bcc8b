// Game engine modules

pub mod grid;
pub mod round;
pub mod scorer;
pub mod selection;
pub mod validator;

pub use grid::{Board, GeneratedGrid, GeneratorConfig, GridGenerator, PlacementOutcome};
pub use round::{RoundConfig, RoundState, SelectionOutcome, TimerState};
pub use scorer::Scorer;
pub use selection::SelectionTracker;
pub use validator::{SelectionMatch, WordValidator};
