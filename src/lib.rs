pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod notify;
pub mod session;
pub mod themes;
pub mod utils;

pub use config::Config;
pub use error::{GameError, GameResult};
pub use game::{RoundConfig, RoundState, SelectionOutcome, SelectionTracker};
pub use session::{ClientMessage, GameSession, ServerMessage, SessionConfig};
pub use themes::ThemeCatalog;
