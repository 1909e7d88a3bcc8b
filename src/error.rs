use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("grid size must be at least 2, got {0}")]
    InvalidGridSize(usize),

    #[error("word list is empty")]
    EmptyWordList,

    #[error("none of the words could be placed on the grid")]
    NothingPlaced,

    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },

    #[error("word {0:?} appears more than once")]
    DuplicateWord(String),

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),

    #[error("cell ({row}, {col}) is outside a {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("failed to read theme file: {0}")]
    ThemeIo(#[from] std::io::Error),

    #[error("failed to parse theme file: {0}")]
    ThemeParse(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
