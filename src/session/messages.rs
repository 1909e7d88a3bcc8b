use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{FoundRecord, Position, RoundSummary};

/// Messages sent from the input surface to the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    ListThemes,
    SelectTheme {
        theme: String,
    },
    StartGame,
    PointerDown {
        row: usize,
        col: usize,
    },
    PointerEnter {
        row: usize,
        col: usize,
    },
    PointerUp,
}

/// Messages sent from the game to the presentation surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Themes {
        themes: Vec<ThemeInfo>,
        selected: String,
    },
    RoundStarted {
        round_id: Uuid,
        theme: String,
        size: usize,
        grid: Vec<String>,
        words: Vec<WordInfo>,
        /// Words from the theme sample that could not be fitted on this grid
        unplaced: Vec<String>,
    },
    /// Cells currently highlighted by a drag; empty once the drag ends
    Selection {
        cells: Vec<Position>,
    },
    WordFound {
        record: FoundRecord,
        found_words: Vec<String>,
    },
    TimerTick {
        round_id: Uuid,
        elapsed_seconds: u64,
    },
    RoundComplete {
        summary: RoundSummary,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeInfo {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_wire_format() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"pointer_down","row":3,"col":4}"#).unwrap();
        assert!(matches!(msg, ClientMessage::PointerDown { row: 3, col: 4 }));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"pointer_up"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::PointerUp));

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"fly"}"#).is_err());
    }

    #[test]
    fn test_server_message_is_tagged() {
        let json = serde_json::to_value(ServerMessage::Selection {
            cells: vec![Position::new(0, 1)],
        })
        .unwrap();
        assert_eq!(json["type"], "selection");
        assert_eq!(json["cells"][0]["col"], 1);
    }
}
