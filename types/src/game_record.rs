use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::round::Round;

/// Root record of one game session. Rounds are appended as they seal; the
/// winner and end time stay unset until the game finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub players: Vec<String>,
    pub winner: Option<String>,
    pub rounds: Vec<Round>,
}

impl GameRecord {
    pub fn new(game_id: impl Into<String>) -> Self {
        GameRecord {
            game_id: game_id.into(),
            start_time: Utc::now(),
            end_time: None,
            players: Vec::new(),
            winner: None,
            rounds: Vec::new(),
        }
    }
}
