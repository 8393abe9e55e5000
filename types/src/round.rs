use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Each player's free-text impression of every other player, captured once
/// at round start.
pub type PlayerOpinions = BTreeMap<String, BTreeMap<String, String>>;

/// Per-player snapshot taken at round start. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInitialState {
    pub player_name: String,
    pub bullet_position: u32,
    pub current_gun_position: u32,
    pub initial_hand: Vec<String>,
}

/// One sealed round of the game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_id: u32,
    pub target_card: String,
    pub round_players: Vec<String>,
    pub starting_player: String,
    pub player_initial_states: Vec<PlayerInitialState>,
    pub player_opinions: PlayerOpinions,
    pub actions: Vec<Action>,
    /// Reserved for summarized outcome data; nothing writes it yet.
    pub results: serde_json::Map<String, serde_json::Value>,
}
