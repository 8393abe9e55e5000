use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;
use types::{
    Action, ChallengeAction, ChallengeOutcome, GameRecord, PlayAction, PlayerInitialState,
    PlayerOpinions, Round, ShootingAction,
};

use crate::config::StorageConfig;
use crate::error::LedgerError;
use crate::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Active,
    Finished,
}

/// The one mutable round. Everything already in `GameRecord.rounds` is
/// sealed and immutable.
#[derive(Debug)]
pub(crate) struct OpenRound {
    pub(crate) round: Round,
    state_index: HashMap<String, usize>,
}

impl OpenRound {
    fn new(round: Round) -> Self {
        let state_index = round
            .player_initial_states
            .iter()
            .enumerate()
            .map(|(index, state)| (state.player_name.clone(), index))
            .collect();
        Self { round, state_index }
    }

    pub(crate) fn initial_state(&self, player: &str) -> Option<&PlayerInitialState> {
        self.state_index
            .get(player)
            .map(|&index| &self.round.player_initial_states[index])
    }

    pub(crate) fn opinion_of(&self, player: &str, other: &str) -> Option<&str> {
        self.round
            .player_opinions
            .get(player)
            .and_then(|opinions| opinions.get(other))
            .map(String::as_str)
    }
}

/// Single-writer recorder for one game session.
///
/// The surrounding engine drives it through `start_game`, `start_round`,
/// the `record_*` calls, and finally `finish_game`, which seals the last
/// round and persists the whole record. The ledger never validates game
/// rules; it records the facts it is told, in call order.
pub struct RoundLedger {
    config: StorageConfig,
    record: GameRecord,
    pub(crate) open_round: Option<OpenRound>,
    phase: Phase,
}

impl RoundLedger {
    pub fn new(game_id: impl Into<String>, config: StorageConfig) -> Self {
        Self {
            config,
            record: GameRecord::new(game_id),
            open_round: None,
            phase: Phase::Created,
        }
    }

    /// Convenience constructor with a `YYYYMMDD_HHMMSS` session id.
    pub fn with_timestamp_id(config: StorageConfig) -> Self {
        let game_id = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        Self::new(game_id, config)
    }

    pub fn game_id(&self) -> &str {
        &self.record.game_id
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Records the seating roster. Calling it again before any round starts
    /// overwrites the roster; the caller owns that ordering.
    pub fn start_game(&mut self, players: Vec<String>) -> Result<(), LedgerError> {
        self.ensure_mutable()?;
        self.record.players = players;
        self.phase = Phase::Active;
        Ok(())
    }

    /// Seals the open round, if any, then opens a new one with the given
    /// snapshot data and an empty action buffer.
    pub fn start_round(
        &mut self,
        round_id: u32,
        target_card: &str,
        round_players: Vec<String>,
        starting_player: &str,
        initial_states: Vec<PlayerInitialState>,
        opinions: PlayerOpinions,
    ) -> Result<(), LedgerError> {
        self.ensure_mutable()?;
        if self.phase == Phase::Created {
            return Err(LedgerError::GameNotStarted);
        }
        self.seal_open_round();
        let round = Round {
            round_id,
            target_card: target_card.to_string(),
            round_players,
            starting_player: starting_player.to_string(),
            player_initial_states: initial_states,
            player_opinions: opinions,
            actions: Vec::new(),
            results: serde_json::Map::new(),
        };
        tracing::debug!(round_id, "opened round");
        self.open_round = Some(OpenRound::new(round));
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record_play(
        &mut self,
        player: &str,
        played_cards: Vec<String>,
        remaining_cards: Vec<String>,
        play_reason: &str,
        behavior: &str,
        next_player: &str,
        play_thinking: &str,
    ) -> Result<(), LedgerError> {
        let action = Action::Play(PlayAction {
            player: player.to_string(),
            played_cards,
            remaining_cards,
            play_reason: play_reason.to_string(),
            behavior: behavior.to_string(),
            next_player: next_player.to_string(),
            play_thinking: play_thinking.to_string(),
            timestamp: Utc::now(),
        });
        self.push_action(action)
    }

    pub fn record_challenge(
        &mut self,
        outcome: ChallengeOutcome,
        reason: &str,
        challenge_thinking: &str,
    ) -> Result<(), LedgerError> {
        let action = Action::Challenge(ChallengeAction {
            outcome,
            reason: reason.to_string(),
            challenge_thinking: challenge_thinking.to_string(),
            timestamp: Utc::now(),
        });
        self.push_action(action)
    }

    pub fn record_shooting(&mut self, shooter: &str, bullet_hit: bool) -> Result<(), LedgerError> {
        let action = Action::Shooting(ShootingAction {
            shooter: shooter.to_string(),
            bullet_hit,
            timestamp: Utc::now(),
        });
        self.push_action(action)
    }

    /// Seals the last round, stamps winner and end time, and writes the
    /// record to storage. Terminal: every later mutation fails with
    /// `GameFinished`.
    pub fn finish_game(&mut self, winner: &str) -> Result<PathBuf, LedgerError> {
        self.ensure_mutable()?;
        if self.phase == Phase::Created {
            return Err(LedgerError::GameNotStarted);
        }
        self.seal_open_round();
        self.record.winner = Some(winner.to_string());
        self.record.end_time = Some(Utc::now());
        let path = storage::save_record(&self.config, &self.record)?;
        self.phase = Phase::Finished;
        Ok(path)
    }

    fn ensure_mutable(&self) -> Result<(), LedgerError> {
        if self.phase == Phase::Finished {
            Err(LedgerError::GameFinished)
        } else {
            Ok(())
        }
    }

    fn push_action(&mut self, action: Action) -> Result<(), LedgerError> {
        self.ensure_mutable()?;
        let open = self.open_round.as_mut().ok_or(LedgerError::NoOpenRound)?;
        open.round.actions.push(action);
        Ok(())
    }

    /// The only place a round moves from the open buffer into the permanent
    /// record; called from both `start_round` and `finish_game`.
    fn seal_open_round(&mut self) {
        if let Some(open) = self.open_round.take() {
            tracing::debug!(round_id = open.round.round_id, "sealed round");
            self.record.rounds.push(open.round);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_ledger() -> RoundLedger {
        let mut ledger = RoundLedger::new("test_game", StorageConfig::default());
        ledger
            .start_game(vec!["A".to_string(), "B".to_string()])
            .unwrap();
        ledger
    }

    fn open_round(ledger: &mut RoundLedger, round_id: u32) {
        ledger
            .start_round(
                round_id,
                "Queen",
                vec!["A".to_string(), "B".to_string()],
                "A",
                Vec::new(),
                PlayerOpinions::new(),
            )
            .unwrap();
    }

    #[test]
    fn every_started_round_but_the_open_one_is_sealed() {
        let mut ledger = active_ledger();
        for round_id in 1..=4 {
            open_round(&mut ledger, round_id);
        }
        assert_eq!(ledger.record().rounds.len(), 3);
        assert!(ledger.open_round.is_some());
    }

    #[test]
    fn round_starts_before_game_start_fail() {
        let mut ledger = RoundLedger::new("test_game", StorageConfig::default());
        let err = ledger
            .start_round(1, "Queen", Vec::new(), "A", Vec::new(), PlayerOpinions::new())
            .unwrap_err();
        assert!(matches!(err, LedgerError::GameNotStarted));
    }

    #[test]
    fn recording_without_an_open_round_fails() {
        let mut ledger = active_ledger();
        let err = ledger.record_shooting("A", false).unwrap_err();
        assert!(matches!(err, LedgerError::NoOpenRound));
    }

    #[test]
    fn actions_keep_insertion_order() {
        let mut ledger = active_ledger();
        open_round(&mut ledger, 1);
        ledger
            .record_play(
                "A",
                vec!["Q♠".to_string()],
                vec!["K♦".to_string()],
                "bluff",
                "aggressive",
                "B",
                "thinking...",
            )
            .unwrap();
        ledger
            .record_challenge(ChallengeOutcome::Failed, "suspicious", "...")
            .unwrap();
        ledger.record_shooting("B", true).unwrap();

        let actions = &ledger.open_round.as_ref().unwrap().round.actions;
        assert!(matches!(actions[0], Action::Play(_)));
        assert!(matches!(actions[1], Action::Challenge(_)));
        assert!(matches!(actions[2], Action::Shooting(_)));
    }

    #[test]
    fn finished_ledger_rejects_further_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = RoundLedger::new("terminal_check", StorageConfig::new(dir.path()));
        ledger.start_game(vec!["A".to_string()]).unwrap();
        open_round(&mut ledger, 1);
        ledger.finish_game("A").unwrap();

        assert!(ledger.is_finished());
        assert!(matches!(
            ledger.start_game(vec!["A".to_string()]).unwrap_err(),
            LedgerError::GameFinished
        ));
        assert!(matches!(
            ledger.record_shooting("A", false).unwrap_err(),
            LedgerError::GameFinished
        ));
        assert!(matches!(
            ledger.finish_game("A").unwrap_err(),
            LedgerError::GameFinished
        ));
    }

    #[test]
    fn finish_seals_the_open_round_with_its_actions() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = RoundLedger::new("seal_check", StorageConfig::new(dir.path()));
        ledger.start_game(vec!["A".to_string()]).unwrap();
        open_round(&mut ledger, 1);
        ledger.record_shooting("A", false).unwrap();
        ledger.finish_game("A").unwrap();

        let record = ledger.record();
        assert_eq!(record.rounds.len(), 1);
        assert_eq!(record.rounds[0].actions.len(), 1);
        assert_eq!(record.winner.as_deref(), Some("A"));
        assert!(record.end_time.is_some());
    }
}
