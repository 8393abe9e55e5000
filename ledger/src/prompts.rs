//! Derived queries over the open round, rendered as prompt-ready text.
//!
//! Every query reads only the open round's buffer and snapshot data; with no
//! round open they return a sentinel or empty string, never an error. The
//! backward scans are fine here: a round's action buffer stays single-digit
//! length.

use itertools::Itertools;
use types::{Action, ChallengeOutcome};

use crate::ledger::RoundLedger;

pub const NO_ACTIONS_YET: &str = "No actions have been taken this round yet.";
pub const NO_OUTCOME_YET: &str = "No outcome this round yet.";
pub const UNKNOWN_PLAYER: &str = "don't know this player yet";

impl RoundLedger {
    /// Fixed-template header for the open round; empty when none is open.
    pub fn round_summary(&self) -> String {
        let Some(open) = &self.open_round else {
            return String::new();
        };
        let round = &open.round;
        let mut info = format!("Round: {}\n", round.round_id);
        info.push_str(&format!("Target card: {}\n", round.target_card));
        info.push_str(&format!(
            "Players this round: {}\n",
            round.round_players.iter().join(", ")
        ));
        info.push_str(&format!("Starting player: {}\n", round.starting_player));
        info
    }

    /// The open round's actions as one pipe-joined line, second person for
    /// `for_player`'s own plays. `include_latest = false` drops the
    /// most-recently-appended action, for callers describing the history
    /// leading up to an event they are still recording.
    pub fn action_log(&self, for_player: &str, include_latest: bool) -> String {
        let Some(open) = &self.open_round else {
            return NO_ACTIONS_YET.to_string();
        };
        let actions = &open.round.actions;
        let visible: &[Action] = if include_latest {
            actions
        } else {
            actions.split_last().map_or(&[], |(_, rest)| rest)
        };
        if visible.is_empty() {
            return NO_ACTIONS_YET.to_string();
        }
        visible
            .iter()
            .map(|action| action.describe(for_player))
            .join(" | ")
    }

    /// What `player` needs to decide a play against `next_player`: their
    /// opinion of them plus their own round-start snapshot. Empty when the
    /// snapshot is missing, which does not happen under correct usage.
    pub fn play_decision_context(&self, player: &str, next_player: &str) -> String {
        let Some(open) = &self.open_round else {
            return String::new();
        };
        let opinion = open.opinion_of(player, next_player).unwrap_or(UNKNOWN_PLAYER);
        let Some(state) = open.initial_state(player) else {
            return String::new();
        };
        let mut info = format!("Your impression of {next_player}: {opinion}\n");
        info.push_str(&format!(
            "Your initial hand: {}\n",
            state.initial_hand.iter().join(", ")
        ));
        info.push_str(&format!("Your bullet position: {}\n", state.bullet_position));
        info.push_str(&format!(
            "Current chamber position: {}\n",
            state.current_gun_position
        ));
        info
    }

    /// What `player` needs to decide a challenge against `target_player`.
    /// The opinion line is always present; the gun lines only when the
    /// snapshot exists. A challenge decision does not need the hand.
    pub fn challenge_decision_context(&self, player: &str, target_player: &str) -> String {
        let opinion = self
            .open_round
            .as_ref()
            .and_then(|open| open.opinion_of(player, target_player))
            .unwrap_or(UNKNOWN_PLAYER);
        let mut info = format!("Your impression of {target_player}: {opinion}\n");
        if let Some(state) = self
            .open_round
            .as_ref()
            .and_then(|open| open.initial_state(player))
        {
            info.push_str(&format!("Your bullet position: {}\n", state.bullet_position));
            info.push_str(&format!(
                "Current chamber position: {}\n",
                state.current_gun_position
            ));
        }
        info
    }

    /// Behavior tag of the most recent play this round; empty if none.
    pub fn latest_play_behavior(&self) -> String {
        let Some(open) = &self.open_round else {
            return String::new();
        };
        open.round
            .actions
            .iter()
            .rev()
            .find_map(|action| match action {
                Action::Play(play) => Some(play.behavior.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The round's outcome so far. A shooting, when present, is the terminal
    /// event of a round, so it takes priority over any earlier challenge.
    pub fn latest_round_outcome(&self, _player: &str) -> String {
        let Some(open) = &self.open_round else {
            return NO_OUTCOME_YET.to_string();
        };
        let actions = &open.round.actions;
        if let Some(shooting) = actions.iter().rev().find_map(|action| match action {
            Action::Shooting(shooting) => Some(shooting),
            _ => None,
        }) {
            let result = if shooting.bullet_hit { "hit" } else { "miss" };
            return format!(
                "Shooting result: {} fired the gun, {result}",
                shooting.shooter
            );
        }
        if let Some(outcome) = actions.iter().rev().find_map(|action| match action {
            Action::Challenge(challenge) if challenge.outcome.was_challenged() => {
                Some(challenge.outcome)
            }
            _ => None,
        }) {
            let result = if outcome == ChallengeOutcome::Succeeded {
                "succeeded"
            } else {
                "failed"
            };
            return format!("Challenge result: {result}");
        }
        NO_OUTCOME_YET.to_string()
    }
}
