use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// How a claimed play was (or wasn't) contested.
///
/// On the wire this is split into the `was_challenged` / `result` field pair
/// of the challenge action, where `result` is `null` exactly when no
/// challenge happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ChallengeOutcomeWire", try_from = "ChallengeOutcomeWire")]
pub enum ChallengeOutcome {
    NotChallenged,
    /// The challenger called the bluff and was right.
    Succeeded,
    /// The challenger called the bluff and was wrong.
    Failed,
}

impl ChallengeOutcome {
    pub fn was_challenged(self) -> bool {
        !matches!(self, ChallengeOutcome::NotChallenged)
    }

    pub fn result(self) -> Option<bool> {
        match self {
            ChallengeOutcome::NotChallenged => None,
            ChallengeOutcome::Succeeded => Some(true),
            ChallengeOutcome::Failed => Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ChallengeOutcomeWire {
    was_challenged: bool,
    result: Option<bool>,
}

impl From<ChallengeOutcome> for ChallengeOutcomeWire {
    fn from(outcome: ChallengeOutcome) -> Self {
        ChallengeOutcomeWire {
            was_challenged: outcome.was_challenged(),
            result: outcome.result(),
        }
    }
}

impl TryFrom<ChallengeOutcomeWire> for ChallengeOutcome {
    type Error = String;

    fn try_from(wire: ChallengeOutcomeWire) -> Result<Self, Self::Error> {
        match (wire.was_challenged, wire.result) {
            (false, None) => Ok(ChallengeOutcome::NotChallenged),
            (true, Some(true)) => Ok(ChallengeOutcome::Succeeded),
            (true, Some(false)) => Ok(ChallengeOutcome::Failed),
            (false, Some(_)) => Err("unchallenged action carries a challenge result".to_string()),
            (true, None) => Err("challenge is missing its result".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayAction {
    pub player: String,
    pub played_cards: Vec<String>,
    pub remaining_cards: Vec<String>,
    /// The claim the player stated for the play.
    pub play_reason: String,
    /// Behavior-classification tag assigned by the acting agent.
    pub behavior: String,
    pub next_player: String,
    pub play_thinking: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeAction {
    #[serde(flatten)]
    pub outcome: ChallengeOutcome,
    pub reason: String,
    pub challenge_thinking: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootingAction {
    pub shooter: String,
    pub bullet_hit: bool,
    pub timestamp: DateTime<Utc>,
}

/// One entry in a round's append-only action sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Play(PlayAction),
    Challenge(ChallengeAction),
    Shooting(ShootingAction),
}

impl Action {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Action::Play(play) => play.timestamp,
            Action::Challenge(challenge) => challenge.timestamp,
            Action::Shooting(shooting) => shooting.timestamp,
        }
    }

    /// One-line prompt description, second person when `viewer` is the actor.
    pub fn describe(&self, viewer: &str) -> String {
        match self {
            Action::Play(play) => {
                let cards = play.played_cards.iter().join(", ");
                if play.player == viewer {
                    format!("you played {cards}")
                } else {
                    format!("{} played {cards}", play.player)
                }
            }
            Action::Challenge(challenge) => match challenge.outcome {
                ChallengeOutcome::NotChallenged => "no challenge".to_string(),
                ChallengeOutcome::Succeeded => "challenge succeeded".to_string(),
                ChallengeOutcome::Failed => "challenge failed".to_string(),
            },
            Action::Shooting(shooting) => {
                let result = if shooting.bullet_hit { "hit" } else { "miss" };
                format!("{} fired the gun, {result}", shooting.shooter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
    }

    #[test]
    fn play_action_is_tagged_on_the_wire() {
        let action = Action::Play(PlayAction {
            player: "A".to_string(),
            played_cards: vec!["Q♠".to_string()],
            remaining_cards: vec!["K♦".to_string()],
            play_reason: "bluff".to_string(),
            behavior: "aggressive".to_string(),
            next_player: "B".to_string(),
            play_thinking: "thinking...".to_string(),
            timestamp: timestamp(),
        });

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "play");
        assert_eq!(value["played_cards"][0], "Q♠");
    }

    #[test]
    fn challenge_outcome_flattens_into_field_pair() {
        let action = Action::Challenge(ChallengeAction {
            outcome: ChallengeOutcome::Failed,
            reason: "suspicious".to_string(),
            challenge_thinking: "...".to_string(),
            timestamp: timestamp(),
        });

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "challenge");
        assert_eq!(value["was_challenged"], true);
        assert_eq!(value["result"], false);

        let decoded: Action = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, action);
    }

    #[test]
    fn unchallenged_outcome_serializes_null_result() {
        let value = serde_json::to_value(ChallengeOutcome::NotChallenged).unwrap();
        assert_eq!(value["was_challenged"], false);
        assert!(value["result"].is_null());
    }

    #[test]
    fn challenge_without_result_is_rejected() {
        let wire = serde_json::json!({ "was_challenged": true, "result": null });
        assert!(serde_json::from_value::<ChallengeOutcome>(wire).is_err());
    }

    #[test]
    fn describe_switches_to_second_person_for_the_viewer() {
        let action = Action::Play(PlayAction {
            player: "A".to_string(),
            played_cards: vec!["Q♠".to_string(), "Q♥".to_string()],
            remaining_cards: vec![],
            play_reason: String::new(),
            behavior: String::new(),
            next_player: "B".to_string(),
            play_thinking: String::new(),
            timestamp: timestamp(),
        });

        assert_eq!(action.describe("A"), "you played Q♠, Q♥");
        assert_eq!(action.describe("B"), "A played Q♠, Q♥");
    }
}
