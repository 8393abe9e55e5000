pub mod action;
pub mod game_record;
pub mod round;

pub use action::{Action, ChallengeAction, ChallengeOutcome, PlayAction, ShootingAction};
pub use game_record::GameRecord;
pub use round::{PlayerInitialState, PlayerOpinions, Round};
