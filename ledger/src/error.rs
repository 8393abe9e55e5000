use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("game has not been started")]
    GameNotStarted,

    #[error("no round is open")]
    NoOpenRound,

    #[error("game record is already sealed")]
    GameFinished,

    #[error("failed to write game record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode game record: {0}")]
    Serialization(#[from] serde_json::Error),
}
