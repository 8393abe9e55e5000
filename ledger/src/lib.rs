pub mod config;
pub mod error;
pub mod ledger;
pub mod prompts;
pub mod storage;

pub use config::StorageConfig;
pub use error::LedgerError;
pub use ledger::RoundLedger;
pub use storage::{load_record, save_record};
