use std::path::PathBuf;

const DEFAULT_RECORDS_DIR: &str = "game_records";

/// Where finished game records are written. One file per session, named by
/// game id.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub records_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(records_dir: impl Into<PathBuf>) -> Self {
        Self {
            records_dir: records_dir.into(),
        }
    }

    pub fn from_env_or_default() -> Self {
        let records_dir = std::env::var("GAME_RECORDS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_RECORDS_DIR));
        Self { records_dir }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RECORDS_DIR)
    }
}
