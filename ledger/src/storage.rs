use std::fs;
use std::path::{Path, PathBuf};

use types::GameRecord;

use crate::config::StorageConfig;
use crate::error::LedgerError;

/// Writes the finished record as pretty-printed JSON (2-space indent,
/// non-ASCII text left verbatim), creating the records directory if needed.
/// The record is small enough to write in one pass; no partial-write
/// recovery is attempted.
pub fn save_record(config: &StorageConfig, record: &GameRecord) -> Result<PathBuf, LedgerError> {
    fs::create_dir_all(&config.records_dir)?;
    let path = config.records_dir.join(format!("{}.json", record.game_id));
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json)?;
    tracing::info!("game record saved to {}", path.display());
    Ok(path)
}

/// Reads a persisted record back, for offline analysis and tests.
pub fn load_record(path: impl AsRef<Path>) -> Result<GameRecord, LedgerError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(dir.path().join("records"));
        let record = GameRecord::new("20260824_093000");

        let path = save_record(&config, &record).unwrap();
        assert_eq!(path, config.records_dir.join("20260824_093000.json"));

        let loaded = load_record(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn output_is_two_space_indented() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(dir.path());
        let record = GameRecord::new("indent_check");

        let path = save_record(&config, &record).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("{\n  \"game_id\""));
    }
}
