use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};

/// Best-effort persistence for the best score seen so far.
pub trait HighScoreStore {
    fn load(&mut self) -> Result<u32, String>;
    fn save(&mut self, score: u32) -> Result<(), String>;
}

#[derive(Debug, Default)]
pub struct InMemoryHighScoreStore {
    value: u32,
    saves: u32,
}

impl InMemoryHighScoreStore {
    pub fn new(value: u32) -> Self {
        Self { value, saves: 0 }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn load(&mut self) -> Result<u32, String> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        self.value = score;
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Keeps the score in a small YAML document (`high_score: 12`). A missing
/// document reads as 0.
pub struct FileHighScoreStore<TProvider = FileContentConfigProvider>
where
    TProvider: ConfigContentProvider,
{
    provider: TProvider,
    serializer: YamlConfigSerializer,
}

impl FileHighScoreStore<FileContentConfigProvider> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_provider(FileContentConfigProvider::new(path))
    }
}

impl<TProvider> FileHighScoreStore<TProvider>
where
    TProvider: ConfigContentProvider,
{
    pub fn with_provider(provider: TProvider) -> Self {
        Self {
            provider,
            serializer: YamlConfigSerializer::new(),
        }
    }
}

impl<TProvider> HighScoreStore for FileHighScoreStore<TProvider>
where
    TProvider: ConfigContentProvider,
{
    fn load(&mut self) -> Result<u32, String> {
        let Some(content) = self.provider.get_config_content()? else {
            return Ok(0);
        };
        let record: HighScoreRecord = self.serializer.deserialize(&content)?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        let content = self
            .serializer
            .serialize(&HighScoreRecord { high_score: score })?;
        self.provider.set_config_content(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_high_score_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_reads_as_zero() {
        let mut store = FileHighScoreStore::new(get_temp_file_path());
        assert_eq!(store.load(), Ok(0));
    }

    #[test]
    fn test_saved_score_survives_a_new_store() {
        let path = get_temp_file_path();
        let mut store = FileHighScoreStore::new(&path);
        store.save(17).unwrap();

        let mut reopened = FileHighScoreStore::new(&path);
        assert_eq!(reopened.load(), Ok(17));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_garbage_content_is_an_error() {
        let path = get_temp_file_path();
        std::fs::write(&path, "high_score: lots").unwrap();

        let mut store = FileHighScoreStore::new(&path);
        assert!(store.load().is_err());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_in_memory_store_counts_saves() {
        let mut store = InMemoryHighScoreStore::new(3);
        assert_eq!(store.load(), Ok(3));
        store.save(9).unwrap();
        assert_eq!(store.value(), 9);
        assert_eq!(store.saves(), 1);
    }
}
