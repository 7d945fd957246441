use std::path::Path;

use serde::{Deserialize, Serialize};
use snake_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_common::games::snake::SnakeSettings;

pub const CONFIG_FILE: &str = "snake_runner_config.yaml";

pub fn get_config_manager(
    path: impl AsRef<Path>,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    pub game: SnakeSettings,
    pub frame_interval_ms: u64,
    pub games: u32,
    pub high_score_file: String,
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if !(1..=1000).contains(&self.frame_interval_ms) {
            return Err("frame_interval_ms must be between 1 and 1000".to_string());
        }
        if self.games == 0 {
            return Err("games must be greater than 0".to_string());
        }
        if self.high_score_file.trim().is_empty() {
            return Err("high_score_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            game: SnakeSettings::default(),
            frame_interval_ms: 16,
            games: 1,
            high_score_file: "snake_high_score.yaml".to_string(),
        }
    }
}
