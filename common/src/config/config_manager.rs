use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a single config document.
///
/// A missing document yields `TConfig::default()` and is not cached, so a file
/// written later by someone else is still picked up on the next read.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.as_ref()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut cached = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized)?;

        let mut cached = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *cached = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::SnakeSettings;

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_settings_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_returns_default() {
        let manager: ConfigManager<_, SnakeSettings> =
            ConfigManager::from_yaml_file("this_settings_file_does_not_exist.yaml");
        let loaded = manager.get_config().unwrap();
        assert_eq!(loaded, SnakeSettings::default());
    }

    #[test]
    fn test_set_then_get_returns_same_settings() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, SnakeSettings> = ConfigManager::from_yaml_file(&path);
        let settings = SnakeSettings {
            cols: 30,
            rows: 12,
            ..SnakeSettings::default()
        };

        manager.set_config(&settings).unwrap();
        assert_eq!(manager.get_config().unwrap(), settings);

        let fresh: ConfigManager<_, SnakeSettings> = ConfigManager::from_yaml_file(&path);
        assert_eq!(fresh.get_config().unwrap(), settings);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_settings_are_rejected_on_write() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, SnakeSettings> = ConfigManager::from_yaml_file(&path);
        let settings = SnakeSettings {
            base_speed: 0.0,
            ..SnakeSettings::default()
        };

        assert!(manager.set_config(&settings).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_settings_are_rejected_on_read() {
        let path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(&path);
        provider
            .set_config_content(
                "cols: 2\nrows: 20\ninitial_length: 3\nbase_speed: 6.0\nspeed_step: 0.4\n",
            )
            .unwrap();

        let manager: ConfigManager<_, SnakeSettings> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        let result = manager.get_config();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("validation"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<SnakeSettings, String> = serializer.deserialize("cols: [not a number");
        assert!(result.is_err());
    }
}
