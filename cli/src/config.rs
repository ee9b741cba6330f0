use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{ConfigStore, Validate};
use tictactoe_engine::games::tictactoe::SessionSettings;

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";
const MAX_BOT_DELAY_MS: u64 = 10_000;

pub fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_store(path: Option<PathBuf>) -> ConfigStore<CliConfig> {
    ConfigStore::new(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CliConfig {
    pub session: SessionSettings,
    #[serde(default = "default_bot_delay_ms")]
    pub bot_delay_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bot_delay_ms() -> u64 {
    500
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<(), String> {
        self.session.validate()?;
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "Bot delay must not exceed {} ms, got {}",
                MAX_BOT_DELAY_MS, self.bot_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            bot_delay_ms: default_bot_delay_ms(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::config::{from_yaml, to_yaml};
    use tictactoe_engine::games::tictactoe::{Difficulty, GameMode};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_cli_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = CliConfig::default();
        let serialized = to_yaml(&default_config).unwrap();
        let deserialized: CliConfig = from_yaml(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_store() {
        let path = get_temp_file_path();
        let store = get_config_store(Some(path.clone()));
        let config = CliConfig {
            session: SessionSettings {
                mode: GameMode::Multi,
                difficulty: Difficulty::Hard,
                grid_size: 4,
                search_node_budget: 50_000,
            },
            bot_delay_ms: 0,
            seed: Some(7),
        };

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_minimal_file_fills_defaults() {
        let content = "session:\n  mode: single\n  difficulty: hard\n  grid_size: 3\n";
        let config: CliConfig = from_yaml(content).unwrap();
        assert_eq!(config.bot_delay_ms, 500);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_excessive_delay_is_invalid() {
        let config = CliConfig {
            bot_delay_ms: MAX_BOT_DELAY_MS + 1,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
