use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ConfigError;
use super::Validate;

pub fn to_yaml<TConfig: Serialize>(config: &TConfig) -> Result<String, ConfigError> {
    serde_yaml_ng::to_string(config).map_err(|e| ConfigError::Serialize(e.to_string()))
}

pub fn from_yaml<TConfig: DeserializeOwned>(content: &str) -> Result<TConfig, ConfigError> {
    serde_yaml_ng::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
}

/// YAML file holding one config value. A missing file reads as the default;
/// anything read or written is validated first.
pub struct ConfigStore<TConfig> {
    path: PathBuf,
    _config: PhantomData<TConfig>,
}

impl<TConfig> ConfigStore<TConfig>
where
    TConfig: Serialize + DeserializeOwned + Validate + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _config: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<TConfig, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(TConfig::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let config: TConfig = from_yaml(&content)?;
        config.validate().map_err(ConfigError::Validation)?;
        Ok(config)
    }

    pub fn save(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Validation)?;
        let content = to_yaml(config)?;
        std::fs::write(&self.path, content).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
