use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::api::DEFAULT_INFO_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskConfig {
    /// Print results in logs.
    #[serde(default, alias = "DEBUG")]
    pub debug: bool,
    #[serde(default = "default_info_url")]
    pub info_url: String,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            debug: false,
            info_url: default_info_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_info_url() -> String {
    DEFAULT_INFO_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl TaskConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: TaskConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
