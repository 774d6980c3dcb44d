//! Registry configuration: where the backing document lives.
//! Defaults to ./data.json; override with env PLAYER_REGISTRY_DATA.

use std::path::PathBuf;

/// Environment variable that overrides the backing document path.
pub const DATA_PATH_ENV: &str = "PLAYER_REGISTRY_DATA";

/// Default backing document, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "./data.json";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    pub data_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl RegistryConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    /// Default config with the data path taken from the environment when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(DATA_PATH_ENV) {
            Some(path) if !path.trim().is_empty() => Self::new(path.trim()),
            _ => Self::default(),
        }
    }
}
