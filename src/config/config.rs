use crate::sequence_processor::conversion::DEFAULT_WARNING_LIMIT;
use crate::sequence_processor::writer::DEFAULT_BATCH_SIZE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;

/// Tunables read from `config.toml` in the platform config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Reads buffered between output flushes.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
    /// Identifier overflow warnings shown before they are suppressed.
    #[serde(default = "default_warning_limit")]
    pub warning_limit: usize,
}

fn default_batch_size() -> u64 {
    DEFAULT_BATCH_SIZE
}

fn default_warning_limit() -> usize {
    DEFAULT_WARNING_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            warning_limit: default_warning_limit(),
        }
    }
}

impl Config {
    /// Loads the user's config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("org", "methylctools", "methylctools") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                if let Ok(content) = fs::read_to_string(config_path) {
                    if let Ok(config) = Self::from_toml(&content) {
                        return config;
                    }
                }
            }
        }
        Config::default()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies command-line values over the loaded ones.
    pub fn with_overrides(mut self, batch_size: Option<u64>, warning_limit: Option<usize>) -> Self {
        if let Some(batch_size) = batch_size {
            self.batch_size = batch_size;
        }
        if let Some(warning_limit) = warning_limit {
            self.warning_limit = warning_limit;
        }
        self
    }
}
