//! Configuration file
//!
//! Optional JSON file; every field has a default:
//!
//! ```json
//! { "file_path": "file.json", "prompt": "(hbnb) ", "log_level": "info" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{CliError, CliResult};
use crate::console::DEFAULT_PROMPT;
use crate::storage::DEFAULT_FILE_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backing store file
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// Console prompt
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// `tracing` filter directive; `HBNB_LOG` takes precedence
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_file_path() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_PATH)
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            prompt: default_prompt(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `path` if given, otherwise defaults; `file` overrides
    /// `file_path`.
    pub fn resolve(path: Option<&Path>, file: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(file) = file {
            config.file_path = file;
            config.validate()?;
        }
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(CliError::config_error("file_path must not be empty"));
        }
        Ok(())
    }
}
