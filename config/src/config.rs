use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use tabking_types::DEFAULT_DWELL_THRESHOLD;

/// Shortest dwell threshold the config may set.
pub const MIN_DWELL_THRESHOLD: Duration = Duration::from_millis(100);

#[derive(Debug, Default, Deserialize)]
pub struct TabkingConfig {
    pub storage: Option<StorageConfig>,
    pub drag: Option<DragConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted slots. A leading `~` is expanded.
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DragConfig {
    /// Hover time in milliseconds before a drag arms merge intent.
    pub dwell_threshold_ms: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl TabkingConfig {
    /// Load `~/.tabking/config.toml`. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Failed to read config: {err}");
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!(path = %path.display(), "Failed to parse config: {err}");
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Where the slots live. `cli_override` wins over the config file.
    #[must_use]
    pub fn data_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(dir) = cli_override {
            return dir.to_path_buf();
        }
        self.storage
            .as_ref()
            .and_then(|storage| storage.data_dir.as_deref())
            .map(expand_home)
            .unwrap_or_else(default_data_dir)
    }

    #[must_use]
    pub fn dwell_threshold(&self) -> Duration {
        self.drag
            .as_ref()
            .and_then(|drag| drag.dwell_threshold_ms)
            .map(|ms| Duration::from_millis(ms).max(MIN_DWELL_THRESHOLD))
            .unwrap_or(DEFAULT_DWELL_THRESHOLD)
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tabking").join("config.toml"))
}

#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tabking"))
        .unwrap_or_else(|| PathBuf::from(".tabking"))
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(raw),
    }
}
