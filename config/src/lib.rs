//! Configuration loading for Roster.
//!
//! Configuration lives at `~/.roster/config.toml` (overridable via
//! `ROSTER_CONFIG`). Everything is optional; a missing file is not an
//! error. The only value the rest of the system needs is the backend base
//! URL, resolved in precedence order:
//!
//! 1. `ROSTER_API_BASE_URL` environment variable
//! 2. `[api] base_url` in the config file
//! 3. [`DEFAULT_BASE_URL`]
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000/api"
//!
//! [app]
//! ascii_only = false
//! high_contrast = false
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Backend the client talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

const CONFIG_DIR: &str = ".roster";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct RosterConfig {
    pub api: Option<ApiSection>,
    pub app: Option<AppSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppSection {
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl RosterConfig {
    /// Location of the config file, honoring the `ROSTER_CONFIG` override.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        if let Ok(overridden) = env::var("ROSTER_CONFIG") {
            return Some(PathBuf::from(overridden));
        }
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the config file if one exists. `Ok(None)` when absent.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path).map(Some),
            _ => Ok(None),
        }
    }

    /// Load and parse a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve the backend base URL from env, config, then default.
#[must_use]
pub fn resolve_base_url(config: Option<&RosterConfig>) -> String {
    if let Ok(from_env) = env::var("ROSTER_API_BASE_URL") {
        let trimmed = from_env.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
        tracing::warn!("ROSTER_API_BASE_URL is set but empty; ignoring");
    }

    config
        .and_then(|config| config.api.as_ref())
        .and_then(|api| api.base_url.as_deref())
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
