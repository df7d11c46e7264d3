//! User configuration for board.
//!
//! Read from `$XDG_CONFIG_HOME/board/config.toml` (or `~/.config/board/config.toml`).
//! Every key is optional. A missing file yields defaults; an unreadable or
//! malformed file also yields defaults, and the problem is handed back to the
//! caller so it can be logged once the subscriber is up.

use std::path::{Path, PathBuf};
use std::time::Duration;

use board_core::SortOrder;
use serde::Deserialize;

/// Environment variable that overrides `server_url` from the config file.
pub const SERVER_URL_ENV: &str = "BOARD_SERVER_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the comments service.
    pub server_url: String,
    /// Listing order requested on refresh.
    pub sort: SortOrder,
    /// Theme name, see `Theme::from_name`.
    pub theme: String,
    pub request_timeout_secs: u64,
    /// Log file. The terminal itself belongs to the UI.
    pub log_file: PathBuf,
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_owned(),
            sort: SortOrder::default(),
            theme: "catppuccin-mocha".to_owned(),
            request_timeout_secs: 10,
            log_file: PathBuf::from(".board").join("board.log"),
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// A config file that was present but could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Returns the path to the board config file.
///
/// Prefers `$XDG_CONFIG_HOME/board/config.toml`; falls back to
/// `~/.config/board/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("board").join("config.toml")
}

/// Parses the config file at `path`.
///
/// A missing file is not an error and yields `Config::default()`.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Unreadable { path: path.to_owned(), source });
        }
    };
    toml::from_str(&raw).map_err(|source| ConfigError::Invalid { path: path.to_owned(), source })
}

/// Loads the user config and applies environment overrides.
///
/// Never fails: on a bad file the defaults are used and the error is returned
/// alongside so it can be logged.
pub fn load() -> (Config, Option<ConfigError>) {
    let (mut config, warning) = match load_from(&config_path()) {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        if !url.trim().is_empty() {
            config.server_url = url;
        }
    }
    (config, warning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "server_url = \"http://comments.internal:9000\"\nsort = \"date-down\"\n",
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.server_url, "http://comments.internal:9000");
        assert_eq!(config.sort, SortOrder::DateDown);
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sort = \"sideways\"").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = Config { request_timeout_secs: 0, ..Config::default() };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
