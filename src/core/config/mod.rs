//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Cindy has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$CINDY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cindy/config.toml`
//! 3. `~/.cindy/config.toml`
//!
//! # Repo Config Location
//!
//! `<git dir>/cindy/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use cindy::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("Remote: {}", config.remote());
//! println!("Sync tags: {}", config.sync_tags());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::store::tags::DEFAULT_REMOTE;

/// Default manifest location relative to the repository root.
pub const DEFAULT_MANIFEST_PATH: &str = ".cindy/manifest.json";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: repo config overrides global config, which
/// overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo and present)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads the repo config stored inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read or parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(git_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path) = match git_dir {
            Some(dir) => Self::load_repo(dir)?,
            None => (None, None),
        };

        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $CINDY_CONFIG
        if let Ok(path) = std::env::var("CINDY_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/cindy/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("cindy/config.toml");
            if path.exists() {
                let config = read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.cindy/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".cindy/config.toml");
            if path.exists() {
                let config = read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Load repository configuration.
    fn load_repo(git_dir: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(git_dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Get the canonical path for repo config inside a git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("cindy/config.toml")
    }

    /// Path of the global config file that was loaded, if any.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the repo config file that was loaded, if any.
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the remote name.
    ///
    /// Defaults to "origin" if not configured.
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .unwrap_or(DEFAULT_REMOTE)
    }

    /// Check whether label tags are mirrored to the remote.
    ///
    /// Defaults to `true` if not configured.
    pub fn sync_tags(&self) -> bool {
        self.repo
            .as_ref()
            .and_then(|r| r.sync_tags)
            .or(self.global.sync_tags)
            .unwrap_or(true)
    }

    /// Get the manifest location relative to the repository root.
    pub fn manifest_path(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.manifest_path.as_deref())
            .unwrap_or(DEFAULT_MANIFEST_PATH)
    }
}

/// Read and parse a TOML config file.
fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
