//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$CINDY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cindy/config.toml`
//! 3. `~/.cindy/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/cindy/config.toml`.
//!
//! # Validation
//!
//! Repo config values are validated after parsing. The global config holds
//! only a boolean and needs no check beyond deserialization.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// sync_tags = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Mirror label tags to the remote
    pub sync_tags: Option<bool>,
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// remote = "origin"
/// sync_tags = false
/// manifest_path = ".cindy/manifest.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Remote name (default: "origin")
    pub remote: Option<String>,

    /// Mirror label tags to the remote; overrides the global setting
    pub sync_tags: Option<bool>,

    /// Manifest location relative to the repository root
    pub manifest_path: Option<String>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            if remote.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "remote cannot be empty".to_string(),
                ));
            }
        }

        if let Some(manifest_path) = &self.manifest_path {
            if manifest_path.is_empty() || Path::new(manifest_path).is_absolute() {
                return Err(ConfigError::InvalidValue(format!(
                    "manifest_path must be a relative path, got '{}'",
                    manifest_path
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = GlobalConfig::default();
            assert!(config.sync_tags.is_none());
        }

        #[test]
        fn parse() {
            let config: GlobalConfig = toml::from_str("sync_tags = false").unwrap();
            assert_eq!(config.sync_tags, Some(false));
        }

        #[test]
        fn unknown_fields_rejected() {
            let result: Result<GlobalConfig, _> = toml::from_str("trunk = \"main\"");
            assert!(result.is_err());
        }
    }

    mod repo_config {
        use super::*;

        #[test]
        fn parse_full() {
            let toml = r#"
remote = "upstream"
sync_tags = true
manifest_path = "deploy/manifest.json"
"#;
            let config: RepoConfig = toml::from_str(toml).unwrap();
            assert_eq!(config.remote.as_deref(), Some("upstream"));
            assert_eq!(config.sync_tags, Some(true));
            assert_eq!(config.manifest_path.as_deref(), Some("deploy/manifest.json"));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn empty_remote_rejected() {
            let config = RepoConfig {
                remote: Some(String::new()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn absolute_manifest_path_rejected() {
            let config = RepoConfig {
                manifest_path: Some("/etc/manifest.json".into()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn serialize_roundtrip() {
            let config = RepoConfig {
                remote: Some("origin".into()),
                sync_tags: Some(false),
                manifest_path: None,
            };
            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: RepoConfig = toml::from_str(&toml).unwrap();
            assert_eq!(parsed, config);
        }
    }
}
