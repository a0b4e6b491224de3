/// Replay configuration
use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use soul_wrapped::SessionConfig;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "soul-replay.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputSettings {
    /// Pretty-print the JSON results
    #[serde(default)]
    pub pretty: bool,
}

impl ReplayConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `soul-replay.toml` is read
    /// when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. SOUL_REPLAY_SESSION__WRAPPED_LIMIT=3
        settings = settings.add_source(
            config::Environment::with_prefix("SOUL_REPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ReplayError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| ReplayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.session.wrapped_limit == 0 {
            return Err(ReplayError::Config(
                "session.wrapped_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_without_file() {
        let config = ReplayConfig::default();
        assert_eq!(config.session.wrapped_limit, 5);
        assert!(!config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.toml");
        fs::write(&path, "[session]\nwrapped_limit = 3\n\n[output]\npretty = true\n").unwrap();

        let config = ReplayConfig::load(Some(&path)).unwrap();
        assert_eq!(config.session.wrapped_limit, 3);
        assert!(config.output.pretty);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.toml");
        fs::write(&path, "[output]\npretty = true\n").unwrap();

        let config = ReplayConfig::load(Some(&path)).unwrap();
        assert_eq!(config.session.wrapped_limit, 5);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReplayConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ReplayError::Config(_))));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.toml");
        fs::write(&path, "[session]\nwrapped_limit = 0\n").unwrap();

        assert!(matches!(
            ReplayConfig::load(Some(&path)),
            Err(ReplayError::Config(_))
        ));
    }
}
