//! Engine configuration.

use crate::error::ConfigError;
use crate::strategy::RandomStrategy;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunables for the game engine, loadable from TOML.
///
/// ```toml
/// opponent_delay_ms = 800
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pause before the opponent's move is applied, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Seed for the random opponent. Entropy-seeded when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_opponent_delay_ms() -> u64 {
    800
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: default_opponent_delay_ms(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            opponent_delay_ms = config.opponent_delay_ms,
            seeded = config.seed.is_some(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Replaces the opponent delay.
    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Pause before the opponent's move.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Builds the random opponent this config describes.
    pub fn strategy(&self) -> RandomStrategy {
        match self.seed {
            Some(seed) => RandomStrategy::seeded(seed),
            None => RandomStrategy::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.opponent_delay(), Duration::from_millis(800));
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_from_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(*config.opponent_delay_ms(), 800);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "opponent_delay_ms = \"soon\"").unwrap();

        let err = EngineConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/strictly_solo.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_opponent_delay(Duration::from_millis(25))
            .with_seed(Some(3));
        assert_eq!(*config.opponent_delay_ms(), 25);
        assert_eq!(*config.seed(), Some(3));
    }
}
