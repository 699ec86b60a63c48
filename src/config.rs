// ⚙️ Scoreboard Configuration
// Tunables for the registry, loadable from a JSON file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Highest score accepted for either side of a match.
///
/// A sanity bound against typos, not a rule of the sport.
pub const DEFAULT_MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    /// Inclusive ceiling for `update_score`
    pub max_score: u32,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        ScoreboardConfig {
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl ScoreboardConfig {
    /// Load configuration from JSON file
    ///
    /// Fields left out of the file keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_ceiling() {
        assert_eq!(ScoreboardConfig::default().max_score, 100);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ScoreboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ScoreboardConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_score": 20}}"#).unwrap();

        let config = ScoreboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_score, 20);
    }

    #[test]
    fn test_from_file_errors() {
        assert!(ScoreboardConfig::from_file("/nonexistent/scoreboard.json").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ScoreboardConfig::from_file(file.path()).is_err());
    }
}
