//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a JSON configuration file
pub const CONFIG_ENV_VAR: &str = "LIFE_CONFIG";

/// Application configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Share of cells seeded alive (0 to 100)
    pub fill_percentage: u32,
    /// Pause between generations (milliseconds)
    pub tick_interval_ms: u64,
    /// Random seed for reproducibility; drawn fresh when absent
    pub seed: Option<u64>,
    /// State file to start from instead of random seeding
    pub initial_state: Option<PathBuf>,
    /// Where to write the last generation on exit
    pub save_path: Option<PathBuf>,
    /// Stop after this many generations
    pub max_generations: Option<u64>,
    /// Clear the terminal before every frame
    pub clear_screen: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            fill_percentage: 40,
            tick_interval_ms: 100,
            seed: None,
            initial_state: None,
            save_path: None,
            max_generations: None,
            clear_screen: true,
        }
    }
}

impl AppConfig {
    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `LIFE_CONFIG`, or fall back to defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 1 || self.height < 1 {
            return Err(Error::Validation(format!(
                "grid must be at least 1x1, got {}x{}",
                self.height, self.width
            )));
        }
        if self.fill_percentage > 100 {
            return Err(Error::Validation(format!(
                "fill_percentage must be at most 100, got {}",
                self.fill_percentage
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.width, 50);
        assert_eq!(config.height, 50);
        assert_eq!(config.fill_percentage, 40);
        assert_eq!(config.tick_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"width": 8, "seed": 7}"#).unwrap();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 50);
        assert_eq!(config.seed, Some(7));
        assert!(config.clear_screen);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = AppConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let config = AppConfig {
            fill_percentage: 101,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("life-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = AppConfig::from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file("/nonexistent/life/config.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
