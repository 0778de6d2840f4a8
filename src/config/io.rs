//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;
use crate::storage::atomic_write;

impl Config {
    /// Get the global config directory path (~/.habit-idle/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".habit-idle")
    }

    /// Get the global config file path (~/.habit-idle/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration with atomic write and file locking
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        atomic_write(path, &content)
    }

    /// Load configuration from `path`, or the global config when `None`.
    /// A missing file is created with defaults first.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(Self::global_config_path, Path::to_path_buf);

        if !path.exists() {
            Self::default().save_to_file(&path)?;
            eprintln!("Created {}", path.display());
        }

        Self::from_file(&path)
    }

    /// Load global configuration from ~/.habit-idle/config.toml
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = Config::load_from(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.key_prefix, "lgh_");
        assert_eq!(config.player.default_name, "Player");
        assert_eq!(config.display.trend_days, 30);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/tmp/hi\"\n\n[player]\ndefault_name = \"Sam\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/hi"));
        assert_eq!(config.storage.key_prefix, "lgh_");
        assert_eq!(config.player.default_name, "Sam");
        assert_eq!(config.player.default_avatar, "🎮");
        assert_eq!(config.engine_options().default_player_name, "Sam");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.display.trend_days = 7;
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{err}").contains("config.toml"));
    }
}
