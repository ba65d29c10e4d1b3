use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::paths::{get_config_path, get_store_path};
use crate::view::{PeriodTab, StatusFilter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tab `show` uses when no `--period` is given.
    #[serde(default)]
    pub default_period: PeriodTab,

    #[serde(default)]
    pub default_status: StatusFilter,

    /// Overrides the location of the data store.
    #[serde(default)]
    pub store_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_period: PeriodTab::Daily,
            default_status: StatusFilter::All,
            store_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_file {
            Some(path) => Ok(path.clone()),
            None => get_store_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_period, PeriodTab::Daily);
        assert_eq!(config.default_status, StatusFilter::All);
        assert!(config.store_file.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
        default_period = "weekly"
        default_status = "in-progress"
        store_file = "/tmp/todoit.json"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_period, PeriodTab::Weekly);
        assert_eq!(config.default_status, StatusFilter::InProgress);
        assert_eq!(config.store_path().unwrap(), PathBuf::from("/tmp/todoit.json"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let toml_str = r#"
        default_period = "monthly"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_period, PeriodTab::Monthly);
        assert_eq!(config.default_status, StatusFilter::All);
    }

    #[test]
    fn test_invalid_period_is_an_error() {
        let toml_str = r#"default_period = "yearly""#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            default_period: PeriodTab::Monthly,
            default_status: StatusFilter::Complete,
            store_file: None,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
