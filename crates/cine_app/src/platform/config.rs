//! Optional `cinediscover.ron` configuration.
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use cine_engine::{CatalogSettings, DEFAULT_BASE_URL, IMAGE_BASE_URL};
use log::LevelFilter;
use serde::Deserialize;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "cinediscover.ron";
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub storage_dir: PathBuf,
    pub log_destination: LogDestination,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let catalog = CatalogSettings::default();
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: IMAGE_BASE_URL.to_string(),
            request_timeout_secs: catalog.request_timeout.as_secs(),
            cache_ttl_secs: catalog.cache_ttl.as_secs(),
            storage_dir: PathBuf::from(".cinediscover"),
            log_destination: LogDestination::default(),
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Replaces the API key with `env_key` when that is set and non-empty.
    pub fn with_api_key_override(mut self, env_key: Option<String>) -> Self {
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        self
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            ..CatalogSettings::default()
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Reads `path`; a missing file yields the defaults.
pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };
    ron::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::{load, AppConfig, LogDestination};

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.catalog_settings().request_timeout, Duration::from_secs(10));
        assert_eq!(config.catalog_settings().cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cinediscover.ron");
        fs::write(
            &path,
            r#"(api_key: "abc", request_timeout_secs: 3, log_destination: Both)"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.base_url, AppConfig::default().base_url);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cinediscover.ron");
        fs::write(&path, "(api_key: 42").unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn environment_key_wins_when_present() {
        let config = AppConfig {
            api_key: "from-file".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.clone().with_api_key_override(Some(" from-env ".to_string())).api_key,
            "from-env"
        );
        assert_eq!(
            config.clone().with_api_key_override(Some(String::new())).api_key,
            "from-file"
        );
        assert_eq!(config.with_api_key_override(None).api_key, "from-file");
    }
}
