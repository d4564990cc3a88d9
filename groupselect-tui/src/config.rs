//! Host configuration.
//!
//! Read from `config.json` in the platform config directory, or from a path
//! given on the command line. Every field is optional:
//!
//! ```json
//! {
//!     "catalog_path": "/path/to/catalog.json",
//!     "placeholder": "Select an option",
//!     "default_value": "grapes",
//!     "controlled": false,
//!     "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use groupselect::Catalog;
use groupselect::sample::{food_catalog, DEFAULT_PLACEHOLDER, SAMPLE_DEFAULT_VALUE};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog JSON file. The sample food catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    pub placeholder: String,
    /// Initial value. In controlled mode it seeds the host-owned value.
    pub default_value: Option<String>,
    /// Let the host own the selection instead of the dropdown.
    pub controlled: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            default_value: Some(SAMPLE_DEFAULT_VALUE.to_string()),
            controlled: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load the config.
    ///
    /// An explicit path must exist. Without one, the platform config file
    /// is used if present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match paths::config_file() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// The catalog to offer: the configured file, or the sample catalog.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(food_catalog());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Catalog::from_json(&text).map_err(|source| ConfigError::Catalog {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(r#"{"controlled": true, "log_level": "debug"}"#).unwrap();
        assert!(config.controlled);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.default_value.as_deref(), Some(SAMPLE_DEFAULT_VALUE));
    }

    #[test]
    fn test_null_default_value() {
        let config = Config::from_json(r#"{"default_value": null}"#).unwrap();
        assert_eq!(config.default_value, None);
    }

    #[test]
    fn test_bad_log_level() {
        let config = Config::from_json(r#"{"log_level": "loud"}"#).unwrap();
        assert!(matches!(config.level_filter(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_sample_catalog_without_path() {
        let catalog = Config::default().catalog().unwrap();
        assert_eq!(catalog, food_catalog());
    }

    #[test]
    fn test_catalog_from_file() {
        let path = std::env::temp_dir().join(format!("groupselect-catalog-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{"label": "Genres", "items": [{"value": "jazz", "label": "Jazz"}]}]"#,
        )
        .unwrap();
        let config = Config {
            catalog_path: Some(path.clone()),
            ..Config::default()
        };
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.find("jazz").unwrap().label, "Jazz");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_catalog_file() {
        let path = std::env::temp_dir().join(format!("groupselect-dup-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{"label": "A", "items": [{"value": "x", "label": "X"}, {"value": "x", "label": "Y"}]}]"#,
        )
        .unwrap();
        let config = Config {
            catalog_path: Some(path.clone()),
            ..Config::default()
        };
        assert!(matches!(config.catalog(), Err(ConfigError::Catalog { .. })));
        fs::remove_file(&path).unwrap();
    }
}
