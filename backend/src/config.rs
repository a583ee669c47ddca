//! Configuration file support.
//!
//! `routing.toml` selects the repository backend and the fee schedule:
//!
//! ```toml
//! [repository]
//! type = "local"
//!
//! [fees]
//! base_fee = 150.0
//! per_mile_rate = 1.80
//! minimum_fee = 200.0
//! ```
//!
//! Every section is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::algorithms::FeeSchedule;
use crate::db::{RepositoryError, RepositoryType};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ROUTING_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub fees: FeeSchedule,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

fn default_repo_type() -> String {
    "local".to_string()
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl RoutingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        let config: RoutingConfig = toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// First existing `routing.toml` among:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn default_path() -> Option<PathBuf> {
        [
            PathBuf::from("routing.toml"),
            PathBuf::from("backend/routing.toml"),
            PathBuf::from("../routing.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load configuration from the default location.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        match Self::default_path() {
            Some(path) => Self::from_file(path),
            None => Err(RepositoryError::configuration(
                "No routing.toml found in standard locations",
            )),
        }
    }

    /// `ROUTING_CONFIG` if set, else the default search, else built-in defaults.
    pub fn load() -> Result<Self, RepositoryError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) => Self::from_file(path),
            None => {
                log::info!("No routing.toml found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    fn validate(&self) -> Result<(), RepositoryError> {
        self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.fees
            .validate()
            .map_err(|e| RepositoryError::configuration(format!("Invalid fee schedule: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config = RoutingConfig::from_toml_str(
            r#"
[repository]
type = "local"

[fees]
base_fee = 50.0
per_mile_rate = 1.5
minimum_fee = 120.0
"#,
        )
        .unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.fees, FeeSchedule::new(50.0, 1.5, 120.0));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = RoutingConfig::from_toml_str("[fees]\nminimum_fee = 250.0\n").unwrap();
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.fees.base_fee, 150.0);
        assert_eq!(config.fees.minimum_fee, 250.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(RoutingConfig::from_toml_str("[repository]\ntype = \"oracle\"\n").is_err());
        assert!(RoutingConfig::from_toml_str("[fees]\nbase_fee = -1.0\n").is_err());
        assert!(RoutingConfig::from_toml_str("not toml [").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fees]\nper_mile_rate = 2.0").unwrap();

        let config = RoutingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.fees.per_mile_rate, 2.0);

        let err = RoutingConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }
}
