//! TOML configuration for the catalog and its command-line host.
//!
//! Every section and field has a default, so an empty file is a valid
//! config and running without one behaves the same as running with one.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub catalog: RegistryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Names of built-in patterns to leave out of the catalog.
    pub disabled: Vec<String>,
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| CatalogError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|err| CatalogError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.catalog.disabled.iter().any(|d| d == name)
    }
}
