//! Configuration management and validation.
//!
//! Provides the layered import configuration: built-in defaults, an
//! optional TOML file, then command-line overrides. The synonym table and
//! classification keywords built here are handed to the field mapper and
//! row parser as explicit values.

use crate::app::models::TargetField;
use crate::constants::{
    APP_CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_STORE_FILE, scores::DEFAULT_LOW_CONFIDENCE_THRESHOLD,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Field mapping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Non-overridden mappings under this confidence produce a warning
    pub low_confidence_threshold: u8,

    /// Additional header synonyms per target field, appended after built-ins
    pub extra_synonyms: BTreeMap<String, Vec<String>>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
            extra_synonyms: BTreeMap::new(),
        }
    }
}

/// Segment keyword extensions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub extra_restaurant_keywords: Vec<String>,
    pub extra_institutional_keywords: Vec<String>,
    pub extra_retail_keywords: Vec<String>,
    pub extra_hospitality_keywords: Vec<String>,
}

/// Import execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Skip organizations that already exist
    pub skip_duplicates: bool,

    /// Show a progress bar while writing
    pub show_progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
            show_progress: true,
        }
    }
}

/// Backing store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON store file used by the CLI
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Global configuration for CRM imports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub mapping: MappingConfig,
    pub classification: ClassificationConfig,
    pub import: ExecutionConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl ImportConfig {
    /// Default config file location (`<config dir>/crm-import/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ImportConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Load with layered approach (defaults -> file)
    ///
    /// An explicitly named file must exist. Without one, the default
    /// location is used when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    debug!("Loading configuration from {}", path.display());
                    Self::from_file(&path)?
                }
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check ranges and field names
    pub fn validate(&self) -> Result<()> {
        if self.mapping.low_confidence_threshold > 100 {
            return Err(Error::configuration(format!(
                "mapping.low_confidence_threshold must be 0-100, got {}",
                self.mapping.low_confidence_threshold
            )));
        }

        for (field, synonyms) in &self.mapping.extra_synonyms {
            field.parse::<TargetField>().map_err(|_| {
                Error::configuration(format!(
                    "mapping.extra_synonyms names unknown field '{}'",
                    field
                ))
            })?;
            if synonyms.iter().any(|s| s.trim().is_empty()) {
                return Err(Error::configuration(format!(
                    "mapping.extra_synonyms.{} contains a blank synonym",
                    field
                )));
            }
        }

        if self.store.path.as_os_str().is_empty() {
            return Err(Error::configuration("store.path must not be empty"));
        }

        Ok(())
    }

    /// Set the low-confidence warning threshold
    pub fn with_low_confidence_threshold(mut self, threshold: u8) -> Self {
        self.mapping.low_confidence_threshold = threshold;
        self
    }

    /// Append synonyms for a field
    pub fn with_extra_synonyms(mut self, field: TargetField, synonyms: &[&str]) -> Self {
        self.mapping
            .extra_synonyms
            .entry(field.as_str().to_string())
            .or_default()
            .extend(synonyms.iter().map(|s| s.to_string()));
        self
    }

    /// Import organizations even if they already exist
    pub fn with_duplicates_allowed(mut self) -> Self {
        self.import.skip_duplicates = false;
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.import.show_progress = false;
        self
    }

    /// Set the JSON store path
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.path = path.into();
        self
    }
}
