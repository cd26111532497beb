//! Filter configuration
//!
//! Loaded from YAML. Every field has a default matching the blog templates,
//! so an empty file (or no file) is a valid configuration.

use crate::query::DEFAULT_PARAM;
use crate::view::{EntryLocator, DEFAULT_LISTING_CLASS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Settings shared by the filter, the HTML view and the script generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Query parameter carrying the tag
    pub param: String,
    /// Class of the element wrapping the article listing
    pub listing_class: String,
    /// How listing entries are matched to posts
    pub locator: EntryLocator,
    /// Tag mapping file used when none is given on the command line
    pub mapping: Option<PathBuf>,
    /// Directory prefix of generated post URLs
    pub posts_prefix: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            param: DEFAULT_PARAM.to_string(),
            listing_class: DEFAULT_LISTING_CLASS.to_string(),
            locator: EntryLocator::default(),
            mapping: None,
            posts_prefix: "posts".to_string(),
        }
    }
}

impl FilterConfig {
    /// Parse a YAML document; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load configuration from a file
    ///
    /// A relative `mapping` path is resolved against the config file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.mapping = config.mapping.take().map(|mapping| {
            if mapping.is_relative() {
                base.join(mapping)
            } else {
                mapping
            }
        });
        Ok(config)
    }

    /// Load the file at `path` if given, else the default location
    ///
    /// A missing default file yields defaults; a missing explicit file is
    /// an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::load(default),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Default config location (~/.config/tagfilter/config.yaml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tagfilter").join("config.yaml"))
    }
}
