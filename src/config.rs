//! Configuration for locating and loading a template set.
//!
//! ```toml
//! templates_dir = "templates"
//! partials_dir = "templates/partials"
//! layout = "layout.html"
//! autoescape = true
//! pool_capacity = 10
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pool::DEFAULT_POOL_CAPACITY;

/// Where templates live and how they are loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Root of the layout and page files
    pub templates_dir: PathBuf,

    /// Root of the underscore-prefixed partial files
    pub partials_dir: PathBuf,

    /// Layout file name, relative to `templates_dir`
    pub layout: String,

    /// HTML-escape expression output in every template
    pub autoescape: bool,

    /// Buffers retained by the render pool
    pub pool_capacity: usize,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            partials_dir: PathBuf::from("templates/partials"),
            layout: "layout.html".to_string(),
            autoescape: true,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl TemplateConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Full path of the layout file
    pub fn layout_path(&self) -> PathBuf {
        self.templates_dir.join(&self.layout)
    }
}
