//! Error types for loading and rendering template sets.
//!
//! Load errors are fatal at startup and always carry the path that failed.
//! Render errors are returned to the caller, which decides the HTTP-level
//! response.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`TemplateSet`](crate::TemplateSet)
#[derive(Debug, Error)]
pub enum LoadError {
    /// The layout file could not be read
    #[error("Could not load layout ({}): {source}", path.display())]
    ReadLayout {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The layout file could not be parsed
    #[error("Failed to parse layout ({}): {source}", path.display())]
    ParseLayout {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    /// A directory walk failed
    #[error("Could not walk directory ({}): {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A discovered file was not located under its root directory
    #[error("Could not create relative path for {} under {}", path.display(), root.display())]
    RelativePath { path: PathBuf, root: PathBuf },

    /// A partial could not be read
    #[error("Failed to load partial ({}): {source}", path.display())]
    ReadPartial {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A partial could not be parsed
    #[error("Failed to parse partial ({}): {source}", path.display())]
    ParsePartial {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    /// A page template could not be read
    #[error("Failed to load template ({}): {source}", path.display())]
    ReadPage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template file is not valid UTF-8
    #[error("Template file is not valid UTF-8 ({}): {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A page template could not be parsed into its layout clone
    #[error("Failed to parse template ({}): {source}", path.display())]
    ParsePage {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },
}

impl LoadError {
    /// Path of the file or directory that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::ReadLayout { path, .. }
            | Self::ParseLayout { path, .. }
            | Self::Walk { path, .. }
            | Self::RelativePath { path, .. }
            | Self::ReadPartial { path, .. }
            | Self::ParsePartial { path, .. }
            | Self::ReadPage { path, .. }
            | Self::Encoding { path, .. }
            | Self::ParsePage { path, .. } => path,
        }
    }
}

/// Errors raised while rendering a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template named: {0} does not exist")]
    TemplateNotFound(String),

    /// Data could not be turned into a template context
    #[error("Invalid render data for template {name}: {source}")]
    Context {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to execute template {name}: {source}")]
    Execute {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// Copying the rendered page to the sink failed after headers were sent
    #[error("Failed to write response: {0}")]
    Write(#[from] std::io::Error),
}

impl RenderError {
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::TemplateNotFound(name.into())
    }
}

/// Errors raised while reading a [`TemplateConfig`](crate::TemplateConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config ({}): {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config ({}): {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
