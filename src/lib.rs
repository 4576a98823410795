//! Layout, partial and page composition for Tera-rendered HTML.
//!
//! A template directory holds one layout, any number of page files and a
//! tree of underscore-prefixed partials. [`load`] composes every page with
//! the layout and all partials into a [`TemplateSet`]; a [`Renderer`] then
//! renders pages by name into a [`ResponseSink`].
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use tplset::{BufferPool, FunctionRegistry, HtmlResponse, Renderer};
//!
//! let set = tplset::load(
//!     Path::new("templates"),
//!     Path::new("templates/partials"),
//!     "layout.html",
//!     &FunctionRegistry::new(),
//! )?;
//! let renderer = Renderer::new(Arc::new(set), Arc::new(BufferPool::default()));
//!
//! let mut response = HtmlResponse::new();
//! renderer.render(&mut response, "index", &serde_json::json!({ "title": "Home" }))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod functions;
pub mod loader;
pub mod names;
pub mod pool;
pub mod render;
pub mod set;

pub use config::TemplateConfig;
pub use error::{ConfigError, LoadError, RenderError};
pub use functions::FunctionRegistry;
pub use loader::{LoadOptions, load, load_from_config, load_or_exit, load_with_options};
pub use names::{LAYOUT_TEMPLATE, PARTIAL_PREFIX, YIELD_TEMPLATE};
pub use pool::{DEFAULT_POOL_CAPACITY, BufferPool, PooledBuffer};
pub use render::{HTML_CONTENT_TYPE, HtmlResponse, Renderer, ResponseSink};
pub use set::TemplateSet;
