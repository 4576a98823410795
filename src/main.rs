//! tplset CLI entrypoint
//! Loads a template set and lists or renders its pages.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tplset::{BufferPool, FunctionRegistry, HtmlResponse, Renderer, TemplateConfig};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tplset")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    load: LoadArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct LoadArgs {
    /// TOML file with template locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the layout and page templates
    #[arg(long, global = true)]
    templates_dir: Option<PathBuf>,
    /// Directory holding underscore-prefixed partials
    #[arg(long, global = true)]
    partials_dir: Option<PathBuf>,
    /// Layout file name inside the templates directory
    #[arg(long, global = true)]
    layout: Option<String>,
    /// Disable HTML escaping of expression output
    #[arg(long, global = true)]
    no_autoescape: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the names of all loaded page templates
    List,
    /// Render a page template to stdout
    Render {
        /// Logical template name, e.g. `blog/post`
        name: String,
        /// JSON file with the data passed to the template
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

impl LoadArgs {
    fn resolve(&self) -> anyhow::Result<TemplateConfig> {
        let mut config = match &self.config {
            Some(path) => TemplateConfig::from_file(path)?,
            None => TemplateConfig::default(),
        };
        if let Some(dir) = &self.templates_dir {
            config.templates_dir = dir.clone();
        }
        if let Some(dir) = &self.partials_dir {
            config.partials_dir = dir.clone();
        }
        if let Some(layout) = &self.layout {
            config.layout = layout.clone();
        }
        if self.no_autoescape {
            config.autoescape = false;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only rendered output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let config = cli.load.resolve()?;
    info!("Loading templates from {}", config.templates_dir.display());

    let set = tplset::load_or_exit(&config, &FunctionRegistry::new());
    let renderer = Renderer::new(
        Arc::new(set),
        Arc::new(BufferPool::new(config.pool_capacity)),
    );

    match cli.command {
        Commands::List => {
            let mut stdout = std::io::stdout().lock();
            for name in renderer.templates().names() {
                writeln!(stdout, "{name}")?;
            }
        }
        Commands::Render { name, data } => {
            let data: serde_json::Value = match data {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read data file {}", path.display()))?;
                    serde_json::from_str(&content)
                        .with_context(|| format!("Invalid JSON in {}", path.display()))?
                }
                None => serde_json::json!({}),
            };

            let mut response = HtmlResponse::new();
            renderer
                .render(&mut response, &name, &data)
                .with_context(|| format!("Failed to render {name}"))?;
            std::io::stdout().write_all(response.body())?;
        }
    }

    Ok(())
}
