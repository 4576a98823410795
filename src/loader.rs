//! Template set loading.
//!
//! Loading happens in two phases. First the layout is parsed and every
//! partial is attached to it. Then each page file gets its own clone of the
//! layout with the page body parsed under [`YIELD_TEMPLATE`]. Partials are
//! complete before the first clone is taken, so every page sees all of them.
//!
//! Template files must be UTF-8; anything else fails with
//! [`LoadError::Encoding`].

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tera::{ErrorKind, Tera};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::TemplateConfig;
use crate::error::LoadError;
use crate::functions::FunctionRegistry;
use crate::names::{self, LAYOUT_TEMPLATE, YIELD_TEMPLATE};
use crate::set::TemplateSet;

/// Load options beyond the three locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub autoescape: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { autoescape: true }
    }
}

/// Load every page under `templates_dir` against the layout at
/// `templates_dir/layout`, with the partials found under `partials_dir`.
pub fn load(
    templates_dir: &Path,
    partials_dir: &Path,
    layout: &str,
    functions: &FunctionRegistry,
) -> Result<TemplateSet, LoadError> {
    load_with_options(
        templates_dir,
        partials_dir,
        layout,
        functions,
        LoadOptions::default(),
    )
}

/// Load using the locations and settings from `config`
pub fn load_from_config(
    config: &TemplateConfig,
    functions: &FunctionRegistry,
) -> Result<TemplateSet, LoadError> {
    load_with_options(
        &config.templates_dir,
        &config.partials_dir,
        &config.layout,
        functions,
        LoadOptions {
            autoescape: config.autoescape,
        },
    )
}

/// Load a template set, terminating the process if anything fails.
///
/// Only meant for startup: a broken template set must never serve traffic.
pub fn load_or_exit(config: &TemplateConfig, functions: &FunctionRegistry) -> TemplateSet {
    match load_from_config(config, functions) {
        Ok(set) => set,
        Err(e) => {
            error!("Failed to load templates: {e}");
            std::process::exit(1);
        }
    }
}

pub fn load_with_options(
    templates_dir: &Path,
    partials_dir: &Path,
    layout: &str,
    functions: &FunctionRegistry,
    options: LoadOptions,
) -> Result<TemplateSet, LoadError> {
    let layout_path = templates_dir.join(layout);
    let (base, partials) = build_base(&layout_path, partials_dir, functions, options)?;

    let mut set = TemplateSet::default();
    for entry in walk(templates_dir) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_dir() || path == layout_path || names::is_partial(path) {
            continue;
        }

        let rel = relative(path, templates_dir)?;
        let name = names::template_name(&rel);
        let body = read_template(path, &rel, |path, source| LoadError::ReadPage {
            path,
            source,
        })?;

        let mut page = base.clone();
        page.add_raw_template(YIELD_TEMPLATE, &body)
            .map_err(|source| LoadError::ParsePage {
                path: rel.clone(),
                source,
            })?;

        debug!("Loaded template {name:?} from {}", rel.display());
        if set.insert(name.clone(), page).is_some() {
            warn!(
                "Template {name:?} defined more than once, keeping {}",
                rel.display()
            );
        }
    }

    info!(
        "Loaded {} templates with {} partials from {}",
        set.len(),
        partials,
        templates_dir.display()
    );
    Ok(set)
}

/// A partial read from disk, not yet parsed
struct Partial {
    name: String,
    rel: PathBuf,
    content: String,
}

/// Parse the layout together with every partial, returning the shared base
/// and the partial count.
///
/// Everything goes to Tera in one batch, so macro imports between partials,
/// or from the layout into a partial, resolve regardless of file order.
fn build_base(
    layout_path: &Path,
    partials_dir: &Path,
    functions: &FunctionRegistry,
    options: LoadOptions,
) -> Result<(Tera, usize), LoadError> {
    let layout = read_template(layout_path, layout_path, |path, source| {
        LoadError::ReadLayout { path, source }
    })?;
    let partials = read_partials(partials_dir)?;

    let mut tera = Tera::default();
    // Reserved names carry no file suffix, so escaping is keyed on "".
    tera.autoescape_on(if options.autoescape { vec![""] } else { vec![] });
    functions.bind(&mut tera);

    let batch = std::iter::once((LAYOUT_TEMPLATE, layout.as_str())).chain(
        partials
            .iter()
            .map(|partial| (partial.name.as_str(), partial.content.as_str())),
    );
    if let Err(source) = tera.add_raw_templates(batch) {
        let failed = unparsed(&tera, &partials).or_else(|| failing_template(&source));
        let partial = failed.and_then(|name| partials.iter().rev().find(|p| p.name == name));
        return Err(match partial {
            Some(partial) => LoadError::ParsePartial {
                path: partial.rel.clone(),
                source,
            },
            None => LoadError::ParseLayout {
                path: layout_path.to_path_buf(),
                source,
            },
        });
    }

    for partial in &partials {
        debug!("Loaded partial {:?} from {}", partial.name, partial.rel.display());
    }
    Ok((tera, partials.len()))
}

/// Read every underscore-prefixed file under `dir`
fn read_partials(dir: &Path) -> Result<Vec<Partial>, LoadError> {
    let mut partials = Vec::new();
    for entry in walk(dir) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_dir() || !names::is_partial(path) {
            continue;
        }

        let rel = relative(path, dir)?;
        let content = read_template(path, &rel, |path, source| LoadError::ReadPartial {
            path,
            source,
        })?;
        partials.push(Partial {
            name: names::partial_name(path),
            rel,
            content,
        });
    }
    Ok(partials)
}

/// Name of the first batch entry Tera stopped at while parsing.
///
/// Tera parses a batch in order and keeps what it parsed before failing.
fn unparsed(tera: &Tera, partials: &[Partial]) -> Option<String> {
    let loaded: HashSet<&str> = tera.get_template_names().collect();
    if !loaded.contains(LAYOUT_TEMPLATE) {
        return Some(LAYOUT_TEMPLATE.to_string());
    }
    partials
        .iter()
        .find(|partial| !loaded.contains(partial.name.as_str()))
        .map(|partial| partial.name.clone())
}

/// Template named by a parse, inheritance or macro import error
fn failing_template(error: &tera::Error) -> Option<String> {
    match &error.kind {
        ErrorKind::MissingParent { current, .. } => Some(current.clone()),
        ErrorKind::CircularExtend { tpl, .. } => Some(tpl.clone()),
        ErrorKind::Msg(msg) => msg
            .strip_prefix("Template `")
            .and_then(|rest| rest.split('`').next())
            .or_else(|| {
                msg.strip_prefix("Failed to parse '")
                    .and_then(|rest| rest.strip_suffix('\''))
            })
            .map(str::to_string),
        _ => None,
    }
}

/// Read a template source, reporting I/O failures through `read_error`
fn read_template(
    path: &Path,
    rel: &Path,
    read_error: impl FnOnce(PathBuf, io::Error) -> LoadError,
) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| read_error(rel.to_path_buf(), source))?;
    String::from_utf8(bytes).map_err(|source| LoadError::Encoding {
        path: rel.to_path_buf(),
        source,
    })
}

fn walk(dir: &Path) -> impl Iterator<Item = Result<walkdir::DirEntry, LoadError>> {
    let root = dir.to_path_buf();
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| {
            entry.map_err(|source| LoadError::Walk {
                path: source.path().map_or_else(|| root.clone(), Path::to_path_buf),
                source,
            })
        })
}

fn relative(path: &Path, root: &Path) -> Result<PathBuf, LoadError> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| LoadError::RelativePath {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
}
