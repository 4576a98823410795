//! Logical template names derived from file paths.
//!
//! A name is the path relative to its root directory, joined with `/`, with
//! everything from the first `.` dropped. `page.v2.html` therefore becomes
//! `page`, and lookups elsewhere depend on that.

use std::path::Path;

/// Root template name the layout is parsed under
pub const LAYOUT_TEMPLATE: &str = "";

/// Name every page body is parsed under inside its layout clone
pub const YIELD_TEMPLATE: &str = "yield";

/// File name prefix marking a partial
pub const PARTIAL_PREFIX: &str = "_";

/// Truncate `name` at its first `.`
pub fn remove_extension(name: &str) -> &str {
    match name.find('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

/// Logical page name for a path relative to the templates root.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use tplset::names::template_name;
///
/// assert_eq!(template_name(Path::new("sub/dir/page.html.tpl")), "sub/dir/page");
/// ```
pub fn template_name(relative: &Path) -> String {
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    remove_extension(&joined).to_string()
}

/// Partial name for a partial file: its base name without extension
pub fn partial_name(path: &Path) -> String {
    let base = file_name(path);
    remove_extension(&base).to_string()
}

/// Whether the file's base name carries the partial marker
pub fn is_partial(path: &Path) -> bool {
    file_name(path).starts_with(PARTIAL_PREFIX)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_extension() {
        assert_eq!(remove_extension("index.html"), "index");
        assert_eq!(remove_extension("README"), "README");
        assert_eq!(remove_extension(".hidden"), "");
    }

    #[test]
    fn test_nested_template_name() {
        assert_eq!(
            template_name(Path::new("sub/dir/page.html.tpl")),
            "sub/dir/page"
        );
    }

    #[test]
    fn test_multi_dot_truncates_at_first_dot() {
        assert_eq!(template_name(Path::new("page.v2.tpl")), "page");
    }

    #[test]
    fn test_dot_in_directory_truncates_there() {
        assert_eq!(template_name(Path::new("v1.0/page.html")), "v1");
    }

    #[test]
    fn test_partial_name_uses_base_name() {
        assert_eq!(partial_name(Path::new("forms/_input.html")), "_input");
        assert_eq!(partial_name(Path::new("_footer")), "_footer");
    }

    #[test]
    fn test_is_partial() {
        assert!(is_partial(Path::new("partials/_nav.html")));
        assert!(!is_partial(Path::new("_drafts/page.html")));
        assert!(!is_partial(Path::new("index.html")));
    }
}
