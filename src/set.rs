//! The loaded name to template mapping.

use std::collections::HashMap;

use tera::Tera;

/// Compiled page templates keyed by logical name.
///
/// Each value holds the layout, every partial and the page's own
/// [`YIELD_TEMPLATE`](crate::names::YIELD_TEMPLATE) body. The set never
/// changes after loading, so it can be shared across threads behind an
/// `Arc` and read without locking.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: HashMap<String, Tera>,
}

impl TemplateSet {
    pub fn get(&self, name: &str) -> Option<&Tera> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names.into_iter()
    }

    /// Store a page, returning the one it replaced
    pub(crate) fn insert(&mut self, name: String, template: Tera) -> Option<Tera> {
        self.templates.insert(name, template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_and_sorts_names() {
        let mut set = TemplateSet::default();
        assert!(set.is_empty());
        assert!(set.insert("zeta".into(), Tera::default()).is_none());
        assert!(set.insert("alpha".into(), Tera::default()).is_none());
        assert!(set.insert("zeta".into(), Tera::default()).is_some());

        assert_eq!(set.len(), 2);
        assert!(set.contains("alpha"));
        assert!(set.get("beta").is_none());
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
    }
}
