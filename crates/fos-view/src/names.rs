//! Name tables
//!
//! A view declares two tables: element name to CSS class template and
//! element name to CSS selector template. Tables are produced on demand so
//! that a table can depend on the view's state at bind time, and a subclass
//! style view merges its own entries over the ones it inherits.

use std::collections::BTreeMap;

/// Mapping from element name to a template string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: BTreeMap<String, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(name, template);
        self
    }

    /// Insert or overwrite an entry, returning the previous template
    pub fn insert(&mut self, name: impl Into<String>, template: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), template.into())
    }

    /// Fill in entries of `base` that this table does not declare
    pub fn with_defaults(mut self, base: NameTable) -> Self {
        for (name, template) in base.entries {
            self.entries.entry(name).or_insert(template);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for NameTable {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Producer of a view's name tables.
///
/// Both tables default to empty. Each is read once per root binding, on
/// first use.
pub trait ElementNames {
    /// Element name to CSS class template
    fn classes(&self) -> NameTable {
        NameTable::new()
    }

    /// Element name to CSS selector template
    fn selectors(&self) -> NameTable {
        NameTable::new()
    }
}

/// A view without named elements
impl ElementNames for () {}

/// Fixed tables handed over at construction
#[derive(Debug, Clone, Default)]
pub struct StaticNames {
    classes: NameTable,
    selectors: NameTable,
}

impl StaticNames {
    pub fn new(classes: impl Into<NameTable>, selectors: impl Into<NameTable>) -> Self {
        Self {
            classes: classes.into(),
            selectors: selectors.into(),
        }
    }

    pub fn classes_only(classes: impl Into<NameTable>) -> Self {
        Self::new(classes, NameTable::new())
    }

    pub fn selectors_only(selectors: impl Into<NameTable>) -> Self {
        Self::new(NameTable::new(), selectors)
    }
}

impl ElementNames for StaticNames {
    fn classes(&self) -> NameTable {
        self.classes.clone()
    }

    fn selectors(&self) -> NameTable {
        self.selectors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Base;

    impl ElementNames for Base {
        fn classes(&self) -> NameTable {
            NameTable::from([("title", "base__title"), ("body", "base__body")])
        }
    }

    struct Derived;

    impl ElementNames for Derived {
        fn classes(&self) -> NameTable {
            NameTable::new()
                .with("title", "derived__title")
                .with_defaults(Base.classes())
        }
    }

    #[test]
    fn test_derived_table_wins() {
        let table = Derived.classes();
        assert_eq!(table.get("title"), Some("derived__title"));
        assert_eq!(table.get("body"), Some("base__body"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_default_tables_are_empty() {
        assert!(().classes().is_empty());
        assert!(Derived.selectors().is_empty());
    }

    #[test]
    fn test_static_names() {
        let names = StaticNames::selectors_only([("item", ".item")]);
        assert!(names.classes().is_empty());
        assert_eq!(names.selectors().get("item"), Some(".item"));
    }
}
