//! Class and selector registries
//!
//! Both registries read their name table lazily, once per root binding.
//! The selector registry also remembers the selectors it derived from
//! classes and every selector it instantiated with placeholder values.

use std::collections::HashMap;

use crate::cache::NameKey;
use crate::error::{ElementsError, Result};
use crate::names::{ElementNames, NameTable};
use crate::placeholder::substitute;

/// Empty templates count as undeclared
fn declared<'a>(table: &'a NameTable, name: &str) -> Option<&'a str> {
    table.get(name).filter(|template| !template.is_empty())
}

#[derive(Debug, Default)]
pub(crate) struct ClassRegistry {
    table: Option<NameTable>,
}

impl ClassRegistry {
    pub fn reset(&mut self) {
        self.table = None;
    }

    fn table<N: ElementNames + ?Sized>(&mut self, names: &N) -> &NameTable {
        self.table.get_or_insert_with(|| {
            let table = names.classes();
            tracing::debug!("Loaded {} class names", table.len());
            table
        })
    }

    pub fn contains<N: ElementNames + ?Sized>(&mut self, names: &N, name: &str) -> bool {
        declared(self.table(names), name).is_some()
    }

    /// Class for `key`. Instances with placeholder values are not stored.
    pub fn resolve<N: ElementNames + ?Sized>(&mut self, names: &N, key: &NameKey) -> Result<String> {
        let template = declared(self.table(names), key.name()).ok_or_else(|| {
            ElementsError::NameNotFound {
                name: key.name().to_string(),
            }
        })?;

        if key.has_args() {
            substitute(template, key.args())
        } else {
            Ok(template.to_string())
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct SelectorRegistry {
    table: Option<NameTable>,
    /// `.class` bases for names that only declare a class
    derived: HashMap<String, String>,
    /// Substituted selectors by full key
    instantiated: HashMap<NameKey, String>,
}

impl SelectorRegistry {
    pub fn reset(&mut self) {
        self.table = None;
        self.derived.clear();
        self.instantiated.clear();
    }

    fn table<N: ElementNames + ?Sized>(&mut self, names: &N) -> &NameTable {
        self.table.get_or_insert_with(|| {
            let table = names.selectors();
            tracing::debug!("Loaded {} selector names", table.len());
            table
        })
    }

    pub fn contains<N: ElementNames + ?Sized>(&mut self, names: &N, name: &str) -> bool {
        declared(self.table(names), name).is_some() || self.derived.contains_key(name)
    }

    /// Selector for `key`.
    ///
    /// Lookup order: an instance cached under the full key, then the
    /// declared template, then `.` plus the element's class (remembered as
    /// the name's base), substituted and cached when `key` carries values.
    pub fn resolve<N: ElementNames + ?Sized>(
        &mut self,
        names: &N,
        classes: &mut ClassRegistry,
        key: &NameKey,
    ) -> Result<String> {
        if let Some(selector) = self.instantiated.get(key) {
            tracing::trace!("Selector cache hit for {}", key);
            return Ok(selector.clone());
        }

        let base = match self.base(names, key.name()) {
            Some(base) => base,
            None => {
                let class = classes.resolve(names, &NameKey::new(key.name()))?;
                let base = format!(".{class}");
                tracing::trace!("Derived selector `{}` for {}", base, key.name());
                self.derived.insert(key.name().to_string(), base.clone());
                base
            }
        };

        if !key.has_args() {
            return Ok(base);
        }

        let selector = substitute(&base, key.args())?;
        self.instantiated.insert(key.clone(), selector.clone());
        Ok(selector)
    }

    fn base<N: ElementNames + ?Sized>(&mut self, names: &N, name: &str) -> Option<String> {
        if let Some(template) = declared(self.table(names), name) {
            return Some(template.to_string());
        }
        self.derived.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::StaticNames;
    use std::cell::Cell;

    fn names() -> StaticNames {
        StaticNames::new(
            [
                ("simpleClass", "simple-class"),
                ("complexClass", "complex-class_%s_%s"),
                ("blankClass", ""),
            ],
            [
                ("simpleSelector", ".simple-selector"),
                ("complexSelector", ".complex-selector_%s_%s"),
            ],
        )
    }

    #[test]
    fn test_class_resolution() {
        let names = names();
        let mut classes = ClassRegistry::default();

        assert_eq!(classes.resolve(&names, &"simpleClass".into()).unwrap(), "simple-class");
        assert_eq!(
            classes.resolve(&names, &("complexClass", [1, 2]).into()).unwrap(),
            "complex-class_1_2"
        );
        assert!(matches!(
            classes.resolve(&names, &"blankClass".into()),
            Err(ElementsError::NameNotFound { .. })
        ));
    }

    #[test]
    fn test_selector_derived_from_class() {
        let names = names();
        let mut classes = ClassRegistry::default();
        let mut selectors = SelectorRegistry::default();

        assert!(!selectors.contains(&names, "complexClass"));
        let selector = selectors
            .resolve(&names, &mut classes, &("complexClass", [1, 2]).into())
            .unwrap();
        assert_eq!(selector, ".complex-class_1_2");
        assert!(selectors.contains(&names, "complexClass"));
        assert_eq!(
            selectors.resolve(&names, &mut classes, &"complexClass".into()).unwrap(),
            ".complex-class_%s_%s"
        );
    }

    #[test]
    fn test_failed_substitution_is_not_cached() {
        let names = names();
        let mut classes = ClassRegistry::default();
        let mut selectors = SelectorRegistry::default();
        let key: NameKey = ("complexSelector", [1]).into();

        assert!(selectors.resolve(&names, &mut classes, &key).is_err());
        assert!(selectors.instantiated.is_empty());
    }

    struct Counting {
        reads: Cell<usize>,
    }

    impl ElementNames for Counting {
        fn selectors(&self) -> NameTable {
            self.reads.set(self.reads.get() + 1);
            NameTable::from([("item", ".item-%s")])
        }
    }

    #[test]
    fn test_table_read_once_per_binding() {
        let names = Counting { reads: Cell::new(0) };
        let mut classes = ClassRegistry::default();
        let mut selectors = SelectorRegistry::default();

        for n in 0..3 {
            selectors.resolve(&names, &mut classes, &("item", [n]).into()).unwrap();
        }
        assert_eq!(names.reads.get(), 1);

        selectors.reset();
        selectors.resolve(&names, &mut classes, &"item".into()).unwrap();
        assert_eq!(names.reads.get(), 2);
    }
}
