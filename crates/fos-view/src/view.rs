//! Elements view
//!
//! Resolves element names to classes, selectors and element sets under a
//! root element, and memoizes what it resolves until the root changes.

use fos_dom::{Dataset, NodeId};
use serde_json::Value;

use crate::cache::{ElementCache, ElementSet, NameKey};
use crate::config::ViewConfig;
use crate::error::{ElementsError, Result};
use crate::host::{Content, DomHost};
use crate::names::ElementNames;
use crate::placeholder::Placeholders;
use crate::registry::{ClassRegistry, SelectorRegistry};

/// What a class operation applies to
#[derive(Debug, Clone, Default)]
pub enum Target {
    /// The view's root element
    #[default]
    Root,
    /// A named element, looked up through the element cache
    Name(NameKey),
    /// An element set the caller already holds
    Nodes(ElementSet),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::Name(NameKey::new(name))
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Self::Name(NameKey::new(name))
    }
}

impl From<NameKey> for Target {
    fn from(key: NameKey) -> Self {
        Self::Name(key)
    }
}

impl<A: Into<Placeholders>> From<(&str, A)> for Target {
    fn from(key: (&str, A)) -> Self {
        Self::Name(key.into())
    }
}

impl From<ElementSet> for Target {
    fn from(set: ElementSet) -> Self {
        Self::Nodes(set)
    }
}

impl From<&ElementSet> for Target {
    fn from(set: &ElementSet) -> Self {
        Self::Nodes(set.clone())
    }
}

impl From<NodeId> for Target {
    fn from(node: NodeId) -> Self {
        Self::Nodes(ElementSet::single(node))
    }
}

/// A view bound to a root element, with named access to its elements.
///
/// Every cache belongs to the current binding: [`ElementsView::set_root`]
/// starts a new epoch and forgets name tables, derived and instantiated
/// selectors, and element sets.
pub struct ElementsView<N: ElementNames> {
    names: N,
    config: ViewConfig,
    root: Option<NodeId>,
    data: Dataset,
    epoch: u64,
    classes: ClassRegistry,
    selectors: SelectorRegistry,
    elements: ElementCache,
}

impl<N: ElementNames> ElementsView<N> {
    /// Create an unbound view
    pub fn new(names: N) -> Self {
        Self::with_config(names, ViewConfig::default())
    }

    pub fn with_config(names: N, config: ViewConfig) -> Self {
        Self {
            names,
            config,
            root: None,
            data: Dataset::new(),
            epoch: 0,
            classes: ClassRegistry::default(),
            selectors: SelectorRegistry::default(),
            elements: ElementCache::default(),
        }
    }

    pub fn names(&self) -> &N {
        &self.names
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of root bindings so far
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// `data-*` attributes of the root, read when it was bound
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Bind the view to a (possibly new) root
    pub fn set_root<H: DomHost + ?Sized>(&mut self, host: &H, root: NodeId) {
        self.epoch += 1;
        tracing::debug!("Binding view to {:?} (epoch {})", root, self.epoch);

        self.root = Some(root);
        self.data = host.data_attributes(root);
        self.reset_caches();
    }

    /// Forget name tables, derived and instantiated selectors, and element
    /// sets while keeping the current root, its data and the epoch
    pub fn reset_caches(&mut self) {
        self.classes.reset();
        self.selectors.reset();
        self.elements.clear();
    }

    /// CSS class of a named element, with placeholders filled from the key
    pub fn class(&mut self, key: impl Into<NameKey>) -> Result<String> {
        let key = key.into();
        self.classes.resolve(&self.names, &key)
    }

    /// CSS selector of a named element
    pub fn selector(&mut self, key: impl Into<NameKey>) -> Result<String> {
        let key = key.into();
        self.selectors.resolve(&self.names, &mut self.classes, &key)
    }

    /// True when `name` has a usable class or selector
    pub fn has_described_name(&mut self, name: &str) -> bool {
        self.classes.contains(&self.names, name) || self.selectors.contains(&self.names, name)
    }

    /// Elements under the root matching the named selector, cached by key
    pub fn element<H: DomHost + ?Sized>(
        &mut self,
        host: &H,
        key: impl Into<NameKey>,
    ) -> Result<ElementSet> {
        let key = key.into();
        if self.config.cache_elements {
            if let Some(hit) = self.elements.get(&key) {
                tracing::trace!("Element cache hit for {}", key);
                return Ok(hit);
            }
        }

        let found = self.query(host, &key)?;
        if self.config.cache_elements {
            self.elements.insert(key, found.clone());
        }
        Ok(found)
    }

    /// Query without reading or filling the element cache
    pub fn find_element<H: DomHost + ?Sized>(
        &mut self,
        host: &H,
        key: impl Into<NameKey>,
    ) -> Result<ElementSet> {
        let key = key.into();
        self.query(host, &key)
    }

    fn query<H: DomHost + ?Sized>(&mut self, host: &H, key: &NameKey) -> Result<ElementSet> {
        let root = self.root.ok_or(ElementsError::Unbound)?;
        let selector = self.selectors.resolve(&self.names, &mut self.classes, key)?;
        let nodes = host.query_descendants(root, &selector)?;
        tracing::trace!("{} -> `{}` matched {} elements", key, selector, nodes.len());
        Ok(ElementSet::new(nodes))
    }

    /// Forget the element set cached under exactly `key`
    pub fn drop_element_cache(&mut self, key: impl Into<NameKey>) -> bool {
        let key = key.into();
        let dropped = self.elements.remove(&key);
        if dropped {
            tracing::trace!("Dropped cached elements for {}", key);
        }
        dropped
    }

    /// Forget every cached element set
    pub fn clear_element_cache(&mut self) {
        tracing::trace!("Cleared {} cached element sets", self.elements.len());
        self.elements.clear();
    }

    /// Number of element sets currently cached
    pub fn cached_elements(&self) -> usize {
        self.elements.len()
    }

    fn resolve_target<H: DomHost + ?Sized>(&mut self, host: &H, target: Target) -> Result<ElementSet> {
        match target {
            Target::Root => self.root.map(ElementSet::single).ok_or(ElementsError::Unbound),
            Target::Name(key) => self.element(host, key),
            Target::Nodes(set) => Ok(set),
        }
    }

    /// True when any target element carries the named class
    pub fn has_class<H: DomHost + ?Sized>(
        &mut self,
        host: &H,
        class: impl Into<NameKey>,
        target: impl Into<Target>,
    ) -> Result<bool> {
        let target = self.resolve_target(host, target.into())?;
        let class = self.class(class)?;
        Ok(target.iter().any(|node| host.has_class(node, &class)))
    }

    /// Add the named class to every target element
    pub fn add_class<H: DomHost + ?Sized>(
        &mut self,
        host: &mut H,
        class: impl Into<NameKey>,
        target: impl Into<Target>,
    ) -> Result<ElementSet> {
        let target = self.resolve_target(&*host, target.into())?;
        let class = self.class(class)?;
        for node in target.iter() {
            host.add_class(node, &class);
        }
        Ok(target)
    }

    /// Remove the named class from every target element
    pub fn remove_class<H: DomHost + ?Sized>(
        &mut self,
        host: &mut H,
        class: impl Into<NameKey>,
        target: impl Into<Target>,
    ) -> Result<ElementSet> {
        let target = self.resolve_target(&*host, target.into())?;
        let class = self.class(class)?;
        for node in target.iter() {
            host.remove_class(node, &class);
        }
        Ok(target)
    }

    /// Toggle the named class on every target element.
    /// `Some(true)` adds, `Some(false)` removes, `None` flips each element.
    pub fn toggle_class<H: DomHost + ?Sized>(
        &mut self,
        host: &mut H,
        class: impl Into<NameKey>,
        target: impl Into<Target>,
        force: Option<bool>,
    ) -> Result<ElementSet> {
        let target = self.resolve_target(&*host, target.into())?;
        let class = self.class(class)?;
        for node in target.iter() {
            host.toggle_class(node, &class, force);
        }
        Ok(target)
    }

    /// `data-*` attributes of the first element of a named set
    pub fn element_data<H: DomHost + ?Sized>(
        &mut self,
        host: &H,
        key: impl Into<NameKey>,
    ) -> Result<Dataset> {
        let set = self.element(host, key)?;
        Ok(set
            .first()
            .map(|node| host.data_attributes(node))
            .unwrap_or_default())
    }

    /// One `data-*` attribute of the first element of a named set
    pub fn element_data_value<H: DomHost + ?Sized>(
        &mut self,
        host: &H,
        key: impl Into<NameKey>,
        attr: &str,
    ) -> Result<Option<Value>> {
        Ok(self.element_data(host, key)?.get(attr).cloned())
    }

    /// Replace every element of a named set with `content`.
    ///
    /// Returns the set re-queried after the replacement. When keyboard
    /// focus was on or inside a replaced element, it moves to the closest
    /// focusable element of the new set.
    pub fn replace_element<H: DomHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: impl Into<NameKey>,
        content: impl Into<Content>,
    ) -> Result<ElementSet> {
        let key = key.into();
        let content = content.into();
        let targets = self.element(&*host, key.clone())?;
        let had_focus = holds_focus(&*host, &targets, true);

        let last = targets.len().saturating_sub(1);
        for (index, node) in targets.iter().enumerate() {
            let replacement = host.materialize(&content, index < last)?;
            host.replace_node(node, &replacement)?;
        }
        tracing::debug!("Replaced {} elements of {}", targets.len(), key);

        self.drop_element_cache(key.clone());
        let replaced = self.element(&*host, key)?;
        if had_focus {
            self.restore_focus(host, &replaced)?;
        }
        Ok(replaced)
    }

    /// Replace the children of every element of a named set.
    ///
    /// Focus strictly inside a target moves to the closest focusable
    /// element once the new content is in place.
    pub fn set_element_content<H: DomHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: impl Into<NameKey>,
        content: impl Into<Content>,
    ) -> Result<ElementSet> {
        let key = key.into();
        let content = content.into();
        let targets = self.element(&*host, key.clone())?;
        let had_focus = holds_focus(&*host, &targets, false);

        let last = targets.len().saturating_sub(1);
        for (index, node) in targets.iter().enumerate() {
            let children = host.materialize(&content, index < last)?;
            host.set_children(node, &children)?;
        }
        tracing::debug!("Set content of {} elements of {}", targets.len(), key);

        if had_focus {
            self.restore_focus(host, &targets)?;
        }
        Ok(targets)
    }

    /// Move focus to the first focusable element found walking up from
    /// each node of `set`, in set order
    pub fn fix_focus<H: DomHost + ?Sized>(&self, host: &mut H, set: &ElementSet) -> Result<Option<NodeId>> {
        for node in set.iter() {
            if let Some(target) = host.closest(node, &self.config.focusable_selector)? {
                return Ok(host.focus(target).then_some(target));
            }
        }
        tracing::debug!("Nothing focusable around {} elements", set.len());
        Ok(None)
    }

    fn restore_focus<H: DomHost + ?Sized>(&self, host: &mut H, set: &ElementSet) -> Result<()> {
        if !self.config.restore_focus {
            return Ok(());
        }
        if let Some(node) = self.fix_focus(host, set)? {
            tracing::debug!("Focus restored to {:?}", node);
        }
        Ok(())
    }
}

/// True when the focused element is inside a target (or is one, when `inclusive`)
fn holds_focus<H: DomHost + ?Sized>(host: &H, targets: &ElementSet, inclusive: bool) -> bool {
    let Some(active) = host.active_element() else {
        return false;
    };
    targets
        .iter()
        .any(|node| (inclusive && node == active) || host.contains(node, active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::names::{NameTable, StaticNames};
    use fos_dom::Document;

    const PAGE: &str = r#"<html><body>
        <div class="panel" data-id="7">
            <span class="label">a</span>
            <span class="label">b</span>
        </div>
    </body></html>"#;

    fn setup() -> (Document, ElementsView<StaticNames>) {
        let doc = fos_html::parse(PAGE).unwrap();
        let names = StaticNames::new([("label", "label"), ("active", "is-active")], [("panel", ".panel")]);
        let mut view = ElementsView::new(names);
        view.set_root(&doc, doc.body());
        (doc, view)
    }

    struct Counting {
        reads: Cell<usize>,
    }

    impl ElementNames for Counting {
        fn classes(&self) -> NameTable {
            self.reads.set(self.reads.get() + 1);
            NameTable::from([("label", "label")])
        }

        fn selectors(&self) -> NameTable {
            self.reads.set(self.reads.get() + 1);
            NameTable::from([("labelAt", ".label:nth-child(%s)")])
        }
    }

    #[test]
    fn test_names_read_once_per_binding() {
        let doc = fos_html::parse(PAGE).unwrap();
        let mut view = ElementsView::new(Counting { reads: Cell::new(0) });
        view.set_root(&doc, doc.body());

        for _ in 0..2 {
            view.element(&doc, "label").unwrap();
            view.element(&doc, ("labelAt", [2])).unwrap();
        }
        assert_eq!(view.names().reads.get(), 2);
        assert_eq!(view.cached_elements(), 2);

        view.set_root(&doc, doc.body());
        assert_eq!(view.cached_elements(), 0);
        assert_eq!(view.element(&doc, ("labelAt", [1])).unwrap().len(), 1);
        assert_eq!(view.names().reads.get(), 3);
        assert_eq!(view.element(&doc, "label").unwrap().len(), 2);
        assert_eq!(view.names().reads.get(), 4);
        assert_eq!(view.epoch(), 2);
    }

    #[test]
    fn test_reset_caches_keeps_binding() {
        let (doc, mut view) = setup();
        let labels = view.element(&doc, "label").unwrap();
        view.selector("panel").unwrap();

        view.reset_caches();
        assert_eq!(view.cached_elements(), 0);
        assert_eq!(view.epoch(), 1);
        assert_eq!(view.root(), Some(doc.body()));
        assert_eq!(view.data(), &Dataset::new());

        let again = view.element(&doc, "label").unwrap();
        assert!(!labels.same_set(&again));
        assert_eq!(labels, again);
    }

    #[test]
    fn test_unbound_view() {
        let doc = Document::default();
        let mut view = ElementsView::new(());
        assert!(matches!(view.element(&doc, "x"), Err(ElementsError::Unbound)));
        assert_eq!(view.epoch(), 0);
    }

    #[test]
    fn test_element_cached_until_dropped() {
        let (doc, mut view) = setup();
        let first = view.element(&doc, "label").unwrap();
        let second = view.element(&doc, "label").unwrap();
        assert_eq!(first.len(), 2);
        assert!(first.same_set(&second));

        assert!(view.drop_element_cache("label"));
        let third = view.element(&doc, "label").unwrap();
        assert!(!first.same_set(&third));
        assert_eq!(first, third);
    }

    #[test]
    fn test_cache_disabled() {
        let doc = fos_html::parse(PAGE).unwrap();
        let config = ViewConfig {
            cache_elements: false,
            ..ViewConfig::default()
        };
        let mut view = ElementsView::with_config(StaticNames::classes_only([("label", "label")]), config);
        view.set_root(&doc, doc.body());

        let first = view.element(&doc, "label").unwrap();
        let second = view.element(&doc, "label").unwrap();
        assert!(!first.same_set(&second));
        assert_eq!(view.cached_elements(), 0);
    }

    #[test]
    fn test_toggle_on_root_by_default() {
        let (mut doc, mut view) = setup();
        let body = doc.body();
        view.toggle_class(&mut doc, "active", Target::Root, None).unwrap();
        assert!(doc.tree().element(body).unwrap().has_class("is-active"));
        view.toggle_class(&mut doc, "active", Target::default(), Some(true)).unwrap();
        assert!(view.has_class(&doc, "active", Target::Root).unwrap());
    }

    #[test]
    fn test_element_data() {
        let (doc, mut view) = setup();
        assert_eq!(
            view.element_data_value(&doc, "panel", "id").unwrap(),
            Some(serde_json::json!(7))
        );
        assert!(view.element_data(&doc, "label").unwrap().is_empty());
    }
}
