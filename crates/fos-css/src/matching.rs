//! Selector Matching
//!
//! Matches parsed selectors against `DomTree` elements, right to left.
//! Queries follow `querySelectorAll`: the whole selector is evaluated in
//! document context and only descendants of the query root are returned.

use fos_dom::{DomTree, ElementData, NodeData, NodeId};

use crate::{
    Combinator, ComplexSelector, CompoundSelector, CssError, PseudoClass, SelectorComponent,
    SelectorList,
};

/// Elements that take part in :enabled / :disabled
const FORM_CONTROLS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

impl SelectorList {
    /// Check if an element matches any selector of the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node))
    }

    /// All matching descendants of `root`, in document order
    pub fn query_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .into_iter()
            .filter(|&node| self.matches(tree, node))
            .collect()
    }

    /// First matching descendant of `root`
    pub fn query_first(&self, tree: &DomTree, root: NodeId) -> Option<NodeId> {
        tree.descendants(root)
            .into_iter()
            .find(|&node| self.matches(tree, node))
    }

    /// Closest inclusive ancestor matching the list
    pub fn closest(&self, tree: &DomTree, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|&candidate| self.matches(tree, candidate))
    }
}

impl ComplexSelector {
    /// Check if an element matches this selector
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            len => self.matches_at(tree, node, len - 1),
        }
    }

    fn matches_at(&self, tree: &DomTree, node: NodeId, index: usize) -> bool {
        if !self.compounds[index].matches(tree, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Descendant => tree
                .ancestors(node)
                .any(|ancestor| self.matches_at(tree, ancestor, index - 1)),
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|parent| self.matches_at(tree, parent, index - 1)),
            Combinator::NextSibling => previous_element_siblings(tree, node)
                .next()
                .is_some_and(|sibling| self.matches_at(tree, sibling, index - 1)),
            Combinator::SubsequentSibling => previous_element_siblings(tree, node)
                .any(|sibling| self.matches_at(tree, sibling, index - 1)),
        }
    }
}

impl CompoundSelector {
    /// Check if an element satisfies every component
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(element) = tree.element(node) else {
            return false;
        };
        self.components
            .iter()
            .all(|component| match_component(tree, node, element, component))
    }
}

fn match_component(
    tree: &DomTree,
    node: NodeId,
    element: &ElementData,
    component: &SelectorComponent,
) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => element.tag_name().eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => element.id() == Some(id.as_str()),
        SelectorComponent::Class(class) => element.has_class(class),
        SelectorComponent::Attribute(attr) => attr.matches(element.get_attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(tree, node, element, pseudo),
    }
}

fn match_pseudo_class(
    tree: &DomTree,
    node: NodeId,
    element: &ElementData,
    pseudo: &PseudoClass,
) -> bool {
    let is_form_control = || FORM_CONTROLS.contains(&element.tag_name());

    match pseudo {
        PseudoClass::Root => tree.parent(node) == Some(NodeId::ROOT),
        PseudoClass::Empty => tree
            .children(node)
            .all(|(_, child)| matches!(child.data, NodeData::Comment(_))),
        PseudoClass::FirstChild => sibling_position(tree, node).0 == 1,
        PseudoClass::LastChild => {
            let (index, count) = sibling_position(tree, node);
            index == count
        }
        PseudoClass::OnlyChild => sibling_position(tree, node).1 == 1,
        PseudoClass::NthChild(expr) => expr.matches(sibling_position(tree, node).0 as i32),
        PseudoClass::NthLastChild(expr) => {
            let (index, count) = sibling_position(tree, node);
            expr.matches((count - index + 1) as i32)
        }
        PseudoClass::Disabled => is_form_control() && element.has_attr("disabled"),
        PseudoClass::Enabled => is_form_control() && !element.has_attr("disabled"),
        PseudoClass::Checked => element.has_attr("checked") || element.has_attr("selected"),
        PseudoClass::Not(inner) => !inner.matches(tree, node),
    }
}

/// 1-based index among element siblings and the sibling count
fn sibling_position(tree: &DomTree, node: NodeId) -> (usize, usize) {
    let Some(parent) = tree.parent(node) else {
        return (1, 1);
    };
    let siblings = tree.element_children(parent);
    let index = siblings.iter().position(|&s| s == node).map_or(1, |i| i + 1);
    (index, siblings.len())
}

/// Element siblings before `node`, nearest first
fn previous_element_siblings(tree: &DomTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let mut current = tree.get(node).map_or(NodeId::NONE, |n| n.prev_sibling);
    std::iter::from_fn(move || {
        while let Some(sibling) = tree.get(current) {
            let id = current;
            current = sibling.prev_sibling;
            if sibling.is_element() {
                return Some(id);
            }
        }
        None
    })
}

/// String-selector queries over a tree
pub trait SelectorQuery {
    /// All descendants of `root` matching `selector`
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, CssError>;

    /// First descendant of `root` matching `selector`
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, CssError>;

    /// Closest inclusive ancestor matching `selector`
    fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, CssError>;

    /// Check if `node` matches `selector`
    fn matches(&self, node: NodeId, selector: &str) -> Result<bool, CssError>;
}

impl SelectorQuery for DomTree {
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, CssError> {
        let found = SelectorList::parse(selector)?.query_all(self, root);
        tracing::trace!("`{}` matched {} nodes under {:?}", selector, found.len(), root);
        Ok(found)
    }

    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, CssError> {
        Ok(SelectorList::parse(selector)?.query_first(self, root))
    }

    fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, CssError> {
        Ok(SelectorList::parse(selector)?.closest(self, node))
    }

    fn matches(&self, node: NodeId, selector: &str) -> Result<bool, CssError> {
        Ok(SelectorList::parse(selector)?.matches(self, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// body > ul > li.item x3, second li disabled button inside
    fn fixture() -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(NodeId::ROOT, body).unwrap();
        let ul = tree.create_element("ul");
        tree.append_child(body, ul).unwrap();
        let mut items = Vec::new();
        for n in 1..=3 {
            let li = tree.create_element("li");
            tree.set_attribute(li, "class", "item").unwrap();
            tree.set_attribute(li, "data-n", &n.to_string()).unwrap();
            tree.append_child(ul, li).unwrap();
            items.push(li);
        }
        (tree, ul, items)
    }

    #[test]
    fn test_class_and_attribute_query() {
        let (tree, ul, items) = fixture();
        assert_eq!(tree.query_selector_all(ul, ".item").unwrap(), items);
        assert_eq!(tree.query_selector_all(ul, ".item[data-n=2]").unwrap(), vec![items[1]]);
        assert_eq!(tree.query_selector(ul, "li:last-child").unwrap(), Some(items[2]));
    }

    #[test]
    fn test_structural_pseudo_classes() {
        let (tree, ul, items) = fixture();
        assert_eq!(tree.query_selector_all(ul, "li:nth-child(odd)").unwrap(), vec![items[0], items[2]]);
        assert_eq!(tree.query_selector_all(ul, "li:not(:first-child)").unwrap(), vec![items[1], items[2]]);
        assert!(tree.query_selector_all(ul, "li:only-child").unwrap().is_empty());
        assert!(tree.matches(items[0], "li:empty").unwrap());
    }

    #[test]
    fn test_combinators() {
        let (tree, _, items) = fixture();
        assert_eq!(tree.query_selector_all(NodeId::ROOT, "body li").unwrap(), items);
        assert_eq!(tree.query_selector_all(NodeId::ROOT, "ul > li + li").unwrap(), vec![items[1], items[2]]);
        assert_eq!(tree.query_selector_all(NodeId::ROOT, "[data-n=\"1\"] ~ li").unwrap(), vec![items[1], items[2]]);
        assert!(tree.query_selector_all(NodeId::ROOT, "body > li").unwrap().is_empty());
    }

    #[test]
    fn test_query_excludes_root() {
        let (tree, ul, _) = fixture();
        assert!(tree.query_selector_all(ul, "ul").unwrap().is_empty());
    }

    #[test]
    fn test_closest_is_inclusive() {
        let (mut tree, ul, items) = fixture();
        tree.set_attribute(ul, "tabindex", "0").unwrap();
        assert_eq!(tree.closest(items[0], "[tabindex]").unwrap(), Some(ul));
        assert_eq!(tree.closest(items[0], "li").unwrap(), Some(items[0]));
        assert_eq!(tree.closest(items[0], "table").unwrap(), None);
    }

    #[test]
    fn test_disabled_button() {
        let (mut tree, _, items) = fixture();
        let button = tree.create_element("button");
        tree.set_attribute(button, "disabled", "").unwrap();
        tree.append_child(items[1], button).unwrap();
        assert!(tree.matches(button, "button:disabled").unwrap());
        assert!(!tree.matches(button, "button:not(:disabled)").unwrap());
        assert!(!tree.matches(items[1], ":disabled").unwrap());
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let (tree, ul, _) = fixture();
        assert!(matches!(
            tree.query_selector_all(ul, "li::after"),
            Err(CssError::InvalidSelector { .. })
        ));
    }
}
