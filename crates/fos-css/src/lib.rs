//! fOS CSS Selectors
//!
//! Selector parsing and matching against the fOS DOM tree.

mod selectors;
mod matching;

pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};
pub use matching::SelectorQuery;

/// Parse a selector list
pub fn parse_selector(text: &str) -> Result<SelectorList, CssError> {
    SelectorList::parse(text)
}

/// CSS selector error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
}
