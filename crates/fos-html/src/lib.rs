//! fOS HTML Parser
//!
//! HTML5 parsing built on html5ever, producing fOS DOM trees.

mod parser;

pub use parser::HtmlParser;
pub use fos_dom::Document;

use fos_dom::{DomError, DomTree, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// Parse an HTML fragment into detached nodes owned by `tree`
pub fn parse_fragment(html: &str, tree: &mut DomTree) -> Result<Vec<NodeId>, HtmlError> {
    HtmlParser::new().parse_fragment(html, tree)
}

/// HTML parsing error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build DOM: {0}")]
    Dom(#[from] DomError),
}
