//! View errors
//!
//! Every error here is a programming error in the view's name tables or in
//! the way an operation was called. Nothing is retried or recovered.

use fos_css::CssError;
use fos_dom::DomError;
use fos_html::HtmlError;

use crate::placeholder::Slot;

/// Result type for view operations
pub type Result<T> = std::result::Result<T, ElementsError>;

/// Errors raised while resolving names, templates and elements
#[derive(Debug, thiserror::Error)]
pub enum ElementsError {
    /// No class or selector is registered under the name
    #[error("CSS class or selector for `{name}` is not found")]
    NameNotFound { name: String },

    /// Substitution was requested without any replacement values
    #[error("Replacement for `{template}` needs positional or named values")]
    Template { template: String },

    /// A placeholder has no value
    #[error("Replacement is undefined while processing `{template}` for {slot}")]
    Substitution { template: String, slot: Slot },

    /// Element operations need a root
    #[error("View is not bound to a root element")]
    Unbound,

    #[error(transparent)]
    Selector(#[from] CssError),

    #[error(transparent)]
    Html(#[from] HtmlError),

    #[error(transparent)]
    Dom(#[from] DomError),
}
