//! fOS View
//!
//! Named access to the elements of a view. A view declares element names
//! with CSS class and selector templates; this crate resolves those names
//! (filling `%s` and `%(key)s` placeholders), finds the matching elements
//! under the view's root, and caches what it finds until the root changes.
//!
//! ```rust,ignore
//! use fos_view::{ElementsView, StaticNames};
//!
//! let mut doc = fos_html::parse(html)?;
//! let names = StaticNames::new([("item", "list__item")], [("itemByNumber", ".list__item[data-n=%s]")]);
//! let mut view = ElementsView::new(names);
//! view.set_root(&doc, doc.body());
//!
//! let third = view.element(&doc, ("itemByNumber", [3]))?;
//! view.add_class(&mut doc, "item", &third)?;
//! ```

mod cache;
mod config;
mod error;
mod host;
mod names;
mod placeholder;
mod registry;
mod view;

pub use cache::{ElementSet, NameKey};
pub use config::{DEFAULT_FOCUSABLE_SELECTOR, ViewConfig};
pub use error::{ElementsError, Result};
pub use host::{Content, DomHost};
pub use names::{ElementNames, NameTable, StaticNames};
pub use placeholder::{Arg, Placeholders, Slot, substitute};
pub use view::{ElementsView, Target};

pub use fos_dom::{Dataset, Document, NodeId};
