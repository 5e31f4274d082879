//! Landing page content model.
//!
//! # Responsibility
//! - Define the document tree: sections → rows → columns → widgets.
//! - Define theme tokens and the persisted page aggregate.
//!
//! # Invariants
//! - Every tree item is identified by a UUID unique within its page.
//! - Section and widget kinds are closed enums with one settings template
//!   per variant.

pub mod layout;
pub mod page;
pub mod section;
pub mod settings;
pub mod theme;
pub mod widget;
