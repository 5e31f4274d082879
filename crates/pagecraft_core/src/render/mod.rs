//! Preview renderer shared by the authoring preview and published pages.
//!
//! # Responsibility
//! - Map sections, rows and widgets plus the theme to a render tree.
//! - Serialize render trees to HTML.
//!
//! # Invariants
//! - Rendering is pure apart from the clock carried by `RenderContext`.
//! - No input document makes rendering fail.

pub mod blocks;
pub mod countdown;
pub mod node;
pub mod page;
pub mod section;
pub mod theme;
pub mod widget;

pub use countdown::{parse_end_date, remaining, Remaining, RenderContext};
pub use node::{escape_html, Element, RenderNode};
pub use page::{render_page, render_page_html, render_sections, render_sections_value};
pub use section::{render_section, render_section_at, CHECKOUT_ANCHOR};
pub use theme::theme_css_variables;
pub use widget::{render_row, render_widget};
