//! Builder palette factories and document mutation operations.
//!
//! # Responsibility
//! - Construct default sections, rows and widgets.
//! - Transform a page document in response to editor actions.
//!
//! # Invariants
//! - Builder functions are pure data transforms and never return errors.
//! - Row layout changes never drop widgets.

pub mod factory;
pub mod layout;
pub mod ops;

pub use factory::{
    create_default_column, create_default_row, create_section, create_section_at, create_widget,
};
pub use layout::change_layout;
pub use ops::{
    add_row, add_section, add_widget, attach_media, contains_item, delete_item, duplicate_item,
    item_ids, move_item, set_row_layout, update_item, ItemPath, MoveDirection,
};
