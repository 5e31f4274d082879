//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the landing page store contract used by services.
//! - Keep SQLite query details out of service and editor code.
//!
//! # Invariants
//! - Repository writes enforce `LandingPage::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateSlug`) in
//!   addition to DB transport errors.

pub mod page_repo;
