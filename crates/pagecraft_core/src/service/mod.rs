//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into page-level use cases.
//! - Host the editing session that owns a page while it is being changed.

pub mod editor;
pub mod page_service;
