//! Landing page builder core.
//!
//! Content model (sections, rows, columns, widgets, theme), pure builder
//! operations, the shared preview renderer, and SQLite persistence for
//! `/lp/{slug}` pages.

pub mod builder;
pub mod codec;
pub mod db;
pub mod logging;
pub mod media;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use builder::{ItemPath, MoveDirection};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use media::{LocalMediaStorage, MediaError, MediaStorage};
pub use model::layout::{Column, ColumnLayout, Row};
pub use model::page::{LandingPage, PageId, PageValidationError};
pub use model::section::{Section, SectionType};
pub use model::settings::Settings;
pub use model::theme::{ThemeSettings, ThemeUpdate};
pub use model::widget::{Widget, WidgetType};
pub use render::{render_page_html, render_section, RenderContext, RenderNode};
pub use repo::page_repo::{
    LandingPageRepository, PageListQuery, PageSummary, RepoError, RepoResult,
    SqliteLandingPageRepository,
};
pub use service::editor::{EditorError, PageEditor};
pub use service::page_service::{LandingPageService, PageServiceError, PublicPageError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
