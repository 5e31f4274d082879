//! Landing page use-case service.
//!
//! # Responsibility
//! - Create, load, save, publish and delete landing pages.
//! - Resolve the public route `/lp/{slug}` to a published page.
//!
//! # Invariants
//! - Saves validate the page before any SQL is issued.
//! - Publishing writes `is_active` and `is_published` together.
//! - A failed save leaves the caller's page untouched.
//! - Unpublished, deleted and unknown slugs are all reported as not-found.

use crate::builder::factory::now_epoch_ms;
use crate::model::page::{LandingPage, PageId, PageValidationError};
use crate::render::countdown::RenderContext;
use crate::render::page::render_page_html;
use crate::repo::page_repo::{
    LandingPageRepository, PageListQuery, PageSummary, RepoError,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PageServiceResult<T> = Result<T, PageServiceError>;

/// Service error for back-office page use-cases.
#[derive(Debug)]
pub enum PageServiceError {
    /// Page failed write-time validation; nothing was persisted.
    Validation(PageValidationError),
    /// Target page does not exist.
    PageNotFound(PageId),
    /// Another page already owns the slug.
    DuplicateSlug(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for PageServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::PageNotFound(id) => write!(f, "landing page not found: {id}"),
            Self::DuplicateSlug(slug) => write!(f, "slug `{slug}` is already taken"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PageServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PageValidationError> for PageServiceError {
    fn from(value: PageValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for PageServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::PageNotFound(id),
            RepoError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            other => Self::Repo(other),
        }
    }
}

/// Public route failure.
#[derive(Debug)]
pub enum PublicPageError {
    /// No published page under the slug.
    NotFound(String),
    Repo(RepoError),
}

impl Display for PublicPageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(slug) => write!(f, "no published landing page at /lp/{slug}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PublicPageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for PublicPageError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over a landing page repository.
pub struct LandingPageService<R: LandingPageRepository> {
    repo: R,
}

impl<R: LandingPageRepository> LandingPageService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an empty draft page with a slug derived from `title`.
    pub fn create_page(&self, title: impl Into<String>) -> PageServiceResult<LandingPage> {
        self.insert(LandingPage::new(title))
    }

    /// Creates an empty draft page under an explicit slug.
    pub fn create_page_with_slug(
        &self,
        title: impl Into<String>,
        slug: impl Into<String>,
    ) -> PageServiceResult<LandingPage> {
        self.insert(LandingPage::with_slug(PageId::new_v4(), title, slug))
    }

    fn insert(&self, mut page: LandingPage) -> PageServiceResult<LandingPage> {
        page.validate()?;
        let now = now_epoch_ms();
        page.created_at = now;
        page.updated_at = now;
        self.repo.create_page(&page)?;
        info!(
            "event=page_create module=service status=ok page_id={} slug={}",
            page.id, page.slug
        );
        Ok(page)
    }

    /// Loads the full aggregate for editing.
    pub fn load(&self, id: PageId) -> PageServiceResult<LandingPage> {
        self.repo
            .get_page(id)?
            .ok_or(PageServiceError::PageNotFound(id))
    }

    /// Persists the whole page; on success `page.updated_at` is refreshed.
    ///
    /// # Errors
    /// - `Validation` before any SQL when title or slug is invalid.
    /// - `Repo` when the store rejects the write; `page` is left unchanged.
    pub fn save(&self, page: &mut LandingPage) -> PageServiceResult<()> {
        page.validate()?;

        let mut stamped = page.clone();
        stamped.updated_at = now_epoch_ms().max(page.updated_at + 1);
        match self.repo.save_page(&stamped) {
            Ok(()) => {
                page.updated_at = stamped.updated_at;
                info!(
                    "event=page_save module=service status=ok page_id={} sections={}",
                    page.id,
                    page.sections.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=page_save module=service status=error page_id={} error={}",
                    page.id, err
                );
                Err(err.into())
            }
        }
    }

    /// Publish toggle used by the back-office list.
    ///
    /// Only the flags and `updated_at` are written, so items the lenient
    /// loader would skip stay in storage untouched.
    pub fn set_published(&self, id: PageId, published: bool) -> PageServiceResult<LandingPage> {
        let current = self.load(id)?;
        let updated_at = now_epoch_ms().max(current.updated_at + 1);
        self.repo.set_publish_state(id, published, updated_at)?;
        info!(
            "event=page_publish module=service status=ok page_id={} published={}",
            id, published
        );

        let mut page = current;
        page.set_published(published);
        page.updated_at = updated_at;
        Ok(page)
    }

    pub fn toggle_published(&self, id: PageId) -> PageServiceResult<LandingPage> {
        let current = self.load(id)?.is_published;
        self.set_published(id, !current)
    }

    /// Removes the page; its public route 404s immediately.
    pub fn delete(&self, id: PageId) -> PageServiceResult<()> {
        self.repo.delete_page(id)?;
        info!("event=page_delete module=service status=ok page_id={}", id);
        Ok(())
    }

    pub fn list(&self, query: &PageListQuery) -> PageServiceResult<Vec<PageSummary>> {
        Ok(self.repo.list_pages(query)?)
    }

    /// Resolves `/lp/{slug}` to a published page.
    pub fn resolve_public(&self, slug: &str) -> Result<LandingPage, PublicPageError> {
        match self.repo.find_published_by_slug(slug)? {
            Some(page) => Ok(page),
            None => {
                info!(
                    "event=public_resolve module=service status=not_found slug={}",
                    slug
                );
                Err(PublicPageError::NotFound(slug.to_string()))
            }
        }
    }

    /// Full HTML response body for `/lp/{slug}`.
    pub fn render_public_html(&self, slug: &str) -> Result<String, PublicPageError> {
        self.render_public_html_at(slug, &RenderContext::now())
    }

    pub fn render_public_html_at(
        &self,
        slug: &str,
        ctx: &RenderContext,
    ) -> Result<String, PublicPageError> {
        let page = self.resolve_public(slug)?;
        Ok(render_page_html(&page, ctx))
    }
}
