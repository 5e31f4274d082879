//! Landing page aggregate.
//!
//! # Responsibility
//! - Define the persisted aggregate root (metadata + sections + theme).
//! - Own slug derivation/validation and the publish toggle.
//!
//! # Invariants
//! - `slug` is the public routing key (`/lp/{slug}`) and is unique in storage.
//! - The publish toggle always writes `is_active == is_published`.
//! - `title` must be non-blank before the page is persisted.

use crate::model::section::Section;
use crate::model::theme::ThemeSettings;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type PageId = Uuid;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));
static NON_SLUG_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug separator regex"));

const MAX_SLUG_CHARS: usize = 80;

/// Validation failures for landing page writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageValidationError {
    EmptyTitle,
    InvalidSlug(String),
}

impl Display for PageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "landing page title must not be blank"),
            Self::InvalidSlug(slug) => write!(
                f,
                "invalid slug `{slug}`; expected lowercase letters, digits and single hyphens"
            ),
        }
    }
}

impl Error for PageValidationError {}

/// Persisted landing page aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPage {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub is_active: bool,
    pub is_published: bool,
    pub sections: Vec<Section>,
    pub theme_settings: ThemeSettings,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub custom_css: Option<String>,
    /// Epoch milliseconds, assigned by storage.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed by storage on every save.
    pub updated_at: i64,
}

impl LandingPage {
    /// Creates an empty draft page with a slug derived from the title.
    pub fn new(title: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let title = title.into();
        let slug = slugify(&title).unwrap_or_else(|| fallback_slug(id));
        Self::with_slug(id, title, slug)
    }

    /// Creates an empty draft page with caller-provided id and slug.
    pub fn with_slug(id: PageId, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
            description: String::new(),
            is_active: false,
            is_published: false,
            sections: Vec::new(),
            theme_settings: ThemeSettings::default(),
            meta_title: None,
            meta_description: None,
            custom_css: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Publish toggle; keeps `is_active` in lockstep with `is_published`.
    pub fn set_published(&mut self, published: bool) {
        self.is_published = published;
        self.is_active = published;
    }

    /// Validates write-time invariants.
    pub fn validate(&self) -> Result<(), PageValidationError> {
        if self.title.trim().is_empty() {
            return Err(PageValidationError::EmptyTitle);
        }
        if !is_valid_slug(&self.slug) {
            return Err(PageValidationError::InvalidSlug(self.slug.clone()));
        }
        Ok(())
    }

    /// Public route for this page.
    pub fn public_path(&self) -> String {
        format!("/lp/{}", self.slug)
    }

    /// Title used for `<title>`: `meta_title` when set, else `title`.
    pub fn display_title(&self) -> &str {
        self.meta_title
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(self.title.as_str())
    }
}

/// Derives a URL slug from free text.
///
/// Returns `None` when the text has no ASCII letters or digits (for example a
/// Bengali-only title).
pub fn slugify(text: &str) -> Option<String> {
    let lowered = text.trim().to_ascii_lowercase();
    let replaced = NON_SLUG_CHARS_RE.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');
    if trimmed.is_empty() {
        return None;
    }
    let capped: String = trimmed.chars().take(MAX_SLUG_CHARS).collect();
    Some(capped.trim_end_matches('-').to_string())
}

pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= MAX_SLUG_CHARS && SLUG_RE.is_match(slug)
}

fn fallback_slug(id: PageId) -> String {
    let simple = id.simple().to_string();
    format!("page-{}", &simple[..8])
}

#[cfg(test)]
mod tests {
    use super::{is_valid_slug, slugify, LandingPage, PageValidationError};

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Summer Sale!").as_deref(), Some("summer-sale"));
        assert_eq!(slugify("  --Eid  Offer 2024-- ").as_deref(), Some("eid-offer-2024"));
        assert_eq!(slugify("ঈদ অফার"), None);
    }

    #[test]
    fn non_latin_title_gets_fallback_slug() {
        let page = LandingPage::new("ঈদ অফার");
        assert!(page.slug.starts_with("page-"));
        assert!(is_valid_slug(&page.slug));
    }

    #[test]
    fn publish_toggle_keeps_flags_together() {
        let mut page = LandingPage::new("Promo");
        page.set_published(true);
        assert!(page.is_active && page.is_published);
        page.set_published(false);
        assert!(!page.is_active && !page.is_published);
    }

    #[test]
    fn validate_rejects_blank_title_and_bad_slug() {
        let mut page = LandingPage::new("   ");
        assert_eq!(page.validate(), Err(PageValidationError::EmptyTitle));
        page.title = "Fine".to_string();
        page.slug = "Bad Slug".to_string();
        assert!(matches!(
            page.validate(),
            Err(PageValidationError::InvalidSlug(_))
        ));
    }
}
