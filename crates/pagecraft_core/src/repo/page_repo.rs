//! Landing page repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the page aggregate as one `landing_pages` row with the section
//!   tree and theme stored as opaque JSON columns.
//! - Serve the public slug lookup and the back-office listing.
//!
//! # Invariants
//! - Write paths call `LandingPage::validate()` before any SQL.
//! - `save_page` overwrites every column of the row (last save wins).
//! - `set_publish_state` touches only the two flags and `updated_at`; the
//!   stored JSON columns are never re-encoded by a publish toggle.
//! - `find_published_by_slug` never returns an unpublished page.
//! - Row metadata is read strictly; the JSON columns are decoded leniently.

use crate::codec::{decode_sections, decode_theme, encode_sections, encode_theme};
use crate::db::DbError;
use crate::model::page::{LandingPage, PageId, PageValidationError};
use log::warn;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PAGE_SELECT_SQL: &str = "SELECT
    id,
    title,
    slug,
    description,
    is_active,
    is_published,
    sections,
    theme_settings,
    meta_title,
    meta_description,
    custom_css,
    created_at,
    updated_at
FROM landing_pages";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for landing page persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(PageValidationError),
    Db(DbError),
    NotFound(PageId),
    DuplicateSlug(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "landing page not found: {id}"),
            Self::DuplicateSlug(slug) => write!(f, "slug `{slug}` is already used by another page"),
            Self::InvalidData(message) => write!(f, "invalid persisted page data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateSlug(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<PageValidationError> for RepoError {
    fn from(value: PageValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Listing filter and pagination.
#[derive(Debug, Clone, Default)]
pub struct PageListQuery {
    /// `Some(true)` keeps only published pages, `Some(false)` only drafts.
    pub published: Option<bool>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Back-office listing row; the section tree is not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub is_published: bool,
    pub section_count: usize,
    pub updated_at: i64,
}

/// Repository interface for the landing page store.
pub trait LandingPageRepository {
    fn create_page(&self, page: &LandingPage) -> RepoResult<PageId>;
    fn save_page(&self, page: &LandingPage) -> RepoResult<()>;
    fn set_publish_state(&self, id: PageId, published: bool, updated_at: i64) -> RepoResult<()>;
    fn get_page(&self, id: PageId) -> RepoResult<Option<LandingPage>>;
    fn find_published_by_slug(&self, slug: &str) -> RepoResult<Option<LandingPage>>;
    fn list_pages(&self, query: &PageListQuery) -> RepoResult<Vec<PageSummary>>;
    fn delete_page(&self, id: PageId) -> RepoResult<()>;
}

/// SQLite-backed landing page repository.
pub struct SqliteLandingPageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLandingPageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LandingPageRepository for SqliteLandingPageRepository<'_> {
    fn create_page(&self, page: &LandingPage) -> RepoResult<PageId> {
        page.validate()?;
        let columns = EncodedColumns::encode(page)?;

        self.conn
            .execute(
                "INSERT INTO landing_pages (
                    id,
                    title,
                    slug,
                    description,
                    is_active,
                    is_published,
                    sections,
                    theme_settings,
                    meta_title,
                    meta_description,
                    custom_css,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
                params![
                    page.id.to_string(),
                    page.title.as_str(),
                    page.slug.as_str(),
                    page.description.as_str(),
                    bool_to_int(page.is_active),
                    bool_to_int(page.is_published),
                    columns.sections,
                    columns.theme,
                    page.meta_title.as_deref(),
                    page.meta_description.as_deref(),
                    page.custom_css.as_deref(),
                    page.created_at,
                    page.updated_at,
                ],
            )
            .map_err(|err| map_write_error(err, &page.slug))?;

        Ok(page.id)
    }

    fn save_page(&self, page: &LandingPage) -> RepoResult<()> {
        page.validate()?;
        let columns = EncodedColumns::encode(page)?;

        let changed = self
            .conn
            .execute(
                "UPDATE landing_pages
                 SET
                    title = ?1,
                    slug = ?2,
                    description = ?3,
                    is_active = ?4,
                    is_published = ?5,
                    sections = ?6,
                    theme_settings = ?7,
                    meta_title = ?8,
                    meta_description = ?9,
                    custom_css = ?10,
                    updated_at = ?11
                 WHERE id = ?12;",
                params![
                    page.title.as_str(),
                    page.slug.as_str(),
                    page.description.as_str(),
                    bool_to_int(page.is_active),
                    bool_to_int(page.is_published),
                    columns.sections,
                    columns.theme,
                    page.meta_title.as_deref(),
                    page.meta_description.as_deref(),
                    page.custom_css.as_deref(),
                    page.updated_at,
                    page.id.to_string(),
                ],
            )
            .map_err(|err| map_write_error(err, &page.slug))?;

        if changed == 0 {
            return Err(RepoError::NotFound(page.id));
        }

        Ok(())
    }

    fn set_publish_state(&self, id: PageId, published: bool, updated_at: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE landing_pages
             SET
                is_active = ?1,
                is_published = ?1,
                updated_at = ?2
             WHERE id = ?3;",
            params![bool_to_int(published), updated_at, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_page(&self, id: PageId) -> RepoResult<Option<LandingPage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PAGE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_page_row(row)?));
        }

        Ok(None)
    }

    fn find_published_by_slug(&self, slug: &str) -> RepoResult<Option<LandingPage>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PAGE_SELECT_SQL}
             WHERE slug = ?1
               AND is_published = 1;"
        ))?;

        let mut rows = stmt.query([slug.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_page_row(row)?));
        }

        Ok(None)
    }

    fn list_pages(&self, query: &PageListQuery) -> RepoResult<Vec<PageSummary>> {
        let mut sql = String::from(
            "SELECT
                id,
                title,
                slug,
                is_published,
                CASE
                    WHEN json_valid(sections) AND json_type(sections) = 'array'
                    THEN json_array_length(sections)
                    ELSE 0
                END AS section_count,
                updated_at
             FROM landing_pages
             WHERE 1 = 1",
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(published) = query.published {
            sql.push_str(" AND is_published = ?");
            bind_values.push(Value::Integer(bool_to_int(published)));
        }

        sql.push_str(" ORDER BY updated_at DESC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut pages = Vec::new();

        while let Some(row) = rows.next()? {
            let section_count: i64 = row.get("section_count")?;
            pages.push(PageSummary {
                id: parse_page_id(row)?,
                title: row.get("title")?,
                slug: row.get("slug")?,
                is_published: parse_flag(row, "is_published")?,
                section_count: usize::try_from(section_count).unwrap_or(0),
                updated_at: row.get("updated_at")?,
            });
        }

        Ok(pages)
    }

    fn delete_page(&self, id: PageId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM landing_pages WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

struct EncodedColumns {
    sections: String,
    theme: String,
}

impl EncodedColumns {
    fn encode(page: &LandingPage) -> RepoResult<Self> {
        let sections = encode_sections(&page.sections).map_err(|err| {
            RepoError::InvalidData(format!("cannot encode sections for page {}: {err}", page.id))
        })?;
        let theme = encode_theme(&page.theme_settings).map_err(|err| {
            RepoError::InvalidData(format!("cannot encode theme for page {}: {err}", page.id))
        })?;
        Ok(Self { sections, theme })
    }
}

fn map_write_error(err: rusqlite::Error, slug: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == ErrorCode::ConstraintViolation
                && message.contains("landing_pages.slug") =>
        {
            RepoError::DuplicateSlug(slug.to_string())
        }
        _ => err.into(),
    }
}

fn parse_page_row(row: &Row<'_>) -> RepoResult<LandingPage> {
    let id = parse_page_id(row)?;

    let sections_text: String = row.get("sections")?;
    let sections = decode_sections(&sections_text);
    if sections.skipped > 0 {
        warn!(
            "event=page_load module=repo status=partial page_id={} skipped_items={}",
            id, sections.skipped
        );
    }
    let theme_text: String = row.get("theme_settings")?;

    let page = LandingPage {
        id,
        title: row.get("title")?,
        slug: row.get("slug")?,
        description: row.get("description")?,
        is_active: parse_flag(row, "is_active")?,
        is_published: parse_flag(row, "is_published")?,
        sections: sections.value,
        theme_settings: decode_theme(&theme_text),
        meta_title: row.get("meta_title")?,
        meta_description: row.get("meta_description")?,
        custom_css: row.get("custom_css")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    page.validate()?;
    Ok(page)
}

fn parse_page_id(row: &Row<'_>) -> RepoResult<PageId> {
    let id_text: String = row.get("id")?;
    Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in landing_pages.id"))
    })
}

fn parse_flag(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in landing_pages.{column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
