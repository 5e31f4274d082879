//! # pagecraft: landing page builder command line
//!
//! Operator front end over `pagecraft_core`: create pages, run builder
//! actions against a stored page, publish, and render `/lp/{slug}`.
//!
//! ## Global options
//!
//! - `--db` / `PAGECRAFT_DB`: SQLite file holding the `landing_pages` table.
//! - `--log-level` / `PAGECRAFT_LOG_LEVEL`: trace|debug|info|warn|error.
//! - `--log-dir` / `PAGECRAFT_LOG_DIR`: enables rolling file logs.
//! - `--media-dir` / `PAGECRAFT_MEDIA_DIR`, `--media-url` /
//!   `PAGECRAFT_MEDIA_URL`: local upload target and its public base URL.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pagecraft_core::{ColumnLayout, ItemPath, PageId, SectionType, WidgetType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagecraft", version, about = "Build and publish landing pages")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "PAGECRAFT_DB", default_value = "pagecraft.db")]
    db: PathBuf,

    /// Log level (defaults to debug in debug builds, info in release builds)
    #[arg(long, env = "PAGECRAFT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; file logging is off when unset
    #[arg(long, env = "PAGECRAFT_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Directory receiving uploaded media
    #[arg(long, env = "PAGECRAFT_MEDIA_DIR", default_value = "media")]
    media_dir: PathBuf,

    /// Public base URL under which the media directory is served
    #[arg(long, env = "PAGECRAFT_MEDIA_URL", default_value = "/media")]
    media_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty draft page
    New {
        title: String,
        /// Explicit slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,
    },
    /// List pages, most recently updated first
    List {
        #[arg(long, value_enum)]
        status: Option<PublishFilter>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Print the stored page document as JSON
    Show { page: PageId },
    /// Print widget, section, layout and font catalogs
    Catalog,
    /// Append a template section
    AddSection {
        page: PageId,
        #[arg(value_parser = parse_section_type)]
        kind: SectionType,
    },
    /// Append a row to a section's content area
    AddRow {
        page: PageId,
        section: uuid::Uuid,
        #[arg(long, default_value = "100", value_parser = parse_layout)]
        layout: ColumnLayout,
    },
    /// Append a widget to a column
    AddWidget {
        page: PageId,
        column: uuid::Uuid,
        #[arg(value_parser = parse_widget_type)]
        kind: WidgetType,
    },
    /// Change a row's column layout; widgets of removed columns are kept
    SetLayout {
        page: PageId,
        row: uuid::Uuid,
        #[arg(value_parser = parse_layout)]
        layout: ColumnLayout,
    },
    /// Merge a JSON object into an item's settings
    Update {
        page: PageId,
        /// `section:<id>`, `row:<id>`, `column:<id>` or `widget:<id>`
        item: ItemPath,
        settings: String,
    },
    /// Swap an item with its neighbour
    Move {
        page: PageId,
        item: ItemPath,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Clone an item right after itself
    Duplicate { page: PageId, item: ItemPath },
    /// Remove an item
    Delete { page: PageId, item: ItemPath },
    /// Set one theme token (`primaryColor`, `fontFamily`, `buttonStyle`, ...)
    Theme {
        page: PageId,
        key: String,
        value: String,
    },
    /// Edit page metadata
    Meta {
        page: PageId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        meta_title: Option<String>,
        #[arg(long)]
        meta_description: Option<String>,
        /// File whose contents become the page's custom CSS
        #[arg(long)]
        custom_css: Option<PathBuf>,
    },
    /// Make the page reachable at /lp/{slug}
    Publish { page: PageId },
    /// Take the page offline without deleting it
    Unpublish { page: PageId },
    /// Upload a file and store its URL in an item setting
    Upload {
        page: PageId,
        item: ItemPath,
        /// Settings key receiving the URL (for example `src` or `backgroundImage`)
        key: String,
        file: PathBuf,
    },
    /// Render the authoring preview of any page
    Preview {
        page: PageId,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the public page for a slug (published pages only)
    Render {
        slug: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a page permanently
    Remove { page: PageId },
}

#[derive(Clone, Copy, ValueEnum)]
enum PublishFilter {
    Published,
    Draft,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

fn parse_section_type(value: &str) -> Result<SectionType, String> {
    SectionType::parse(value).ok_or_else(|| format!("unknown section type `{value}`"))
}

fn parse_widget_type(value: &str) -> Result<WidgetType, String> {
    WidgetType::parse(value).ok_or_else(|| format!("unknown widget type `{value}`"))
}

fn parse_layout(value: &str) -> Result<ColumnLayout, String> {
    ColumnLayout::parse(value).ok_or_else(|| {
        format!("unknown layout `{value}`; expected 100|50-50|33-33-33|25-25-25-25|66-33|33-66")
    })
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let dir = std::path::absolute(dir)
            .with_context(|| format!("resolving log directory {}", dir.display()))?;
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| pagecraft_core::default_log_level().to_string());
        pagecraft_core::init_logging(&level, &dir.to_string_lossy())?;
    }

    let conn = pagecraft_core::open_db(&cli.db)
        .with_context(|| format!("opening database {}", cli.db.display()))?;
    commands::run(&cli, &conn)
}
