//! Subcommand execution.
//!
//! Every mutating command loads the page into a `PageEditor`, applies one
//! builder action and saves the whole page, mirroring one edit-and-save
//! round trip in the visual builder.

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use pagecraft_core::builder::MoveDirection;
use pagecraft_core::model::theme::FontFamily;
use pagecraft_core::render::render_page;
use pagecraft_core::{
    ColumnLayout, ItemPath, LandingPageService, LocalMediaStorage, PageEditor, PageId,
    PageListQuery, RenderContext, SectionType, Settings, SqliteLandingPageRepository,
    ThemeUpdate, WidgetType,
};
use rusqlite::Connection;
use std::path::Path;

use super::{Cli, Commands, Direction, PublishFilter};

type Service<'conn> = LandingPageService<SqliteLandingPageRepository<'conn>>;

pub fn run(cli: &Cli, conn: &Connection) -> Result<()> {
    let service = LandingPageService::new(SqliteLandingPageRepository::new(conn));

    match &cli.command {
        Commands::New { title, slug } => {
            let page = match slug {
                Some(slug) => service.create_page_with_slug(title.as_str(), slug.as_str())?,
                None => service.create_page(title.as_str())?,
            };
            println!("{}\t{}", page.id, page.public_path());
        }
        Commands::List {
            status,
            limit,
            offset,
        } => {
            let query = PageListQuery {
                published: status.map(|status| matches!(status, PublishFilter::Published)),
                limit: *limit,
                offset: *offset,
            };
            for page in service.list(&query)? {
                println!(
                    "{}\t{}\t{}\t{} sections\t/lp/{}",
                    page.id,
                    if page.is_published { "published" } else { "draft" },
                    page.title,
                    page.section_count,
                    page.slug
                );
            }
        }
        Commands::Show { page } => {
            let page = service.load(*page)?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Commands::Catalog => print_catalog(),
        Commands::AddSection { page, kind } => {
            let kind = *kind;
            let id = edit(&service, *page, |editor| Ok(editor.add_section(kind)))?;
            println!("section:{id}");
        }
        Commands::AddRow {
            page,
            section,
            layout,
        } => {
            let (section, layout) = (*section, *layout);
            let id = edit(&service, *page, |editor| {
                Ok(editor.add_row(section, layout)?)
            })?;
            println!("row:{id}");
        }
        Commands::AddWidget { page, column, kind } => {
            let (column, kind) = (*column, *kind);
            let id = edit(&service, *page, |editor| {
                editor.select_column(column)?;
                editor
                    .add_widget(kind)
                    .ok_or_else(|| anyhow!("column {column} did not accept the widget"))
            })?;
            println!("widget:{id}");
        }
        Commands::SetLayout { page, row, layout } => {
            let (row, layout) = (*row, *layout);
            require_item(&service, *page, ItemPath::Row(row))?;
            edit(&service, *page, |editor| {
                editor.set_row_layout(row, layout);
                Ok(())
            })?;
        }
        Commands::Update {
            page,
            item,
            settings,
        } => {
            let partial: Settings = serde_json::from_str(settings)
                .context("settings must be a JSON object")?;
            let item = *item;
            require_item(&service, *page, item)?;
            edit(&service, *page, |editor| {
                editor.update_item(item, &partial);
                Ok(())
            })?;
        }
        Commands::Move {
            page,
            item,
            direction,
        } => {
            let item = *item;
            let direction = match direction {
                Direction::Up => MoveDirection::Up,
                Direction::Down => MoveDirection::Down,
            };
            require_item(&service, *page, item)?;
            edit(&service, *page, |editor| {
                editor.move_item(item, direction);
                Ok(())
            })?;
        }
        Commands::Duplicate { page, item } => {
            let item = *item;
            require_item(&service, *page, item)?;
            if matches!(item, ItemPath::Column(_)) {
                bail!("columns cannot be duplicated; change the row layout instead");
            }
            edit(&service, *page, |editor| {
                editor.duplicate_item(item);
                Ok(())
            })?;
        }
        Commands::Delete { page, item } => {
            let item = *item;
            require_item(&service, *page, item)?;
            if matches!(item, ItemPath::Column(_)) {
                bail!("columns cannot be deleted; change the row layout instead");
            }
            edit(&service, *page, |editor| {
                editor.delete_item(item);
                Ok(())
            })?;
        }
        Commands::Theme { page, key, value } => {
            let update = ThemeUpdate::parse(key, value)
                .ok_or_else(|| anyhow!("unknown theme key `{key}` or invalid value `{value}`"))?;
            edit(&service, *page, |editor| {
                editor.update_theme(update);
                Ok(())
            })?;
        }
        Commands::Meta {
            page,
            title,
            slug,
            description,
            meta_title,
            meta_description,
            custom_css,
        } => {
            let css = custom_css
                .as_deref()
                .map(std::fs::read_to_string)
                .transpose()
                .context("reading custom CSS file")?;
            edit(&service, *page, |editor| {
                if let Some(title) = title {
                    editor.set_title(title.as_str());
                }
                if let Some(slug) = slug {
                    editor.set_slug(slug.as_str());
                }
                if let Some(description) = description {
                    editor.set_description(description.as_str());
                }
                if meta_title.is_some() || meta_description.is_some() {
                    let current = editor.page();
                    let next_title = meta_title.clone().or_else(|| current.meta_title.clone());
                    let next_description = meta_description
                        .clone()
                        .or_else(|| current.meta_description.clone());
                    editor.set_meta(next_title, next_description);
                }
                if let Some(css) = css {
                    editor.set_custom_css(Some(css));
                }
                Ok(())
            })?;
        }
        Commands::Publish { page } => {
            let page = service.set_published(*page, true)?;
            println!("published {}", page.public_path());
        }
        Commands::Unpublish { page } => {
            let page = service.set_published(*page, false)?;
            println!("unpublished {}", page.public_path());
        }
        Commands::Upload {
            page,
            item,
            key,
            file,
        } => {
            let bytes = std::fs::read(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let storage = LocalMediaStorage::new(&cli.media_dir, cli.media_url.as_str());
            let item = *item;
            let url = edit(&service, *page, |editor| {
                Ok(editor.attach_media(&storage, item, key, &file_name, &bytes)?)
            })?;
            println!("{url}");
        }
        Commands::Preview { page, out } => {
            let page = service.load(*page)?;
            let html = render_page(&page, &RenderContext::now()).to_html();
            write_output(out.as_deref(), &html)?;
        }
        Commands::Render { slug, out } => {
            let html = service.render_public_html(slug)?;
            write_output(out.as_deref(), &html)?;
        }
        Commands::Remove { page } => {
            service.delete(*page)?;
            println!("removed {page}");
        }
    }
    Ok(())
}

/// Loads the page, applies `action`, and saves when anything changed.
fn edit<T, F>(service: &Service<'_>, page: PageId, action: F) -> Result<T>
where
    F: FnOnce(&mut PageEditor) -> Result<T>,
{
    let mut editor = PageEditor::open(service, page)?;
    let value = action(&mut editor)?;
    if editor.is_dirty() {
        editor.save(service)?;
        info!("event=cli_edit module=cli status=ok page_id={}", page);
    } else {
        info!("event=cli_edit module=cli status=skip reason=unchanged page_id={}", page);
    }
    Ok(value)
}

fn require_item(service: &Service<'_>, page: PageId, item: ItemPath) -> Result<()> {
    let loaded = service.load(page)?;
    if !pagecraft_core::builder::contains_item(&loaded.sections, item) {
        bail!("{item} is not part of page {page}");
    }
    Ok(())
}

fn write_output(out: Option<&Path>, html: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn print_catalog() {
    println!("sections:");
    for kind in SectionType::ALL {
        println!("  {:<18} {}", kind.as_str(), kind.label());
    }
    println!("widgets:");
    for kind in WidgetType::ALL {
        println!("  {:<18} {}", kind.as_str(), kind.label());
    }
    println!("layouts:");
    for layout in ColumnLayout::ALL {
        println!("  {}", layout.as_str());
    }
    println!("fonts:");
    for font in FontFamily::ALL {
        println!("  {}", font.name());
    }
}
