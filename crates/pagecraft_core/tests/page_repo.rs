use pagecraft_core::builder::{create_default_row, create_section_at, create_widget};
use pagecraft_core::db::open_db_in_memory;
use pagecraft_core::{
    ColumnLayout, LandingPage, LandingPageRepository, PageListQuery, PageValidationError,
    RepoError, SectionType, SqliteLandingPageRepository, ThemeSettings, WidgetType,
};
use uuid::Uuid;

fn page_with_content(title: &str, slug: &str) -> LandingPage {
    let mut page = LandingPage::with_slug(Uuid::new_v4(), title, slug);
    let mut hero = create_section_at(SectionType::HeroGradient, 10);
    let mut row = create_default_row(ColumnLayout::Halves);
    row.columns[0].widgets.push(create_widget(WidgetType::Heading));
    row.columns[1].widgets.push(create_widget(WidgetType::PriceBox));
    hero.rows.push(row);
    page.sections = vec![hero, create_section_at(SectionType::CheckoutForm, 11)];
    page.theme_settings.primary_color = "#0f766e".to_string();
    page.meta_title = Some("Meta".to_string());
    page.created_at = 1_000;
    page.updated_at = 1_000;
    page
}

#[test]
fn create_and_get_roundtrip_preserves_whole_aggregate() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);

    let page = page_with_content("Eid Sale", "eid-sale");
    let id = repo.create_page(&page).unwrap();

    let loaded = repo.get_page(id).unwrap().unwrap();
    assert_eq!(loaded, page);
}

#[test]
fn get_unknown_page_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    assert!(repo.get_page(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn save_overwrites_every_column() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    let mut page = page_with_content("Eid Sale", "eid-sale");
    repo.create_page(&page).unwrap();

    page.title = "Eid Mega Sale".to_string();
    page.slug = "eid-mega-sale".to_string();
    page.sections.truncate(1);
    page.theme_settings = ThemeSettings::default();
    page.meta_title = None;
    page.custom_css = Some(".lp-hero{padding:0}".to_string());
    page.set_published(true);
    page.updated_at = 2_000;
    repo.save_page(&page).unwrap();

    let loaded = repo.get_page(page.id).unwrap().unwrap();
    assert_eq!(loaded, page);
}

#[test]
fn save_of_missing_page_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    let page = page_with_content("Ghost", "ghost");

    let err = repo.save_page(&page).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == page.id));
}

#[test]
fn duplicate_slug_is_reported_on_create_and_save() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    repo.create_page(&page_with_content("One", "promo-x")).unwrap();

    let err = repo
        .create_page(&page_with_content("Two", "promo-x"))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateSlug(ref slug) if slug == "promo-x"));

    let mut other = page_with_content("Three", "promo-y");
    repo.create_page(&other).unwrap();
    other.slug = "promo-x".to_string();
    let err = repo.save_page(&other).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateSlug(_)));
}

#[test]
fn blank_title_is_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    let page = page_with_content("  ", "blank");

    let err = repo.create_page(&page).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(PageValidationError::EmptyTitle)
    ));
    assert!(repo.get_page(page.id).unwrap().is_none());
}

#[test]
fn published_lookup_ignores_drafts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    let mut page = page_with_content("Draft", "draft-page");
    repo.create_page(&page).unwrap();
    assert!(repo.find_published_by_slug("draft-page").unwrap().is_none());

    page.set_published(true);
    repo.save_page(&page).unwrap();
    let found = repo.find_published_by_slug("draft-page").unwrap().unwrap();
    assert_eq!(found.id, page.id);
    assert!(repo.find_published_by_slug("missing").unwrap().is_none());
}

#[test]
fn list_orders_by_updated_at_desc_then_id_and_filters() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);

    let mut oldest = page_with_content("Oldest", "oldest");
    oldest.updated_at = 100;
    let mut newest = page_with_content("Newest", "newest");
    newest.updated_at = 300;
    newest.set_published(true);
    let mut middle = page_with_content("Middle", "middle");
    middle.updated_at = 200;
    for page in [&oldest, &newest, &middle] {
        repo.create_page(page).unwrap();
    }

    let all = repo.list_pages(&PageListQuery::default()).unwrap();
    let slugs: Vec<_> = all.iter().map(|page| page.slug.as_str()).collect();
    assert_eq!(slugs, ["newest", "middle", "oldest"]);
    assert_eq!(all[0].section_count, 2);

    let drafts = repo
        .list_pages(&PageListQuery {
            published: Some(false),
            ..PageListQuery::default()
        })
        .unwrap();
    assert_eq!(drafts.len(), 2);
    assert!(drafts.iter().all(|page| !page.is_published));

    let paged = repo
        .list_pages(&PageListQuery {
            published: None,
            limit: Some(1),
            offset: 1,
        })
        .unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].slug, "middle");
}

#[test]
fn delete_removes_row_and_public_route() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    let mut page = page_with_content("Gone", "gone");
    page.set_published(true);
    repo.create_page(&page).unwrap();

    repo.delete_page(page.id).unwrap();
    assert!(repo.find_published_by_slug("gone").unwrap().is_none());
    assert!(matches!(
        repo.delete_page(page.id),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn corrupt_json_columns_load_with_fallbacks() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO landing_pages (id, title, slug, is_active, is_published, sections, theme_settings)
         VALUES (?1, 'Legacy', 'legacy', 1, 1, ?2, ?3);",
        rusqlite::params![
            id.to_string(),
            r#"[{"type":"faq"},{"type":"mystery-box"},{"type":"countdown","settings":"broken"}]"#,
            r##"{"primaryColor":"#ff0000","buttonStyle":"neon"}"##,
        ],
    )
    .unwrap();

    let repo = SqliteLandingPageRepository::new(&conn);
    let page = repo.find_published_by_slug("legacy").unwrap().unwrap();
    assert_eq!(page.id, id);
    assert_eq!(page.sections.len(), 2);
    assert_eq!(page.sections[0].kind, SectionType::Faq);
    assert_eq!(page.sections[1].kind, SectionType::Countdown);
    assert!(page.sections[1].settings.is_empty());
    assert_eq!(page.theme_settings.primary_color, "#ff0000");
    assert_eq!(
        page.theme_settings.button_style,
        ThemeSettings::default().button_style
    );

    conn.execute(
        "UPDATE landing_pages SET sections = 'not json' WHERE id = ?1;",
        [id.to_string()],
    )
    .unwrap();
    let page = repo.get_page(id).unwrap().unwrap();
    assert!(page.sections.is_empty());
}

#[test]
fn invalid_flag_values_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "INSERT INTO landing_pages (id, title, slug, is_published) VALUES (?1, 'Bad', 'bad', 7);",
        [id.to_string()],
    )
    .unwrap();

    let repo = SqliteLandingPageRepository::new(&conn);
    assert!(matches!(
        repo.get_page(id),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn publish_state_update_leaves_json_columns_alone() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandingPageRepository::new(&conn);
    let page = page_with_content("Flags", "flags");
    repo.create_page(&page).unwrap();
    let raw_before: String = conn
        .query_row(
            "SELECT sections FROM landing_pages WHERE id = ?1;",
            [page.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();

    repo.set_publish_state(page.id, true, 2_000).unwrap();

    let stored = repo.get_page(page.id).unwrap().unwrap();
    assert!(stored.is_published && stored.is_active);
    assert_eq!(stored.updated_at, 2_000);
    let raw_after: String = conn
        .query_row(
            "SELECT sections FROM landing_pages WHERE id = ?1;",
            [page.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw_after, raw_before);

    assert!(matches!(
        repo.set_publish_state(Uuid::new_v4(), true, 3_000),
        Err(RepoError::NotFound(_))
    ));
}
