//! Editing session over one landing page.
//!
//! # Responsibility
//! - Own the single live mutable copy of a page while it is being edited.
//! - Track the target column for new widgets and the unsaved-changes flag.
//! - Route builder actions, theme edits and media uploads into the document.
//!
//! # Invariants
//! - The document only changes through builder operations; a no-op action
//!   leaves the dirty flag untouched.
//! - A failed save keeps the document and leaves the session dirty.
//! - The selected column, when set, exists in the document.

use crate::builder::{
    self, create_default_row, create_section, create_widget, ItemPath, MoveDirection,
};
use crate::media::{MediaError, MediaStorage};
use crate::model::layout::{ColumnId, ColumnLayout, RowId};
use crate::model::page::{LandingPage, PageId};
use crate::model::section::{Section, SectionId, SectionType};
use crate::model::settings::Settings;
use crate::model::theme::{update_theme, ThemeUpdate};
use crate::model::widget::{WidgetId, WidgetType};
use crate::render::countdown::RenderContext;
use crate::render::node::RenderNode;
use crate::render::page::render_page;
use crate::repo::page_repo::LandingPageRepository;
use crate::service::page_service::{LandingPageService, PageServiceError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum EditorError {
    Service(PageServiceError),
    Media(MediaError),
    /// The addressed item is not in the document.
    UnknownItem(ItemPath),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Media(err) => write!(f, "{err}"),
            Self::UnknownItem(path) => write!(f, "item not found in page: {path}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Media(err) => Some(err),
            Self::UnknownItem(_) => None,
        }
    }
}

impl From<PageServiceError> for EditorError {
    fn from(value: PageServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<MediaError> for EditorError {
    fn from(value: MediaError) -> Self {
        Self::Media(value)
    }
}

/// One operator's editing session.
#[derive(Debug, Clone)]
pub struct PageEditor {
    page: LandingPage,
    selected_column: Option<ColumnId>,
    dirty: bool,
}

impl PageEditor {
    /// Loads a page into a fresh, clean session.
    pub fn open<R: LandingPageRepository>(
        service: &LandingPageService<R>,
        id: PageId,
    ) -> Result<Self, EditorError> {
        let page = service.load(id)?;
        info!(
            "event=editor_open module=editor status=ok page_id={} sections={}",
            id,
            page.sections.len()
        );
        Ok(Self::from_page(page))
    }

    pub fn from_page(page: LandingPage) -> Self {
        Self {
            page,
            selected_column: None,
            dirty: false,
        }
    }

    pub fn page(&self) -> &LandingPage {
        &self.page
    }

    pub fn sections(&self) -> &[Section] {
        &self.page.sections
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn selected_column(&self) -> Option<ColumnId> {
        self.selected_column
    }

    /// Sets the target column for new widgets.
    pub fn select_column(&mut self, column: ColumnId) -> Result<(), EditorError> {
        let path = ItemPath::Column(column);
        if !builder::contains_item(&self.page.sections, path) {
            return Err(EditorError::UnknownItem(path));
        }
        self.selected_column = Some(column);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_column = None;
    }

    /// Appends a template section; returns its id.
    pub fn add_section(&mut self, kind: SectionType) -> SectionId {
        let section = create_section(kind);
        let id = section.id;
        self.apply(|doc| builder::add_section(doc, section));
        id
    }

    /// Appends a row to a section and selects the row's first column.
    pub fn add_row(
        &mut self,
        section: SectionId,
        layout: ColumnLayout,
    ) -> Result<RowId, EditorError> {
        let path = ItemPath::Section(section);
        if !builder::contains_item(&self.page.sections, path) {
            return Err(EditorError::UnknownItem(path));
        }
        let row = create_default_row(layout);
        let id = row.id;
        let first_column = row.columns.first().map(|column| column.id);
        self.apply(|doc| builder::add_row(doc, row, section));
        self.selected_column = first_column;
        Ok(id)
    }

    /// Appends a widget to the selected column.
    ///
    /// Returns `None` without touching the document when no column is
    /// selected.
    pub fn add_widget(&mut self, kind: WidgetType) -> Option<WidgetId> {
        let target = self.selected_column?;
        let widget = create_widget(kind);
        let id = widget.id;
        self.apply(|doc| builder::add_widget(doc, widget, Some(target)));
        builder::contains_item(&self.page.sections, ItemPath::Widget(id)).then_some(id)
    }

    pub fn update_item(&mut self, path: ItemPath, partial: &Settings) {
        self.apply(|doc| builder::update_item(doc, path, partial));
    }

    pub fn delete_item(&mut self, path: ItemPath) {
        self.apply(|doc| builder::delete_item(doc, path));
        self.drop_stale_selection();
    }

    pub fn move_item(&mut self, path: ItemPath, direction: MoveDirection) {
        self.apply(|doc| builder::move_item(doc, path, direction));
    }

    pub fn duplicate_item(&mut self, path: ItemPath) {
        self.apply(|doc| builder::duplicate_item(doc, path));
    }

    pub fn set_row_layout(&mut self, row: RowId, layout: ColumnLayout) {
        self.apply(|doc| builder::set_row_layout(doc, row, layout));
        self.drop_stale_selection();
    }

    pub fn update_theme(&mut self, update: ThemeUpdate) {
        let theme = update_theme(self.page.theme_settings.clone(), update);
        if theme != self.page.theme_settings {
            self.page.theme_settings = theme;
            self.dirty = true;
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.page.title = title.into();
        self.dirty = true;
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.page.slug = slug.into();
        self.dirty = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.page.description = description.into();
        self.dirty = true;
    }

    /// SEO overrides; blank values clear the override.
    pub fn set_meta(&mut self, meta_title: Option<String>, meta_description: Option<String>) {
        self.page.meta_title = meta_title.filter(|value| !value.trim().is_empty());
        self.page.meta_description = meta_description.filter(|value| !value.trim().is_empty());
        self.dirty = true;
    }

    pub fn set_custom_css(&mut self, css: Option<String>) {
        self.page.custom_css = css.filter(|value| !value.trim().is_empty());
        self.dirty = true;
    }

    /// Publish toggle; persisted on the next save.
    pub fn set_published(&mut self, published: bool) {
        if self.page.is_published != published || self.page.is_active != published {
            self.page.set_published(published);
            self.dirty = true;
        }
    }

    /// Uploads a file and stores its URL under `key` of the addressed item.
    pub fn attach_media<S: MediaStorage>(
        &mut self,
        storage: &S,
        path: ItemPath,
        key: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, EditorError> {
        if !builder::contains_item(&self.page.sections, path) {
            return Err(EditorError::UnknownItem(path));
        }
        let url = storage.upload(file_name, bytes)?;
        self.apply(|doc| builder::attach_media(doc, path, key, &url));
        Ok(url)
    }

    /// Live preview using the same renderer as the public page.
    pub fn preview(&self, ctx: &RenderContext) -> RenderNode {
        render_page(&self.page, ctx)
    }

    /// Writes the whole page; on failure the session keeps its changes.
    pub fn save<R: LandingPageRepository>(
        &mut self,
        service: &LandingPageService<R>,
    ) -> Result<(), EditorError> {
        match service.save(&mut self.page) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=editor_save module=editor status=error page_id={} dirty=true error={}",
                    self.page.id, err
                );
                Err(err.into())
            }
        }
    }

    fn apply<F>(&mut self, op: F)
    where
        F: FnOnce(Vec<Section>) -> Vec<Section>,
    {
        let before = self.page.sections.clone();
        let after = op(std::mem::take(&mut self.page.sections));
        if after != before {
            self.dirty = true;
        }
        self.page.sections = after;
    }

    fn drop_stale_selection(&mut self) {
        if let Some(column) = self.selected_column {
            if !builder::contains_item(&self.page.sections, ItemPath::Column(column)) {
                self.selected_column = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageEditor;
    use crate::builder::{ItemPath, MoveDirection};
    use crate::model::layout::ColumnLayout;
    use crate::model::page::LandingPage;
    use crate::model::section::SectionType;
    use crate::model::theme::ThemeUpdate;
    use crate::model::widget::WidgetType;

    fn editor() -> PageEditor {
        PageEditor::from_page(LandingPage::new("Winter Collection"))
    }

    #[test]
    fn add_widget_without_selection_is_a_clean_no_op() {
        let mut editor = editor();
        editor.add_section(SectionType::Guarantee);
        let dirty_before = editor.is_dirty();
        assert!(editor.add_widget(WidgetType::Text).is_none());
        assert_eq!(editor.is_dirty(), dirty_before);
    }

    #[test]
    fn new_row_selects_its_first_column() {
        let mut editor = editor();
        let section = editor.add_section(SectionType::FeaturesList);
        editor.add_row(section, ColumnLayout::Halves).unwrap();
        let widget = editor.add_widget(WidgetType::Button).unwrap();

        let row = &editor.sections()[0].rows[0];
        assert_eq!(row.columns[0].widgets[0].id, widget);
        assert!(editor.is_dirty());
    }

    #[test]
    fn shrinking_away_the_selected_column_clears_selection() {
        let mut editor = editor();
        let section = editor.add_section(SectionType::FeaturesList);
        let row = editor.add_row(section, ColumnLayout::Thirds).unwrap();
        let last_column = editor.sections()[0].rows[0].columns[2].id;
        editor.select_column(last_column).unwrap();
        editor.add_widget(WidgetType::Heading).unwrap();

        editor.set_row_layout(row, ColumnLayout::Full);
        assert_eq!(editor.selected_column(), None);
        assert_eq!(editor.sections()[0].rows[0].widget_count(), 1);
    }

    #[test]
    fn move_at_boundary_does_not_mark_dirty() {
        let mut editor = PageEditor::from_page({
            let mut page = LandingPage::new("Promo");
            page.sections
                .push(crate::builder::create_section_at(SectionType::Faq, 1));
            page
        });
        let first = editor.sections()[0].id;
        editor.move_item(ItemPath::Section(first), MoveDirection::Up);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn theme_update_marks_dirty_only_on_change() {
        let mut editor = editor();
        editor.update_theme(ThemeUpdate::PrimaryColor("#6366f1".to_string()));
        assert!(!editor.is_dirty());
        editor.update_theme(ThemeUpdate::PrimaryColor("#000000".to_string()));
        assert!(editor.is_dirty());
    }
}
