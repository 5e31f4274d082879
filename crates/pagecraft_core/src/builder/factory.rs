//! Palette factories for new sections, rows and widgets.
//!
//! Every factory returns a fresh instance with newly generated ids and a
//! private copy of the relevant settings template.

use crate::model::layout::{Column, ColumnLayout, Row, RowSettings};
use crate::model::section::{Section, SectionType};
use crate::model::widget::{Widget, WidgetType};
use chrono::Utc;
use uuid::Uuid;

/// Creates a widget of `kind` with its template settings.
pub fn create_widget(kind: WidgetType) -> Widget {
    Widget::new(kind)
}

/// Creates an empty column with default settings.
pub fn create_default_column() -> Column {
    Column::new()
}

/// Creates a row with one default column per fraction of `layout`.
pub fn create_default_row(layout: ColumnLayout) -> Row {
    Row {
        id: Uuid::new_v4(),
        layout,
        columns: (0..layout.column_count())
            .map(|_| create_default_column())
            .collect(),
        settings: RowSettings::default(),
    }
}

/// Creates a section seeded with the current time as its `order`.
pub fn create_section(kind: SectionType) -> Section {
    create_section_at(kind, now_epoch_ms())
}

/// Creates a section with an explicit `order` seed.
pub fn create_section_at(kind: SectionType, order: i64) -> Section {
    Section {
        id: Uuid::new_v4(),
        kind,
        order,
        settings: kind.default_settings(),
        rows: Vec::new(),
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
