//! Document mutation operations.
//!
//! # Responsibility
//! - Apply builder actions (add, update, delete, move, duplicate, relayout)
//!   to a page document.
//!
//! # Invariants
//! - Operations are document-in/document-out and never fail; an action that
//!   cannot apply (unknown id, unsupported item kind) returns the document
//!   unchanged.
//! - Items are addressed by id; ids are unique within one document.
//! - Duplicates receive fresh ids for the clone and every descendant.

use crate::builder::layout::change_layout;
use crate::model::layout::{Column, ColumnId, ColumnLayout, Row, RowId};
use crate::model::section::{Section, SectionId};
use crate::model::settings::{merge_settings, Settings};
use crate::model::widget::{Widget, WidgetId};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Id-based address of one item in the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemPath {
    Section(SectionId),
    Row(RowId),
    Column(ColumnId),
    Widget(WidgetId),
}

impl ItemPath {
    pub fn id(self) -> Uuid {
        match self {
            Self::Section(id) | Self::Row(id) | Self::Column(id) | Self::Widget(id) => id,
        }
    }

    fn kind_name(self) -> &'static str {
        match self {
            Self::Section(_) => "section",
            Self::Row(_) => "row",
            Self::Column(_) => "column",
            Self::Widget(_) => "widget",
        }
    }
}

impl Display for ItemPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind_name(), self.id())
    }
}

impl FromStr for ItemPath {
    type Err = String;

    /// Parses `section:<uuid>`, `row:<uuid>`, `column:<uuid>` or `widget:<uuid>`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (kind, id) = value
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected `<kind>:<uuid>`, got `{value}`"))?;
        let id = Uuid::parse_str(id.trim()).map_err(|err| format!("invalid item id: {err}"))?;
        match kind.trim() {
            "section" => Ok(Self::Section(id)),
            "row" => Ok(Self::Row(id)),
            "column" => Ok(Self::Column(id)),
            "widget" => Ok(Self::Widget(id)),
            other => Err(format!(
                "unknown item kind `{other}`; expected section|row|column|widget"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Appends a section to the end of the page.
pub fn add_section(mut doc: Vec<Section>, section: Section) -> Vec<Section> {
    doc.push(section);
    doc
}

/// Appends a row to the content area of `target_section`.
pub fn add_row(mut doc: Vec<Section>, row: Row, target_section: SectionId) -> Vec<Section> {
    match locate_section(&doc, target_section) {
        Some(s) => doc[s].rows.push(row),
        None => warn!(
            "event=builder_add_row module=builder status=skip reason=unknown_section section_id={target_section}"
        ),
    }
    doc
}

/// Appends a widget to the selected column.
///
/// Without a selected column (or with an unknown one) this is a no-op; a
/// widget is never created outside a column.
pub fn add_widget(
    mut doc: Vec<Section>,
    widget: Widget,
    target_column: Option<ColumnId>,
) -> Vec<Section> {
    let Some(column_id) = target_column else {
        warn!("event=builder_add_widget module=builder status=skip reason=no_target_column");
        return doc;
    };
    match locate_column(&doc, column_id) {
        Some((s, r, c)) => doc[s].rows[r].columns[c].widgets.push(widget),
        None => warn!(
            "event=builder_add_widget module=builder status=skip reason=unknown_column column_id={column_id}"
        ),
    }
    doc
}

/// Shallow-merges `partial` into the settings of the addressed item.
///
/// Sections and widgets take any key. Rows and columns carry typed settings:
/// keys outside `RowSettings`/`ColumnSettings` are dropped with a warning,
/// and a value of the wrong shape leaves the settings unchanged.
pub fn update_item(mut doc: Vec<Section>, path: ItemPath, partial: &Settings) -> Vec<Section> {
    match path {
        ItemPath::Section(id) => {
            if let Some(s) = locate_section(&doc, id) {
                merge_settings(&mut doc[s].settings, partial);
            }
        }
        ItemPath::Widget(id) => {
            if let Some((s, r, c, w)) = locate_widget(&doc, id) {
                merge_settings(&mut doc[s].rows[r].columns[c].widgets[w].settings, partial);
            }
        }
        ItemPath::Row(id) => {
            if let Some((s, r)) = locate_row(&doc, id) {
                let row = &mut doc[s].rows[r];
                match merge_typed(&row.settings, partial, path) {
                    Some(settings) => row.settings = settings,
                    None => warn!(
                        "event=builder_update module=builder status=skip reason=invalid_settings item={path}"
                    ),
                }
            }
        }
        ItemPath::Column(id) => {
            if let Some((s, r, c)) = locate_column(&doc, id) {
                let column = &mut doc[s].rows[r].columns[c];
                match merge_typed(&column.settings, partial, path) {
                    Some(settings) => column.settings = settings,
                    None => warn!(
                        "event=builder_update module=builder status=skip reason=invalid_settings item={path}"
                    ),
                }
            }
        }
    }
    doc
}

/// Stores a media URL under `key` in the addressed item's settings.
pub fn attach_media(doc: Vec<Section>, path: ItemPath, key: &str, url: &str) -> Vec<Section> {
    let mut partial = Settings::new();
    partial.insert(key.to_string(), Value::String(url.to_string()));
    update_item(doc, path, &partial)
}

/// Removes a section, row or widget. Columns cannot be deleted on their own.
pub fn delete_item(mut doc: Vec<Section>, path: ItemPath) -> Vec<Section> {
    match path {
        ItemPath::Section(id) => {
            if let Some(s) = locate_section(&doc, id) {
                doc.remove(s);
            }
        }
        ItemPath::Row(id) => {
            if let Some((s, r)) = locate_row(&doc, id) {
                doc[s].rows.remove(r);
            }
        }
        ItemPath::Widget(id) => {
            if let Some((s, r, c, w)) = locate_widget(&doc, id) {
                doc[s].rows[r].columns[c].widgets.remove(w);
            }
        }
        ItemPath::Column(_) => warn!(
            "event=builder_delete module=builder status=skip reason=column_delete_unsupported item={path}"
        ),
    }
    doc
}

/// Swaps the addressed item with its neighbour in the containing list.
pub fn move_item(mut doc: Vec<Section>, path: ItemPath, direction: MoveDirection) -> Vec<Section> {
    match path {
        ItemPath::Section(id) => {
            if let Some(s) = locate_section(&doc, id) {
                swap_neighbour(&mut doc, s, direction);
            }
        }
        ItemPath::Row(id) => {
            if let Some((s, r)) = locate_row(&doc, id) {
                swap_neighbour(&mut doc[s].rows, r, direction);
            }
        }
        ItemPath::Column(id) => {
            if let Some((s, r, c)) = locate_column(&doc, id) {
                swap_neighbour(&mut doc[s].rows[r].columns, c, direction);
            }
        }
        ItemPath::Widget(id) => {
            if let Some((s, r, c, w)) = locate_widget(&doc, id) {
                swap_neighbour(&mut doc[s].rows[r].columns[c].widgets, w, direction);
            }
        }
    }
    doc
}

/// Inserts a deep copy with fresh ids right after the addressed item.
pub fn duplicate_item(mut doc: Vec<Section>, path: ItemPath) -> Vec<Section> {
    match path {
        ItemPath::Section(id) => {
            if let Some(s) = locate_section(&doc, id) {
                let mut copy = doc[s].clone();
                reassign_section_ids(&mut copy);
                doc.insert(s + 1, copy);
            }
        }
        ItemPath::Row(id) => {
            if let Some((s, r)) = locate_row(&doc, id) {
                let mut copy = doc[s].rows[r].clone();
                reassign_row_ids(&mut copy);
                doc[s].rows.insert(r + 1, copy);
            }
        }
        ItemPath::Widget(id) => {
            if let Some((s, r, c, w)) = locate_widget(&doc, id) {
                let widgets = &mut doc[s].rows[r].columns[c].widgets;
                let mut copy = widgets[w].clone();
                copy.id = Uuid::new_v4();
                widgets.insert(w + 1, copy);
            }
        }
        ItemPath::Column(_) => warn!(
            "event=builder_duplicate module=builder status=skip reason=column_duplicate_unsupported item={path}"
        ),
    }
    doc
}

/// Changes the layout of the addressed row, reconciling its columns.
pub fn set_row_layout(mut doc: Vec<Section>, row_id: RowId, layout: ColumnLayout) -> Vec<Section> {
    if let Some((s, r)) = locate_row(&doc, row_id) {
        let rows = &mut doc[s].rows;
        let row = rows.remove(r);
        rows.insert(r, change_layout(row, layout));
    }
    doc
}

/// Returns whether the document contains the addressed item.
pub fn contains_item(doc: &[Section], path: ItemPath) -> bool {
    match path {
        ItemPath::Section(id) => locate_section(doc, id).is_some(),
        ItemPath::Row(id) => locate_row(doc, id).is_some(),
        ItemPath::Column(id) => locate_column(doc, id).is_some(),
        ItemPath::Widget(id) => locate_widget(doc, id).is_some(),
    }
}

/// Every id in the document, depth-first in render order.
pub fn item_ids(doc: &[Section]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for section in doc {
        ids.push(section.id);
        for row in &section.rows {
            ids.push(row.id);
            for column in &row.columns {
                ids.push(column.id);
                ids.extend(column.widgets.iter().map(|widget| widget.id));
            }
        }
    }
    ids
}

fn swap_neighbour<T>(items: &mut [T], index: usize, direction: MoveDirection) {
    match direction {
        MoveDirection::Up if index > 0 => items.swap(index, index - 1),
        MoveDirection::Down if index + 1 < items.len() => items.swap(index, index + 1),
        _ => {}
    }
}

fn merge_typed<T: Serialize + DeserializeOwned>(
    current: &T,
    partial: &Settings,
    path: ItemPath,
) -> Option<T> {
    let mut value = serde_json::to_value(current).ok()?;
    let fields = value.as_object_mut()?;
    let unknown: Vec<&str> = partial
        .keys()
        .filter(|key| !fields.contains_key(key.as_str()))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        warn!(
            "event=builder_update module=builder status=partial reason=unknown_keys item={path} keys={}",
            unknown.join(",")
        );
    }
    merge_settings(fields, partial);
    serde_json::from_value(value).ok()
}

fn reassign_section_ids(section: &mut Section) {
    section.id = Uuid::new_v4();
    section.rows.iter_mut().for_each(reassign_row_ids);
}

fn reassign_row_ids(row: &mut Row) {
    row.id = Uuid::new_v4();
    row.columns.iter_mut().for_each(reassign_column_ids);
}

fn reassign_column_ids(column: &mut Column) {
    column.id = Uuid::new_v4();
    for widget in &mut column.widgets {
        widget.id = Uuid::new_v4();
    }
}

fn locate_section(doc: &[Section], id: SectionId) -> Option<usize> {
    doc.iter().position(|section| section.id == id)
}

fn locate_row(doc: &[Section], id: RowId) -> Option<(usize, usize)> {
    doc.iter().enumerate().find_map(|(s, section)| {
        section
            .rows
            .iter()
            .position(|row| row.id == id)
            .map(|r| (s, r))
    })
}

fn locate_column(doc: &[Section], id: ColumnId) -> Option<(usize, usize, usize)> {
    for (s, section) in doc.iter().enumerate() {
        for (r, row) in section.rows.iter().enumerate() {
            if let Some(c) = row.columns.iter().position(|column| column.id == id) {
                return Some((s, r, c));
            }
        }
    }
    None
}

fn locate_widget(doc: &[Section], id: WidgetId) -> Option<(usize, usize, usize, usize)> {
    for (s, section) in doc.iter().enumerate() {
        for (r, row) in section.rows.iter().enumerate() {
            for (c, column) in row.columns.iter().enumerate() {
                if let Some(w) = column.widgets.iter().position(|widget| widget.id == id) {
                    return Some((s, r, c, w));
                }
            }
        }
    }
    None
}
