//! Row/column layout model.
//!
//! # Responsibility
//! - Define fractional row layouts and their column widths.
//! - Define row and column containers with typed settings.
//!
//! # Invariants
//! - `row.columns.len() == row.layout.column_count()` for every row built
//!   through the builder.
//! - Widget order inside a column is render order.

use crate::model::widget::Widget;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RowId = Uuid;
pub type ColumnId = Uuid;

/// Fixed set of fractional column splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnLayout {
    #[serde(rename = "100")]
    Full,
    #[serde(rename = "50-50")]
    Halves,
    #[serde(rename = "33-33-33")]
    Thirds,
    #[serde(rename = "25-25-25-25")]
    Quarters,
    #[serde(rename = "66-33")]
    WideLeft,
    #[serde(rename = "33-66")]
    WideRight,
}

impl ColumnLayout {
    pub const ALL: [ColumnLayout; 6] = [
        ColumnLayout::Full,
        ColumnLayout::Halves,
        ColumnLayout::Thirds,
        ColumnLayout::Quarters,
        ColumnLayout::WideLeft,
        ColumnLayout::WideRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "100",
            Self::Halves => "50-50",
            Self::Thirds => "33-33-33",
            Self::Quarters => "25-25-25-25",
            Self::WideLeft => "66-33",
            Self::WideRight => "33-66",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.as_str() == value.trim())
    }

    /// Column widths in percent, left to right.
    pub fn widths(self) -> &'static [f32] {
        match self {
            Self::Full => &[100.0],
            Self::Halves => &[50.0, 50.0],
            Self::Thirds => &[33.333, 33.333, 33.333],
            Self::Quarters => &[25.0, 25.0, 25.0, 25.0],
            Self::WideLeft => &[66.666, 33.333],
            Self::WideRight => &[33.333, 66.666],
        }
    }

    pub fn column_count(self) -> usize {
        self.widths().len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Top => "flex-start",
            Self::Center => "center",
            Self::Bottom => "flex-end",
        }
    }
}

/// Column-level visual settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnSettings {
    pub vertical_align: VerticalAlign,
    pub padding: String,
    pub background_color: String,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            vertical_align: VerticalAlign::Top,
            padding: "10px".to_string(),
            background_color: "transparent".to_string(),
        }
    }
}

/// Vertical slot holding an ordered list of widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default)]
    pub settings: ColumnSettings,
}

impl Column {
    /// Creates an empty column with default settings.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            widgets: Vec::new(),
            settings: ColumnSettings::default(),
        }
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowWidth {
    #[default]
    Boxed,
    Full,
}

/// Row-level visual settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowSettings {
    pub max_width: RowWidth,
    pub gap: String,
    pub padding: String,
    pub min_height: String,
    pub background_color: String,
    pub background_image: String,
}

impl Default for RowSettings {
    fn default() -> Self {
        Self {
            max_width: RowWidth::Boxed,
            gap: "20px".to_string(),
            padding: "20px 0".to_string(),
            min_height: "auto".to_string(),
            background_color: "transparent".to_string(),
            background_image: String::new(),
        }
    }
}

/// Horizontal layout unit split into columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub layout: ColumnLayout,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub settings: RowSettings,
}

impl Row {
    /// Total widget count across all columns.
    pub fn widget_count(&self) -> usize {
        self.columns.iter().map(|column| column.widgets.len()).sum()
    }

    /// Whether the column count agrees with the declared layout.
    pub fn is_consistent(&self) -> bool {
        self.columns.len() == self.layout.column_count()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnLayout, ColumnSettings, RowSettings};
    use serde_json::json;

    #[test]
    fn layout_wire_names_match_serde() {
        for layout in ColumnLayout::ALL {
            assert_eq!(serde_json::to_value(layout).unwrap(), layout.as_str());
            assert_eq!(ColumnLayout::parse(layout.as_str()), Some(layout));
        }
    }

    #[test]
    fn column_counts_follow_fractions() {
        assert_eq!(ColumnLayout::Full.column_count(), 1);
        assert_eq!(ColumnLayout::Thirds.column_count(), 3);
        assert_eq!(ColumnLayout::Quarters.column_count(), 4);
        assert_eq!(ColumnLayout::WideRight.column_count(), 2);
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: ColumnSettings =
            serde_json::from_value(json!({"verticalAlign": "center"})).unwrap();
        assert_eq!(settings.padding, "10px");

        let row: RowSettings = serde_json::from_value(json!({"maxWidth": "full"})).unwrap();
        assert_eq!(row.gap, "20px");
    }
}
