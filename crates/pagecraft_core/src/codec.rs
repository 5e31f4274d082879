//! JSON persistence codec for page documents.
//!
//! # Responsibility
//! - Serialize the section tree and theme into the opaque JSON columns.
//! - Decode stored JSON leniently so one corrupt item never hides a page.
//!
//! # Invariants
//! - `decode_sections(encode_sections(doc))` returns `doc` unchanged for any
//!   well-formed document.
//! - A `sections` value that is not a JSON array decodes to an empty list.
//! - Sections, rows and widgets with an unknown `type` or a broken shape are
//!   skipped and counted; siblings still decode.
//! - Decoded rows always satisfy `columns.len() == layout.column_count()`.
//! - Theme fields that are missing or invalid keep their defaults.

use crate::builder::change_layout;
use crate::model::layout::{Column, ColumnLayout, ColumnSettings, Row, RowSettings};
use crate::model::section::{Section, SectionType};
use crate::model::settings::Settings;
use crate::model::theme::{update_theme, ThemeSettings, ThemeUpdate};
use crate::model::widget::{Widget, WidgetType};
use log::warn;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Decoded value plus the number of items dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub skipped: usize,
}

pub fn encode_sections(sections: &[Section]) -> Result<String, serde_json::Error> {
    serde_json::to_string(sections)
}

pub fn encode_theme(theme: &ThemeSettings) -> Result<String, serde_json::Error> {
    serde_json::to_string(theme)
}

/// Decodes the stored `sections` column.
pub fn decode_sections(raw: &str) -> Decoded<Vec<Section>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode_sections_value(&value),
        Err(err) => {
            warn!(
                "event=sections_decode module=codec status=error reason=invalid_json error={}",
                err
            );
            Decoded {
                value: Vec::new(),
                skipped: 0,
            }
        }
    }
}

/// Decodes an already parsed `sections` value.
pub fn decode_sections_value(value: &Value) -> Decoded<Vec<Section>> {
    let Some(items) = value.as_array() else {
        warn!("event=sections_decode module=codec status=error reason=not_an_array");
        return Decoded {
            value: Vec::new(),
            skipped: 0,
        };
    };

    let mut skipped = 0;
    let mut sections = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match decode_section(item, &mut skipped) {
            Some(section) => sections.push(section),
            None => {
                skipped += 1;
                warn!(
                    "event=sections_decode module=codec status=skip item=section index={}",
                    index
                );
            }
        }
    }
    Decoded {
        value: sections,
        skipped,
    }
}

/// Decodes the stored `theme_settings` column; never fails.
pub fn decode_theme(raw: &str) -> ThemeSettings {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode_theme_value(&value),
        Err(err) => {
            warn!(
                "event=theme_decode module=codec status=error reason=invalid_json error={}",
                err
            );
            ThemeSettings::default()
        }
    }
}

/// Applies every recognised theme field in `value` over the defaults.
pub fn decode_theme_value(value: &Value) -> ThemeSettings {
    let Some(fields) = value.as_object() else {
        warn!("event=theme_decode module=codec status=error reason=not_an_object");
        return ThemeSettings::default();
    };

    let mut theme = ThemeSettings::default();
    for (key, field) in fields {
        let update = field
            .as_str()
            .and_then(|text| ThemeUpdate::parse(key, text));
        match update {
            Some(update) => theme = update_theme(theme, update),
            None => warn!(
                "event=theme_decode module=codec status=skip field={}",
                key
            ),
        }
    }
    theme
}

fn decode_section(value: &Value, skipped: &mut usize) -> Option<Section> {
    let fields = value.as_object()?;
    let kind = SectionType::parse(fields.get("type")?.as_str()?)?;
    let rows = match fields.get("rows") {
        Some(Value::Array(rows)) => rows
            .iter()
            .filter_map(|row| {
                let decoded = decode_row(row, skipped);
                if decoded.is_none() {
                    *skipped += 1;
                    warn!("event=sections_decode module=codec status=skip item=row");
                }
                decoded
            })
            .collect(),
        _ => Vec::new(),
    };

    Some(Section {
        id: decode_id(fields),
        kind,
        order: fields.get("order").and_then(Value::as_i64).unwrap_or(0),
        settings: decode_settings(fields),
        rows,
    })
}

fn decode_row(value: &Value, skipped: &mut usize) -> Option<Row> {
    let fields = value.as_object()?;
    let layout = ColumnLayout::parse(fields.get("layout")?.as_str()?)?;
    let columns: Vec<Column> = fields
        .get("columns")?
        .as_array()?
        .iter()
        .map(|column| decode_column(column, skipped))
        .collect();
    let settings: RowSettings = fields
        .get("settings")
        .and_then(|settings| serde_json::from_value(settings.clone()).ok())
        .unwrap_or_default();

    let row = Row {
        id: decode_id(fields),
        layout,
        columns,
        settings,
    };
    if row.is_consistent() {
        return Some(row);
    }

    warn!(
        "event=sections_decode module=codec status=repair item=row layout={} columns={}",
        layout.as_str(),
        row.columns.len()
    );
    Some(change_layout(row, layout))
}

fn decode_column(value: &Value, skipped: &mut usize) -> Column {
    let Some(fields) = value.as_object() else {
        return Column::new();
    };
    let widgets = match fields.get("widgets") {
        Some(Value::Array(widgets)) => widgets
            .iter()
            .filter_map(|widget| {
                let decoded = decode_widget(widget);
                if decoded.is_none() {
                    *skipped += 1;
                    warn!("event=sections_decode module=codec status=skip item=widget");
                }
                decoded
            })
            .collect(),
        _ => Vec::new(),
    };
    let settings: ColumnSettings = fields
        .get("settings")
        .and_then(|settings| serde_json::from_value(settings.clone()).ok())
        .unwrap_or_default();

    Column {
        id: decode_id(fields),
        widgets,
        settings,
    }
}

fn decode_widget(value: &Value) -> Option<Widget> {
    let fields = value.as_object()?;
    let kind = WidgetType::parse(fields.get("type")?.as_str()?)?;
    Some(Widget {
        id: decode_id(fields),
        kind,
        settings: decode_settings(fields),
    })
}

// Items saved without a usable id get a fresh one so they stay addressable.
fn decode_id(fields: &Map<String, Value>) -> Uuid {
    fields
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn decode_settings(fields: &Map<String, Value>) -> Settings {
    match fields.get("settings") {
        Some(Value::Object(settings)) => settings.clone(),
        _ => Settings::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_sections, decode_theme, encode_sections, encode_theme};
    use crate::builder::{create_default_row, create_section_at, create_widget};
    use crate::model::layout::ColumnLayout;
    use crate::model::section::SectionType;
    use crate::model::theme::{ButtonStyle, FontFamily, ThemeSettings};
    use crate::model::widget::WidgetType;
    use serde_json::json;

    #[test]
    fn encoded_document_decodes_unchanged() {
        let mut section = create_section_at(SectionType::HeroGradient, 42);
        let mut row = create_default_row(ColumnLayout::WideLeft);
        row.columns[1].widgets.push(create_widget(WidgetType::PriceBox));
        section.rows.push(row);
        let doc = vec![section, create_section_at(SectionType::Faq, 43)];

        let decoded = decode_sections(&encode_sections(&doc).unwrap());
        assert_eq!(decoded.value, doc);
        assert_eq!(decoded.skipped, 0);
    }

    #[test]
    fn non_array_sections_decode_to_empty() {
        assert!(decode_sections("{\"type\":\"faq\"}").value.is_empty());
        assert!(decode_sections("not json").value.is_empty());
    }

    #[test]
    fn unknown_section_type_is_skipped() {
        let raw = json!([
            {"id": "8d0f4c8e-64a5-4f79-9a53-0c3b6c3d1f10", "type": "carousel", "settings": {}},
            {"id": "1b1c1d1e-0000-4000-8000-000000000001", "type": "faq", "settings": {}},
            42
        ])
        .to_string();
        let decoded = decode_sections(&raw);
        assert_eq!(decoded.value.len(), 1);
        assert_eq!(decoded.value[0].kind, SectionType::Faq);
        assert_eq!(decoded.skipped, 2);
    }

    #[test]
    fn unknown_widget_is_dropped_but_row_survives() {
        let raw = json!([{
            "id": "1b1c1d1e-0000-4000-8000-000000000001",
            "type": "guarantee",
            "rows": [{
                "id": "1b1c1d1e-0000-4000-8000-000000000002",
                "layout": "50-50",
                "columns": [
                    {"widgets": [{"type": "heading"}, {"type": "slider"}]}
                ]
            }]
        }])
        .to_string();
        let decoded = decode_sections(&raw);
        let row = &decoded.value[0].rows[0];
        assert_eq!(decoded.skipped, 1);
        assert_eq!(row.columns.len(), 2);
        assert_eq!(row.widget_count(), 1);
    }

    #[test]
    fn theme_keeps_defaults_for_bad_fields() {
        let theme = decode_theme(
            &json!({
                "primaryColor": "#111111",
                "fontFamily": "Comic Sans",
                "buttonStyle": "ghost",
                "borderRadius": 4
            })
            .to_string(),
        );
        let defaults = ThemeSettings::default();
        assert_eq!(theme.primary_color, "#111111");
        assert_eq!(theme.font_family, FontFamily::HindSiliguri);
        assert_eq!(theme.button_style, ButtonStyle::Ghost);
        assert_eq!(theme.border_radius, defaults.border_radius);

        let encoded = encode_theme(&theme).unwrap();
        assert_eq!(decode_theme(&encoded), theme);
        assert_eq!(decode_theme("[]"), defaults);
    }
}
