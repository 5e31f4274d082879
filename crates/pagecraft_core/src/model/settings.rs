//! Free-form settings maps and render-time default resolution.
//!
//! # Responsibility
//! - Define the JSON-shaped settings map carried by sections and widgets.
//! - Resolve stored values against a type template so renderers never see
//!   missing or wrongly-typed keys.
//!
//! # Invariants
//! - `merge_settings` is a shallow merge: nested objects are replaced whole.
//! - Resolution never fails; a stored value of the wrong JSON type is treated
//!   as absent and the template value is used instead.

use serde_json::{Map, Value};

/// Polymorphic settings object, shaped by the owning item's type template.
pub type Settings = Map<String, Value>;

/// Shallow-merges `partial` into `base`, overwriting only the given keys.
pub fn merge_settings(base: &mut Settings, partial: &Settings) {
    for (key, value) in partial {
        base.insert(key.clone(), value.clone());
    }
}

/// Builds a settings map from a `json!({...})` literal.
///
/// Template tables are written as object literals; anything else yields an
/// empty map.
pub(crate) fn settings_from(value: Value) -> Settings {
    match value {
        Value::Object(map) => map,
        _ => Settings::new(),
    }
}

/// Read-only view that resolves stored settings against template defaults.
#[derive(Debug, Clone)]
pub struct ResolvedSettings<'a> {
    stored: &'a Settings,
    defaults: Settings,
}

impl<'a> ResolvedSettings<'a> {
    pub fn new(stored: &'a Settings, defaults: Settings) -> Self {
        Self { stored, defaults }
    }

    /// Returns the stored value when its JSON type matches the template,
    /// otherwise the template value.
    pub fn value(&self, key: &str) -> Option<&Value> {
        let fallback = self.defaults.get(key);
        match (self.stored.get(key), fallback) {
            (Some(stored), Some(default)) if same_kind(stored, default) => Some(stored),
            (Some(_), Some(default)) => Some(default),
            (Some(stored), None) => Some(stored),
            (None, default) => default,
        }
    }

    pub fn text(&self, key: &str) -> String {
        match self.value(key) {
            Some(Value::String(value)) => value.clone(),
            Some(Value::Number(value)) => value.to_string(),
            _ => String::new(),
        }
    }

    pub fn number(&self, key: &str) -> f64 {
        match self.value(key) {
            Some(Value::Number(value)) => value.as_f64().unwrap_or(0.0),
            Some(Value::String(value)) => value.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.value(key), Some(Value::Bool(true)))
    }

    pub fn list(&self, key: &str) -> &[Value] {
        match self.value(key) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Returns the list of strings under `key`, skipping non-string entries.
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.list(key)
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    }

    /// Produces the fully resolved map: every template key plus any extra
    /// stored keys.
    pub fn to_settings(&self) -> Settings {
        let mut resolved = self.stored.clone();
        for key in self.defaults.keys() {
            if let Some(value) = self.value(key) {
                resolved.insert(key.clone(), value.clone());
            }
        }
        resolved
    }
}

/// Returns the string field `key` of a list entry object, or empty.
pub fn entry_text(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Number(value)) => value.to_string(),
        _ => String::new(),
    }
}

fn same_kind(stored: &Value, default: &Value) -> bool {
    matches!(
        (stored, default),
        (Value::Null, Value::Null)
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    ) || matches!((stored, default), (Value::String(_), Value::Number(_)))
        || matches!((stored, default), (Value::Number(_), Value::String(_)))
}
