//! Global theme tokens.
//!
//! Theme values cascade to every section and widget unless an item sets a
//! local override. Each field defaults on its own so partially stored themes
//! still load.

use serde::{Deserialize, Serialize};

/// Named font families offered by the theme editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Hind Siliguri")]
    HindSiliguri,
    #[serde(rename = "Noto Sans Bengali")]
    NotoSansBengali,
    #[serde(rename = "Inter")]
    Inter,
    #[serde(rename = "Roboto")]
    Roboto,
    #[serde(rename = "Poppins")]
    Poppins,
    #[serde(rename = "Open Sans")]
    OpenSans,
    #[serde(rename = "Lato")]
    Lato,
    #[serde(rename = "Montserrat")]
    Montserrat,
}

impl FontFamily {
    pub const ALL: [FontFamily; 8] = [
        FontFamily::HindSiliguri,
        FontFamily::NotoSansBengali,
        FontFamily::Inter,
        FontFamily::Roboto,
        FontFamily::Poppins,
        FontFamily::OpenSans,
        FontFamily::Lato,
        FontFamily::Montserrat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::HindSiliguri => "Hind Siliguri",
            Self::NotoSansBengali => "Noto Sans Bengali",
            Self::Inter => "Inter",
            Self::Roboto => "Roboto",
            Self::Poppins => "Poppins",
            Self::OpenSans => "Open Sans",
            Self::Lato => "Lato",
            Self::Montserrat => "Montserrat",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|font| font.name().eq_ignore_ascii_case(wanted))
    }

    /// CSS `font-family` stack with a generic fallback.
    pub fn css_stack(self) -> String {
        format!("'{}', sans-serif", self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Filled,
    Outline,
    Ghost,
}

impl ButtonStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "filled" => Some(Self::Filled),
            "outline" => Some(Self::Outline),
            "ghost" => Some(Self::Ghost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    pub border_radius: String,
    pub font_family: FontFamily,
    pub button_style: ButtonStyle,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: "#6366f1".to_string(),
            secondary_color: "#ec4899".to_string(),
            accent_color: "#f59e0b".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#1f2937".to_string(),
            border_radius: "8px".to_string(),
            font_family: FontFamily::default(),
            button_style: ButtonStyle::default(),
        }
    }
}

/// Single-field theme change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeUpdate {
    PrimaryColor(String),
    SecondaryColor(String),
    AccentColor(String),
    BackgroundColor(String),
    TextColor(String),
    BorderRadius(String),
    FontFamily(FontFamily),
    ButtonStyle(ButtonStyle),
}

impl ThemeUpdate {
    /// Maps a stored key name (`primaryColor`, `fontFamily`, ...) and a raw
    /// value onto a typed update. Returns `None` for unknown keys or enum
    /// values outside the allowed set.
    pub fn parse(key: &str, value: &str) -> Option<Self> {
        let value = value.trim().to_string();
        let update = match key.trim() {
            "primaryColor" => Self::PrimaryColor(value),
            "secondaryColor" => Self::SecondaryColor(value),
            "accentColor" => Self::AccentColor(value),
            "backgroundColor" => Self::BackgroundColor(value),
            "textColor" => Self::TextColor(value),
            "borderRadius" => Self::BorderRadius(value),
            "fontFamily" => Self::FontFamily(FontFamily::parse(&value)?),
            "buttonStyle" => Self::ButtonStyle(ButtonStyle::parse(&value)?),
            _ => return None,
        };
        Some(update)
    }
}

/// Returns `theme` with exactly one field replaced.
pub fn update_theme(theme: ThemeSettings, update: ThemeUpdate) -> ThemeSettings {
    let mut theme = theme;
    match update {
        ThemeUpdate::PrimaryColor(value) => theme.primary_color = value,
        ThemeUpdate::SecondaryColor(value) => theme.secondary_color = value,
        ThemeUpdate::AccentColor(value) => theme.accent_color = value,
        ThemeUpdate::BackgroundColor(value) => theme.background_color = value,
        ThemeUpdate::TextColor(value) => theme.text_color = value,
        ThemeUpdate::BorderRadius(value) => theme.border_radius = value,
        ThemeUpdate::FontFamily(value) => theme.font_family = value,
        ThemeUpdate::ButtonStyle(value) => theme.button_style = value,
    }
    theme
}

#[cfg(test)]
mod tests {
    use super::{update_theme, ButtonStyle, FontFamily, ThemeSettings, ThemeUpdate};
    use serde_json::json;

    #[test]
    fn update_touches_only_one_field() {
        let before = ThemeSettings::default();
        let after = update_theme(
            before.clone(),
            ThemeUpdate::PrimaryColor("#000000".to_string()),
        );
        assert_eq!(after.primary_color, "#000000");
        assert_eq!(after.secondary_color, before.secondary_color);
        assert_eq!(after.font_family, before.font_family);
    }

    #[test]
    fn parse_rejects_unknown_keys_and_enum_values() {
        assert!(ThemeUpdate::parse("shadow", "large").is_none());
        assert!(ThemeUpdate::parse("buttonStyle", "neon").is_none());
        assert_eq!(
            ThemeUpdate::parse("fontFamily", "poppins"),
            Some(ThemeUpdate::FontFamily(FontFamily::Poppins))
        );
        assert_eq!(
            ThemeUpdate::parse("buttonStyle", "Outline"),
            Some(ThemeUpdate::ButtonStyle(ButtonStyle::Outline))
        );
    }

    #[test]
    fn partial_stored_theme_keeps_defaults() {
        let theme: ThemeSettings =
            serde_json::from_value(json!({"fontFamily": "Lato", "textColor": "#111"})).unwrap();
        assert_eq!(theme.font_family, FontFamily::Lato);
        assert_eq!(theme.text_color, "#111");
        assert_eq!(theme.primary_color, ThemeSettings::default().primary_color);
    }
}
