//! Theme cascade helpers shared by section and widget renderers.

use crate::model::theme::{ButtonStyle, ThemeSettings};
use crate::render::node::{el, Element};

/// Page-level CSS custom properties derived from the theme.
pub fn theme_css_variables(theme: &ThemeSettings) -> String {
    format!(
        ":root{{--lp-primary:{};--lp-secondary:{};--lp-accent:{};--lp-background:{};--lp-text:{};--lp-radius:{};--lp-font:{};}}",
        theme.primary_color,
        theme.secondary_color,
        theme.accent_color,
        theme.background_color,
        theme.text_color,
        theme.border_radius,
        theme.font_family.css_stack(),
    )
}

/// Picks the local override when set, else the theme value.
pub fn local_or<'a>(local: &'a str, theme_value: &'a str) -> &'a str {
    if local.trim().is_empty() {
        theme_value
    } else {
        local
    }
}

/// Call-to-action link styled per the theme's button style.
///
/// `background` and `color` are local overrides; blank values use the theme.
pub fn themed_button(
    theme: &ThemeSettings,
    label: &str,
    href: &str,
    background: &str,
    color: &str,
) -> Element {
    let accent = local_or(background, &theme.primary_color);
    let button = el("a")
        .class("lp-button")
        .class(button_class(theme.button_style))
        .attr("href", if href.trim().is_empty() { "#" } else { href })
        .style("border-radius", &theme.border_radius)
        .style("font-family", theme.font_family.css_stack())
        .style("padding", "12px 28px")
        .style("display", "inline-block")
        .style("text-decoration", "none")
        .style("font-weight", "600");

    let button = match theme.button_style {
        ButtonStyle::Filled => button
            .style("background", accent)
            .style("color", local_or(color, "#ffffff"))
            .style("border", format!("2px solid {accent}")),
        ButtonStyle::Outline => button
            .style("background", "transparent")
            .style("color", local_or(color, accent))
            .style("border", format!("2px solid {accent}")),
        ButtonStyle::Ghost => button
            .style("background", "transparent")
            .style("color", local_or(color, accent))
            .style("border", "none"),
    };
    button.text(label)
}

fn button_class(style: ButtonStyle) -> &'static str {
    match style {
        ButtonStyle::Filled => "lp-button-filled",
        ButtonStyle::Outline => "lp-button-outline",
        ButtonStyle::Ghost => "lp-button-ghost",
    }
}
