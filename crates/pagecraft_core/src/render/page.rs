//! Whole-page rendering for the authoring preview and the public route.

use crate::codec::decode_sections_value;
use crate::model::page::LandingPage;
use crate::model::section::Section;
use crate::model::theme::ThemeSettings;
use crate::render::countdown::RenderContext;
use crate::render::node::{el, escape_html, RenderNode};
use crate::render::section::render_section_at;
use crate::render::theme::theme_css_variables;
use serde_json::Value;
use std::fmt::Write;

const BASE_CSS: &str = "*{box-sizing:border-box}body{margin:0;font-family:var(--lp-font);color:var(--lp-text);background:var(--lp-background)}img{max-width:100%}";

/// Renders a list of sections in list order inside the themed page wrapper.
pub fn render_sections(
    sections: &[Section],
    theme: &ThemeSettings,
    ctx: &RenderContext,
) -> RenderNode {
    el("div")
        .class("lp-page")
        .style("background", &theme.background_color)
        .style("color", &theme.text_color)
        .style("font-family", theme.font_family.css_stack())
        .children(
            sections
                .iter()
                .map(|section| render_section_at(section, theme, ctx)),
        )
        .into()
}

/// Renders a raw stored `sections` value, skipping items that cannot be
/// decoded.
pub fn render_sections_value(
    value: &Value,
    theme: &ThemeSettings,
    ctx: &RenderContext,
) -> RenderNode {
    let decoded = decode_sections_value(value);
    render_sections(&decoded.value, theme, ctx)
}

pub fn render_page(page: &LandingPage, ctx: &RenderContext) -> RenderNode {
    render_sections(&page.sections, &page.theme_settings, ctx)
}

/// Complete HTML document for the public route.
pub fn render_page_html(page: &LandingPage, ctx: &RenderContext) -> String {
    let theme = &page.theme_settings;
    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html lang=\"bn\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    let _ = write!(out, "<title>{}</title>", escape_html(page.display_title()));

    let description = page
        .meta_description
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(page.description.trim());
    if !description.is_empty() {
        let _ = write!(
            out,
            "<meta name=\"description\" content=\"{}\">",
            escape_html(description)
        );
    }
    let _ = write!(
        out,
        "<meta property=\"og:title\" content=\"{}\">",
        escape_html(page.display_title())
    );
    let _ = write!(
        out,
        "<link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/css2?family={}&display=swap\">",
        theme.font_family.name().replace(' ', "+")
    );

    let _ = write!(
        out,
        "<style>{}{}",
        style_safe(&theme_css_variables(theme)),
        BASE_CSS
    );
    if let Some(custom) = page.custom_css.as_deref() {
        out.push_str(&style_safe(custom));
    }
    out.push_str("</style></head><body>");
    out.push_str(&render_page(page, ctx).to_html());
    out.push_str("</body></html>");
    out
}

// Keeps stored CSS text from closing the surrounding <style> element.
fn style_safe(css: &str) -> String {
    css.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::{render_page, render_page_html, render_sections_value};
    use crate::builder::create_section_at;
    use crate::model::page::LandingPage;
    use crate::model::section::SectionType;
    use crate::model::theme::ThemeSettings;
    use crate::render::countdown::RenderContext;
    use serde_json::json;

    #[test]
    fn sections_render_in_list_order_not_by_order_field() {
        let mut page = LandingPage::new("Eid Offer");
        page.sections.push(create_section_at(SectionType::Faq, 200));
        page.sections.push(create_section_at(SectionType::HeroGradient, 100));

        let node = render_page(&page, &RenderContext::at(0));
        let sections = node.find_by_class("lp-section");
        assert_eq!(sections.len(), 2);
        assert!(sections[0].has_class("lp-section-faq"));
        assert!(sections[1].has_class("lp-section-hero-gradient"));
    }

    #[test]
    fn document_carries_meta_and_escaped_custom_css() {
        let mut page = LandingPage::new("Eid <Offer>");
        page.meta_description = Some("Best deals".to_string());
        page.custom_css = Some("body{color:red}</style><script>".to_string());

        let html = render_page_html(&page, &RenderContext::at(0));
        assert!(html.contains("<title>Eid &lt;Offer&gt;</title>"));
        assert!(html.contains("content=\"Best deals\""));
        assert!(html.contains("--lp-primary:#6366f1"));
        assert!(!html.contains("</style><script>"));
    }

    #[test]
    fn theme_values_cannot_close_the_style_element() {
        let mut page = LandingPage::new("Theme Break");
        page.theme_settings.primary_color = "red}</style><script>alert(1)</script>".to_string();

        let html = render_page_html(&page, &RenderContext::at(0));
        assert!(!html.contains("</style><script>"));
        assert_eq!(html.matches("</style>").count(), 1);
        assert!(html.contains("--lp-primary:red}<\\/style>"));
    }

    #[test]
    fn non_array_value_renders_empty_page() {
        let node = render_sections_value(
            &json!({"oops": true}),
            &ThemeSettings::default(),
            &RenderContext::at(0),
        );
        assert!(node.find_by_class("lp-section").is_empty());
    }
}
