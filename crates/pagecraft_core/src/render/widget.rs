//! Row, column and widget renderers.

use crate::model::layout::{Column, Row, RowWidth};
use crate::model::settings::ResolvedSettings;
use crate::model::theme::ThemeSettings;
use crate::model::widget::{Widget, WidgetType};
use crate::render::blocks;
use crate::render::countdown::RenderContext;
use crate::render::node::{el, raw_html, Element, RenderNode};
use crate::render::theme::{local_or, themed_button};

const HEADING_LEVELS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const BOXED_MAX_WIDTH: &str = "1140px";

/// Renders one row with its columns laid out per the row's fractions.
pub fn render_row(row: &Row, theme: &ThemeSettings, ctx: &RenderContext) -> RenderNode {
    let settings = &row.settings;
    let widths = row.layout.widths();

    let columns = row.columns.iter().enumerate().map(|(index, column)| {
        // Columns beyond the declared fractions share the last width.
        let width = widths
            .get(index)
            .or_else(|| widths.last())
            .copied()
            .unwrap_or(100.0);
        render_column(column, width, theme, ctx)
    });

    let inner = el("div")
        .class("lp-row-inner")
        .style("display", "flex")
        .style("flex-wrap", "wrap")
        .style("gap", &settings.gap)
        .style("margin", "0 auto")
        .style(
            "max-width",
            match settings.max_width {
                RowWidth::Boxed => BOXED_MAX_WIDTH,
                RowWidth::Full => "100%",
            },
        )
        .children(columns);

    let mut outer = el("div")
        .class("lp-row")
        .class(&format!("lp-row-{}", row.layout.as_str()))
        .attr("data-row-id", row.id.to_string())
        .style("padding", &settings.padding)
        .style("min-height", &settings.min_height)
        .style("background-color", &settings.background_color);
    if !settings.background_image.trim().is_empty() {
        outer = outer
            .style(
                "background-image",
                format!("url('{}')", settings.background_image.trim()),
            )
            .style("background-size", "cover")
            .style("background-position", "center");
    }
    outer.child(inner).into()
}

fn render_column(
    column: &Column,
    width_percent: f32,
    theme: &ThemeSettings,
    ctx: &RenderContext,
) -> RenderNode {
    let settings = &column.settings;
    el("div")
        .class("lp-column")
        .attr("data-column-id", column.id.to_string())
        .style("flex", format!("1 1 calc({width_percent}% - 20px)"))
        .style("min-width", "240px")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("justify-content", settings.vertical_align.as_css())
        .style("padding", &settings.padding)
        .style("background-color", &settings.background_color)
        .children(
            column
                .widgets
                .iter()
                .map(|widget| render_widget(widget, theme, ctx)),
        )
        .into()
}

/// Renders one widget; missing settings resolve against the type template.
pub fn render_widget(widget: &Widget, theme: &ThemeSettings, ctx: &RenderContext) -> RenderNode {
    let s = ResolvedSettings::new(&widget.settings, widget.kind.default_settings());
    let body = match widget.kind {
        WidgetType::Heading => heading(&s, theme),
        WidgetType::Text => el("div")
            .class("lp-text")
            .style("text-align", s.text("alignment"))
            .style("color", local_or(&s.text("color"), &theme.text_color))
            .style("font-size", s.text("fontSize"))
            .style("line-height", s.text("lineHeight"))
            .children(blocks::paragraphs(&s.text("content"))),
        WidgetType::Image => image(&s, theme),
        WidgetType::Button => button(&s, theme),
        WidgetType::Spacer => el("div")
            .class("lp-spacer")
            .style("height", format!("{}px", s.number("height").max(0.0))),
        WidgetType::Divider => el("hr")
            .class("lp-divider")
            .style("border", "none")
            .style(
                "border-top",
                format!(
                    "{}px {} {}",
                    s.number("thickness").max(0.0),
                    s.text("style"),
                    s.text("color")
                ),
            )
            .style("width", s.text("width"))
            .style("margin", "16px auto"),
        WidgetType::Video => blocks::video_embed(&s.text("url"), s.flag("autoplay")),
        WidgetType::IconBox => el("div")
            .class("lp-icon-box")
            .style("text-align", s.text("alignment"))
            .child(
                el("div")
                    .class("lp-icon")
                    .style("font-size", "40px")
                    .style("color", local_or(&s.text("iconColor"), &theme.primary_color))
                    .text(s.text("icon")),
            )
            .child(el("h3").text(s.text("title")))
            .child(el("p").text(s.text("description"))),
        WidgetType::Counter => el("div")
            .class("lp-counter")
            .style("text-align", "center")
            .child(
                el("div")
                    .class("lp-counter-number")
                    .style("font-size", "40px")
                    .style("font-weight", "700")
                    .style("color", local_or(&s.text("color"), &theme.primary_color))
                    .text(format!(
                        "{}{}{}",
                        s.text("prefix"),
                        s.text("number"),
                        s.text("suffix")
                    )),
            )
            .child(el("div").class("lp-counter-label").text(s.text("label"))),
        WidgetType::Countdown => blocks::countdown(
            &s.text("title"),
            s.value("endDate"),
            &s.text("expiredText"),
            s.flag("showDays"),
            ctx,
        ),
        WidgetType::Form => el("div")
            .class("lp-form-widget")
            .child(el("h3").text(s.text("title")))
            .child(blocks::order_form(
                &s.strings("fields"),
                &s.text("buttonText"),
                &s.text("successMessage"),
                theme,
            )),
        WidgetType::Testimonial => testimonial(&s, theme),
        WidgetType::Faq => blocks::faq_item(&s.text("question"), &s.text("answer"), s.flag("open")),
        WidgetType::PriceBox => price_box(&s, theme),
        WidgetType::Gallery => blocks::gallery(
            s.list("images"),
            s.number("columns"),
            &s.text("gap"),
            theme,
        ),
        WidgetType::Html => el("div")
            .class("lp-html")
            .child(raw_html(s.text("html"))),
    };

    body.class("lp-widget")
        .class(&format!("lp-widget-{}", widget.kind.as_str()))
        .attr("data-widget-id", widget.id.to_string())
        .into()
}

fn heading(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let level = s.text("level");
    let tag = if HEADING_LEVELS.contains(&level.as_str()) {
        level.as_str()
    } else {
        "h2"
    };
    el(tag)
        .style("text-align", s.text("alignment"))
        .style("color", local_or(&s.text("color"), &theme.text_color))
        .style("font-size", s.text("fontSize"))
        .style("font-weight", s.text("fontWeight"))
        .style("font-family", theme.font_family.css_stack())
        .text(s.text("text"))
}

fn image(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let src = s.text("src");
    let wrapper = el("div").style("text-align", s.text("alignment"));
    if src.trim().is_empty() {
        return wrapper.child(blocks::placeholder("Upload an image"));
    }

    let img = blocks::image(&src, &s.text("alt"), theme)
        .style("width", s.text("width"))
        .style("border-radius", local_or(&s.text("borderRadius"), &theme.border_radius));
    let link = s.text("link");
    if link.trim().is_empty() {
        wrapper.child(img)
    } else {
        wrapper.child(el("a").attr("href", link.trim()).child(img))
    }
}

fn button(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let padding = match s.text("size").as_str() {
        "small" => "8px 18px",
        "large" => "16px 40px",
        _ => "12px 28px",
    };
    let mut link = themed_button(
        theme,
        &s.text("text"),
        &s.text("link"),
        &s.text("backgroundColor"),
        &s.text("textColor"),
    )
    .style("padding", padding);
    if s.flag("fullWidth") {
        link = link.style("display", "block").style("width", "100%");
    }
    el("div")
        .style("text-align", s.text("alignment"))
        .child(link)
}

fn testimonial(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let avatar = s.text("avatar");
    let mut card = el("blockquote")
        .class("lp-testimonial")
        .style("border-radius", &theme.border_radius)
        .style("padding", "24px")
        .style("background", "#f9fafb");
    if !avatar.trim().is_empty() {
        card = card.child(
            blocks::image(avatar.trim(), &s.text("author"), theme)
                .style("width", "64px")
                .style("height", "64px")
                .style("border-radius", "50%"),
        );
    }
    card.child(blocks::stars(s.number("rating")))
        .child(el("p").class("lp-quote").text(s.text("quote")))
        .child(
            el("footer")
                .child(el("strong").text(s.text("author")))
                .child(el("span").class("lp-role").text(s.text("role"))),
        )
}

fn price_box(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let currency = s.text("currency");
    let highlighted = s.flag("highlighted");
    let features = s
        .strings("features")
        .into_iter()
        .map(|feature| el("li").text(format!("✓ {feature}")));
    let original = s.text("originalPrice");

    let mut prices = el("div").class("lp-prices");
    if !original.trim().is_empty() {
        prices = prices.child(
            el("del")
                .class("lp-price-original")
                .style("color", "#9ca3af")
                .text(blocks::price(&currency, &original)),
        );
    }
    prices = prices.child(
        el("span")
            .class("lp-price-sale")
            .style("font-size", "32px")
            .style("font-weight", "700")
            .style("color", &theme.primary_color)
            .text(blocks::price(&currency, &s.text("salePrice"))),
    );

    el("div")
        .class("lp-price-box")
        .style("border-radius", &theme.border_radius)
        .style("padding", "24px")
        .style("text-align", "center")
        .style(
            "border",
            if highlighted {
                format!("2px solid {}", theme.primary_color)
            } else {
                "1px solid #e5e7eb".to_string()
            },
        )
        .child(el("h3").text(s.text("title")))
        .child(prices)
        .child(el("ul").style("list-style", "none").children(features))
        .child(themed_button(
            theme,
            &s.text("buttonText"),
            &s.text("buttonLink"),
            "",
            "",
        ))
}

#[cfg(test)]
mod tests {
    use super::{render_row, render_widget};
    use crate::builder::{change_layout, create_default_row, create_widget};
    use crate::model::layout::ColumnLayout;
    use crate::model::settings::Settings;
    use crate::model::theme::ThemeSettings;
    use crate::model::widget::{Widget, WidgetType};
    use crate::render::countdown::RenderContext;
    use serde_json::json;
    use uuid::Uuid;

    fn ctx() -> RenderContext {
        RenderContext::at(1_700_000_000_000)
    }

    #[test]
    fn every_widget_type_renders_from_template() {
        let theme = ThemeSettings::default();
        for kind in WidgetType::ALL {
            let node = render_widget(&create_widget(kind), &theme, &ctx());
            let class = format!("lp-widget-{}", kind.as_str());
            assert_eq!(node.find_by_class(&class).len(), 1, "{class}");
        }
    }

    #[test]
    fn widget_with_empty_settings_falls_back_to_template() {
        let widget = Widget {
            id: Uuid::new_v4(),
            kind: WidgetType::Heading,
            settings: Settings::new(),
        };
        let node = render_widget(&widget, &ThemeSettings::default(), &ctx());
        assert_eq!(node.text_content(), "Your Heading Here");
        assert!(node.to_html().starts_with("<h2"));
    }

    #[test]
    fn heading_color_override_beats_theme() {
        let mut widget = create_widget(WidgetType::Heading);
        widget.settings.insert("color".to_string(), json!("#123456"));
        let node = render_widget(&widget, &ThemeSettings::default(), &ctx());
        let element = node.as_element().unwrap();
        assert_eq!(element.style_value("color"), Some("#123456"));
    }

    #[test]
    fn row_renders_one_column_per_fraction() {
        let mut row = create_default_row(ColumnLayout::Thirds);
        row.columns[1].widgets.push(create_widget(WidgetType::Text));
        let node = render_row(&row, &ThemeSettings::default(), &ctx());
        assert_eq!(node.find_by_class("lp-column").len(), 3);
        assert_eq!(node.find_by_class("lp-widget").len(), 1);

        let shrunk = change_layout(row, ColumnLayout::Full);
        let node = render_row(&shrunk, &ThemeSettings::default(), &ctx());
        assert_eq!(node.find_by_class("lp-column").len(), 1);
        assert_eq!(node.find_by_class("lp-widget").len(), 1);
    }
}
