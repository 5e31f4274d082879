//! Section renderers.
//!
//! # Responsibility
//! - Map each section type to its render tree with a closed, exhaustive
//!   match.
//! - Append the section's content rows after its own template content.
//!
//! # Invariants
//! - Rendering never fails: every setting is read through
//!   `ResolvedSettings`, so missing or mistyped keys use the type template.
//! - The same function serves the authoring preview and the public page.

use crate::model::section::{Section, SectionType};
use crate::model::settings::{entry_text, ResolvedSettings};
use crate::model::theme::ThemeSettings;
use crate::render::blocks;
use crate::render::countdown::RenderContext;
use crate::render::node::{el, raw_html, Element, RenderNode};
use crate::render::theme::{local_or, themed_button};
use crate::render::widget::render_row;
use serde_json::Value;

/// Anchor id shared by every order call-to-action (`#checkout`).
pub const CHECKOUT_ANCHOR: &str = "checkout";

const CONTENT_WIDTH: &str = "1140px";
const CHECKOUT_FIELDS: &[&str] = &["name", "phone", "address"];

/// Renders a section against the current wall clock.
pub fn render_section(section: &Section, theme: &ThemeSettings) -> RenderNode {
    render_section_at(section, theme, &RenderContext::now())
}

/// Renders a section at a fixed clock reading.
pub fn render_section_at(
    section: &Section,
    theme: &ThemeSettings,
    ctx: &RenderContext,
) -> RenderNode {
    let s = ResolvedSettings::new(&section.settings, section.kind.default_settings());
    let body = match section.kind {
        SectionType::HeroGradient => hero_gradient(&s, theme),
        SectionType::HeroImage => hero_image(&s, theme),
        SectionType::BenefitsGrid => benefits_grid(&s, theme),
        SectionType::FeaturesList => features_list(&s, theme),
        SectionType::ProductShowcase => product_showcase(&s, theme),
        SectionType::Testimonials => testimonials(&s, theme),
        SectionType::Faq => faq(&s),
        SectionType::Countdown => countdown(&s, ctx),
        SectionType::CheckoutForm => checkout_form(&s, theme),
        SectionType::Pricing => pricing(&s, theme),
        SectionType::Gallery => container()
            .child(title(&s.text("title")))
            .child(blocks::gallery(s.list("images"), s.number("columns"), "10px", theme)),
        SectionType::Video => container()
            .child(title(&s.text("title")))
            .child(blocks::video_embed(&s.text("videoUrl"), false))
            .children(blocks::paragraphs(&s.text("description"))),
        SectionType::CtaBanner => cta_banner(&s, theme),
        SectionType::TrustBadges => trust_badges(&s),
        SectionType::BeforeAfter => before_after(&s, theme),
        SectionType::Guarantee => container()
            .style("text-align", "center")
            .child(
                el("div")
                    .class("lp-guarantee-icon")
                    .style("font-size", "56px")
                    .text(s.text("icon")),
            )
            .child(title(&s.text("title")))
            .children(blocks::paragraphs(&s.text("description"))),
        SectionType::HowToOrder => how_to_order(&s, theme),
        SectionType::CustomHtml => el("div")
            .class("lp-custom-html")
            .child(raw_html(s.text("html"))),
    };

    let mut wrapper = el("section")
        .class("lp-section")
        .class(&format!("lp-section-{}", section.kind.as_str()))
        .attr("id", section_anchor(section))
        .attr("data-section-id", section.id.to_string())
        .child(body);
    if !section.rows.is_empty() {
        wrapper = wrapper.child(
            el("div")
                .class("lp-section-rows")
                .children(section.rows.iter().map(|row| render_row(row, theme, ctx))),
        );
    }
    wrapper.into()
}

fn section_anchor(section: &Section) -> String {
    match section.kind {
        SectionType::CheckoutForm => CHECKOUT_ANCHOR.to_string(),
        _ => format!("section-{}", section.id),
    }
}

fn container() -> Element {
    el("div")
        .class("lp-container")
        .style("max-width", CONTENT_WIDTH)
        .style("margin", "0 auto")
        .style("padding", "60px 20px")
}

fn title(text: &str) -> Element {
    el("h2")
        .class("lp-section-title")
        .style("text-align", "center")
        .style("margin-bottom", "32px")
        .text(text)
}

fn grid(columns: i64) -> Element {
    el("div")
        .class("lp-grid")
        .style("display", "grid")
        .style(
            "grid-template-columns",
            format!("repeat(auto-fit, minmax({}px, 1fr))", 960 / columns.clamp(1, 6) - 20),
        )
        .style("gap", "24px")
}

fn card(theme: &ThemeSettings) -> Element {
    el("div")
        .class("lp-card")
        .style("background", "#ffffff")
        .style("border-radius", &theme.border_radius)
        .style("box-shadow", "0 1px 3px rgba(0,0,0,0.1)")
        .style("padding", "24px")
}

fn hero_content(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let color = s.text("textColor");
    el("div")
        .class("lp-hero-content")
        .style("text-align", "center")
        .style("color", &color)
        .child(
            el("h1")
                .class("lp-hero-headline")
                .style("font-size", "40px")
                .style("font-family", theme.font_family.css_stack())
                .text(s.text("headline")),
        )
        .child(el("p").class("lp-hero-subheadline").text(s.text("subheadline")))
        .child(themed_button(
            theme,
            &s.text("buttonText"),
            &s.text("buttonLink"),
            "",
            "",
        ))
}

fn hero_gradient(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let from = local_or(&s.text("gradientFrom"), &theme.primary_color).to_string();
    let to = local_or(&s.text("gradientTo"), &theme.secondary_color).to_string();
    let mut hero = el("div")
        .class("lp-hero")
        .style("background", format!("linear-gradient(135deg, {from}, {to})"))
        .style("padding", "80px 20px")
        .child(hero_content(s, theme));
    let image = s.text("image");
    if !image.trim().is_empty() {
        hero = hero.child(
            el("div")
                .class("lp-hero-image")
                .style("text-align", "center")
                .style("margin-top", "32px")
                .child(blocks::image(image.trim(), &s.text("headline"), theme)),
        );
    }
    hero
}

fn hero_image(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let background = s.text("backgroundImage");
    let opacity = s.number("overlayOpacity").clamp(0.0, 1.0);
    let mut hero = el("div")
        .class("lp-hero")
        .style("position", "relative")
        .style("padding", "120px 20px")
        .style("background-color", &theme.text_color);
    if !background.trim().is_empty() {
        hero = hero
            .style("background-image", format!("url('{}')", background.trim()))
            .style("background-size", "cover")
            .style("background-position", "center");
    }
    hero.child(
        el("div")
            .class("lp-hero-overlay")
            .style("position", "absolute")
            .style("inset", "0")
            .style("background", format!("rgba(0,0,0,{opacity})")),
    )
    .child(hero_content(s, theme).style("position", "relative"))
}

fn benefits_grid(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let items = s.list("items").iter().map(|item| {
        card(theme)
            .class("lp-benefit")
            .style("text-align", "center")
            .child(
                el("div")
                    .class("lp-benefit-icon")
                    .style("font-size", "40px")
                    .text(entry_text(item, "icon")),
            )
            .child(el("h3").text(entry_text(item, "title")))
            .child(el("p").text(entry_text(item, "description")))
    });
    container()
        .child(title(&s.text("title")))
        .child(grid(s.number("columns").round() as i64).children(items))
}

fn features_list(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let list = el("ul")
        .class("lp-features")
        .style("list-style", "none")
        .style("flex", "1")
        .children(
            s.strings("features")
                .into_iter()
                .map(|feature| el("li").style("padding", "8px 0").text(format!("✓ {feature}"))),
        );

    let image = s.text("image");
    let media = if image.trim().is_empty() {
        None
    } else {
        Some(
            el("div")
                .style("flex", "1")
                .child(blocks::image(image.trim(), &s.text("title"), theme)),
        )
    };

    let direction = if s.text("imagePosition") == "right" {
        "row-reverse"
    } else {
        "row"
    };
    let mut layout = el("div")
        .class("lp-features-layout")
        .style("display", "flex")
        .style("flex-wrap", "wrap")
        .style("flex-direction", direction)
        .style("gap", "32px")
        .style("align-items", "center");
    if let Some(media) = media {
        layout = layout.child(media);
    }
    container().child(title(&s.text("title"))).child(layout.child(list))
}

fn product_showcase(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let currency = s.text("currency");
    let original = s.text("originalPrice");
    let mut prices = el("div").class("lp-prices").style("margin", "16px 0");
    if !original.trim().is_empty() {
        prices = prices.child(
            el("del")
                .class("lp-price-original")
                .style("color", "#9ca3af")
                .style("margin-right", "12px")
                .text(blocks::price(&currency, &original)),
        );
    }
    prices = prices.child(
        el("span")
            .class("lp-price-sale")
            .style("font-size", "32px")
            .style("font-weight", "700")
            .style("color", &theme.primary_color)
            .text(blocks::price(&currency, &s.text("price"))),
    );

    let details = el("div")
        .class("lp-product-details")
        .style("flex", "1")
        .child(el("h2").text(s.text("title")))
        .children(blocks::paragraphs(&s.text("description")))
        .child(prices)
        .child(themed_button(
            theme,
            &s.text("buttonText"),
            &s.text("buttonLink"),
            "",
            "",
        ));

    container().child(
        el("div")
            .class("lp-product")
            .style("display", "flex")
            .style("flex-wrap", "wrap")
            .style("gap", "32px")
            .child(
                el("div")
                    .style("flex", "1")
                    .child(blocks::gallery(s.list("images"), 2.0, "8px", theme)),
            )
            .child(details),
    )
}

fn testimonials(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let items = s.list("items").iter().map(|item| {
        let rating = item.get("rating").and_then(Value::as_f64).unwrap_or(5.0);
        let location = entry_text(item, "location");
        let mut author = el("footer").child(el("strong").text(entry_text(item, "name")));
        if !location.trim().is_empty() {
            author = author.child(el("span").class("lp-location").text(format!(" · {location}")));
        }
        card(theme)
            .class("lp-testimonial")
            .child(blocks::stars(rating))
            .child(el("p").class("lp-quote").text(entry_text(item, "text")))
            .child(author)
    });
    container()
        .child(title(&s.text("title")))
        .child(grid(3).children(items))
}

fn faq(s: &ResolvedSettings<'_>) -> Element {
    let items = s.list("items").iter().map(|item| {
        blocks::faq_item(&entry_text(item, "question"), &entry_text(item, "answer"), false)
    });
    container()
        .style("max-width", "800px")
        .child(title(&s.text("title")))
        .children(items)
}

fn countdown(s: &ResolvedSettings<'_>, ctx: &RenderContext) -> Element {
    el("div")
        .class("lp-countdown-band")
        .style("background", s.text("backgroundColor"))
        .style("color", s.text("textColor"))
        .style("padding", "48px 20px")
        .child(blocks::countdown(
            &s.text("title"),
            s.value("endDate"),
            &s.text("expiredText"),
            true,
            ctx,
        ))
}

fn checkout_form(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let mut fields: Vec<String> = CHECKOUT_FIELDS.iter().map(|field| field.to_string()).collect();
    if s.flag("showQuantity") {
        fields.push("quantity".to_string());
    }
    let product_ids: Vec<String> = s
        .list("productIds")
        .iter()
        .filter_map(|id| match id {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            _ => None,
        })
        .collect();

    let inside = s.text("deliveryInsideDhaka");
    let outside = s.text("deliveryOutsideDhaka");
    let delivery = el("fieldset")
        .class("lp-delivery")
        .child(el("legend").text("Delivery area"))
        .child(delivery_option("inside_dhaka", "Inside Dhaka", &inside, true))
        .child(delivery_option("outside_dhaka", "Outside Dhaka", &outside, false));

    let form = blocks::order_form(&fields, &s.text("buttonText"), "", theme)
        .attr("data-product-ids", product_ids.join(","))
        .child(delivery);

    container()
        .style("max-width", "640px")
        .child(title(&s.text("title")))
        .child(
            el("p")
                .class("lp-section-subtitle")
                .style("text-align", "center")
                .text(s.text("subtitle")),
        )
        .child(card(theme).child(form))
}

fn delivery_option(value: &str, label: &str, charge: &str, checked: bool) -> Element {
    let input = el("input")
        .attr("type", "radio")
        .attr("name", "delivery_area")
        .attr("value", value)
        .attr("data-charge", charge);
    let input = if checked {
        input.attr("checked", "checked")
    } else {
        input
    };
    el("label")
        .class("lp-delivery-option")
        .style("display", "block")
        .child(input)
        .text(format!(" {label} (৳{charge})"))
}

fn pricing(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let currency = s.text("currency");
    let plans = s.list("plans").iter().map(|plan| {
        let highlighted = plan.get("highlighted").and_then(Value::as_bool).unwrap_or(false);
        let features = plan
            .get("features")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|feature| el("li").text(format!("✓ {feature}")))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        let mut plan_card = card(theme)
            .class("lp-plan")
            .style("text-align", "center")
            .child(el("h3").text(entry_text(plan, "name")))
            .child(
                el("div")
                    .class("lp-plan-price")
                    .style("font-size", "32px")
                    .style("font-weight", "700")
                    .style("color", &theme.primary_color)
                    .text(blocks::price(&currency, &entry_text(plan, "price"))),
            )
            .child(el("ul").style("list-style", "none").children(features))
            .child(themed_button(theme, "Order Now", "#checkout", "", ""));
        if highlighted {
            plan_card = plan_card
                .class("lp-plan-highlighted")
                .style("border", format!("2px solid {}", theme.primary_color));
        }
        plan_card
    });
    container()
        .child(title(&s.text("title")))
        .child(grid(3).children(plans))
}

fn cta_banner(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let background = local_or(&s.text("backgroundColor"), &theme.primary_color).to_string();
    el("div")
        .class("lp-cta")
        .style("background", background)
        .style("color", "#ffffff")
        .style("text-align", "center")
        .style("padding", "60px 20px")
        .child(el("h2").text(s.text("headline")))
        .child(el("p").text(s.text("subheadline")))
        .child(themed_button(
            theme,
            &s.text("buttonText"),
            &s.text("buttonLink"),
            "#ffffff",
            &theme.primary_color,
        ))
}

fn trust_badges(s: &ResolvedSettings<'_>) -> Element {
    let badges = s.list("items").iter().map(|item| {
        el("div")
            .class("lp-badge")
            .style("text-align", "center")
            .child(el("div").style("font-size", "32px").text(entry_text(item, "icon")))
            .child(el("span").text(entry_text(item, "label")))
    });
    container()
        .style("padding", "32px 20px")
        .child(
            el("div")
                .class("lp-badges")
                .style("display", "flex")
                .style("flex-wrap", "wrap")
                .style("justify-content", "center")
                .style("gap", "40px")
                .children(badges),
        )
}

fn before_after(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let panel = |src: String, label: String| {
        let media = if src.trim().is_empty() {
            blocks::placeholder(&label)
        } else {
            blocks::image(src.trim(), &label, theme)
        };
        el("figure")
            .class("lp-compare-panel")
            .style("flex", "1")
            .style("text-align", "center")
            .child(media)
            .child(el("figcaption").text(label))
    };
    container().child(title(&s.text("title"))).child(
        el("div")
            .class("lp-compare")
            .style("display", "flex")
            .style("flex-wrap", "wrap")
            .style("gap", "24px")
            .child(panel(s.text("beforeImage"), s.text("beforeLabel")))
            .child(panel(s.text("afterImage"), s.text("afterLabel"))),
    )
}

fn how_to_order(s: &ResolvedSettings<'_>, theme: &ThemeSettings) -> Element {
    let steps = s.list("steps").iter().enumerate().map(|(index, step)| {
        card(theme)
            .class("lp-step")
            .style("text-align", "center")
            .child(
                el("div")
                    .class("lp-step-number")
                    .style("background", &theme.primary_color)
                    .style("color", "#ffffff")
                    .style("border-radius", "50%")
                    .style("width", "40px")
                    .style("height", "40px")
                    .style("line-height", "40px")
                    .style("margin", "0 auto 12px")
                    .text((index + 1).to_string()),
            )
            .child(el("h3").text(entry_text(step, "title")))
            .child(el("p").text(entry_text(step, "description")))
    });
    container()
        .child(title(&s.text("title")))
        .child(grid(3).children(steps))
}
