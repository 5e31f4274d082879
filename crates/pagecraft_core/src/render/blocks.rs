//! Building blocks shared by section and widget renderers.

use crate::model::settings::entry_text;
use crate::model::theme::ThemeSettings;
use crate::render::countdown::{parse_end_date, remaining, RenderContext};
use crate::render::node::{el, text, Element, RenderNode};
use crate::render::theme::themed_button;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static YOUTUBE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{6,})")
        .expect("valid youtube regex")
});
static FACEBOOK_VIDEO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"facebook\.com/.+/videos/").expect("valid facebook video regex"));

const MAX_RATING: i64 = 5;

/// Five-slot star rating (`★★★★☆`).
pub fn stars(rating: f64) -> Element {
    let filled = (rating.round() as i64).clamp(0, MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;
    el("div")
        .class("lp-stars")
        .style("color", "#f59e0b")
        .text(format!("{}{}", "★".repeat(filled), "☆".repeat(empty)))
}

/// Image source from a list entry: either a bare URL string or an object
/// with `src`/`url`.
pub fn image_source(entry: &Value) -> Option<String> {
    let src = match entry {
        Value::String(value) => value.clone(),
        Value::Object(_) => {
            let src = entry_text(entry, "src");
            if src.is_empty() {
                entry_text(entry, "url")
            } else {
                src
            }
        }
        _ => String::new(),
    };
    let trimmed = src.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn image(src: &str, alt: &str, theme: &ThemeSettings) -> Element {
    el("img")
        .class("lp-image")
        .attr("src", src)
        .attr("alt", alt)
        .attr("loading", "lazy")
        .style("max-width", "100%")
        .style("border-radius", &theme.border_radius)
}

pub fn placeholder(label: &str) -> Element {
    el("div")
        .class("lp-placeholder")
        .style("background", "#f3f4f6")
        .style("color", "#9ca3af")
        .style("padding", "40px")
        .style("text-align", "center")
        .text(label)
}

/// Responsive image grid; entries without a usable source are skipped.
pub fn gallery(images: &[Value], columns: f64, gap: &str, theme: &ThemeSettings) -> Element {
    let columns = (columns.round() as i64).clamp(1, 6);
    let items: Vec<RenderNode> = images
        .iter()
        .filter_map(image_source)
        .map(|src| image(&src, "", theme).into())
        .collect();
    if items.is_empty() {
        return placeholder("No images yet");
    }
    el("div")
        .class("lp-gallery")
        .style("display", "grid")
        .style(
            "grid-template-columns",
            format!("repeat({columns}, minmax(0, 1fr))"),
        )
        .style("gap", gap)
        .children(items)
}

/// Embed for YouTube/Facebook links, `<video>` for direct files.
pub fn video_embed(url: &str, autoplay: bool) -> Element {
    let url = url.trim();
    if url.is_empty() {
        return placeholder("Add a video URL");
    }

    let frame = |src: String| {
        el("iframe")
            .attr("src", src)
            .attr("allowfullscreen", "true")
            .attr("frameborder", "0")
            .attr(
                "allow",
                "accelerometer; autoplay; encrypted-media; picture-in-picture",
            )
            .style("position", "absolute")
            .style("inset", "0")
            .style("width", "100%")
            .style("height", "100%")
    };

    let player = if let Some(captures) = YOUTUBE_ID_RE.captures(url) {
        let autoplay_flag = if autoplay { "?autoplay=1&mute=1" } else { "" };
        frame(format!(
            "https://www.youtube.com/embed/{}{autoplay_flag}",
            &captures[1]
        ))
    } else if FACEBOOK_VIDEO_RE.is_match(url) {
        frame(format!(
            "https://www.facebook.com/plugins/video.php?href={}",
            percent_encode(url)
        ))
    } else {
        let video = el("video")
            .attr("src", url)
            .attr("controls", "true")
            .style("position", "absolute")
            .style("inset", "0")
            .style("width", "100%")
            .style("height", "100%");
        if autoplay {
            video.attr("autoplay", "true").attr("muted", "true")
        } else {
            video
        }
    };

    el("div")
        .class("lp-video")
        .style("position", "relative")
        .style("padding-top", "56.25%")
        .child(player)
}

/// Countdown timer block.
///
/// A missing or unparseable target renders the title only; a passed target
/// renders `expired_text`.
pub fn countdown(
    title: &str,
    end_date: Option<&Value>,
    expired_text: &str,
    show_days: bool,
    ctx: &RenderContext,
) -> Element {
    let mut block = el("div").class("lp-countdown").style("text-align", "center");
    if !title.trim().is_empty() {
        block = block.child(el("h3").class("lp-countdown-title").text(title));
    }

    let Some(end_ms) = parse_end_date(end_date) else {
        return block;
    };

    match remaining(end_ms, ctx.now_ms) {
        None => block.child(el("p").class("lp-countdown-expired").text(expired_text)),
        Some(left) => {
            let mut units = Vec::new();
            let hours = if show_days {
                units.push(("Days", left.days));
                left.hours
            } else {
                left.days * 24 + left.hours
            };
            units.push(("Hours", hours));
            units.push(("Minutes", left.minutes));
            units.push(("Seconds", left.seconds));

            let cells = units.into_iter().map(|(label, value)| {
                el("div")
                    .class("lp-countdown-unit")
                    .child(el("span").class("lp-countdown-value").text(format!("{value:02}")))
                    .child(el("span").class("lp-countdown-label").text(label))
            });
            block.child(
                el("div")
                    .class("lp-countdown-timer")
                    .attr("data-end", end_ms.to_string())
                    .style("display", "flex")
                    .style("justify-content", "center")
                    .style("gap", "16px")
                    .children(cells),
            )
        }
    }
}

/// Cash-on-delivery order form.
pub fn order_form(
    fields: &[String],
    button_text: &str,
    success_message: &str,
    theme: &ThemeSettings,
) -> Element {
    let inputs = fields.iter().filter_map(|field| form_field(field));
    let submit = themed_button(theme, button_text, "#", "", "")
        .attr("role", "button")
        .attr("data-action", "submit-order");
    el("form")
        .class("lp-order-form")
        .attr("method", "post")
        .attr("data-success-message", success_message)
        .children(inputs)
        .child(submit)
}

fn form_field(field: &str) -> Option<Element> {
    let (label, input_type, required) = match field.trim() {
        "name" => ("Your Name", "text", true),
        "phone" => ("Phone Number", "tel", true),
        "address" => ("Full Address", "textarea", true),
        "email" => ("Email", "email", false),
        "quantity" => ("Quantity", "number", true),
        "note" => ("Note", "textarea", false),
        _ => return None,
    };

    let input = if input_type == "textarea" {
        el("textarea").attr("rows", "3")
    } else {
        el("input").attr("type", input_type)
    };
    let input = input
        .attr("name", field.trim())
        .attr("placeholder", label)
        .style("width", "100%")
        .style("padding", "10px");
    let input = match (required, field.trim()) {
        (true, "quantity") => input.attr("required", "true").attr("min", "1").attr("value", "1"),
        (true, _) => input.attr("required", "true"),
        (false, _) => input,
    };

    Some(
        el("label")
            .class("lp-form-field")
            .style("display", "block")
            .style("margin-bottom", "12px")
            .child(el("span").text(label))
            .child(input),
    )
}

/// Question/answer disclosure.
pub fn faq_item(question: &str, answer: &str, open: bool) -> Element {
    let details = el("details")
        .class("lp-faq-item")
        .child(el("summary").text(question))
        .child(el("p").text(answer));
    if open {
        details.attr("open", "open")
    } else {
        details
    }
}

/// Formats a price with its currency symbol.
pub fn price(currency: &str, amount: &str) -> String {
    format!("{}{}", currency.trim(), amount.trim())
}

pub fn paragraphs(content: &str) -> Vec<RenderNode> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| el("p").child(text(block)).into())
        .collect()
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{countdown, image_source, stars, video_embed};
    use crate::render::countdown::RenderContext;
    use crate::render::node::RenderNode;
    use serde_json::json;

    #[test]
    fn stars_clamp_rating() {
        assert_eq!(RenderNode::from(stars(9.0)).text_content(), "★★★★★");
        assert_eq!(RenderNode::from(stars(3.0)).text_content(), "★★★☆☆");
    }

    #[test]
    fn youtube_links_become_embeds() {
        let html = RenderNode::from(video_embed("https://youtu.be/dQw4w9WgXcQ", false)).to_html();
        assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        let html = RenderNode::from(video_embed("https://cdn.example.com/a.mp4", false)).to_html();
        assert!(html.contains("<video"));
    }

    #[test]
    fn image_source_accepts_strings_and_objects() {
        assert_eq!(image_source(&json!("a.png")).as_deref(), Some("a.png"));
        assert_eq!(image_source(&json!({"url": "b.png"})).as_deref(), Some("b.png"));
        assert_eq!(image_source(&json!({"alt": "x"})), None);
    }

    #[test]
    fn countdown_switches_to_expired_text() {
        let ctx = RenderContext::at(2_000_000);
        let running = RenderNode::from(countdown(
            "Hurry",
            Some(&json!(2_090_000)),
            "Over",
            true,
            &ctx,
        ));
        assert_eq!(running.find_by_class("lp-countdown-unit").len(), 4);

        let expired = RenderNode::from(countdown(
            "Hurry",
            Some(&json!(1_000_000)),
            "Over",
            true,
            &ctx,
        ));
        assert!(expired.text_content().contains("Over"));
        assert!(expired.find_by_class("lp-countdown-unit").is_empty());
    }
}
