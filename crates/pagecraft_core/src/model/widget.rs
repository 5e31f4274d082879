//! Widget domain model.
//!
//! # Responsibility
//! - Define the closed set of atomic content widgets.
//! - Own the per-type default settings templates.
//!
//! # Invariants
//! - `id` is unique within one landing page document.
//! - A freshly created widget carries every key of its type template.

use crate::model::settings::{settings_from, Settings};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Stable identifier of a widget inside a page document.
pub type WidgetId = Uuid;

/// Closed catalog of widget kinds offered by the builder palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetType {
    Heading,
    Text,
    Image,
    Button,
    Spacer,
    Divider,
    Video,
    IconBox,
    Counter,
    Countdown,
    Form,
    Testimonial,
    Faq,
    PriceBox,
    Gallery,
    Html,
}

impl WidgetType {
    /// Every widget type in palette order.
    pub const ALL: [WidgetType; 16] = [
        WidgetType::Heading,
        WidgetType::Text,
        WidgetType::Image,
        WidgetType::Button,
        WidgetType::Spacer,
        WidgetType::Divider,
        WidgetType::Video,
        WidgetType::IconBox,
        WidgetType::Counter,
        WidgetType::Countdown,
        WidgetType::Form,
        WidgetType::Testimonial,
        WidgetType::Faq,
        WidgetType::PriceBox,
        WidgetType::Gallery,
        WidgetType::Html,
    ];

    /// Wire name as stored in JSON (`icon-box`, `price-box`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Spacer => "spacer",
            Self::Divider => "divider",
            Self::Video => "video",
            Self::IconBox => "icon-box",
            Self::Counter => "counter",
            Self::Countdown => "countdown",
            Self::Form => "form",
            Self::Testimonial => "testimonial",
            Self::Faq => "faq",
            Self::PriceBox => "price-box",
            Self::Gallery => "gallery",
            Self::Html => "html",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
    }

    /// Palette label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Button => "Button",
            Self::Spacer => "Spacer",
            Self::Divider => "Divider",
            Self::Video => "Video",
            Self::IconBox => "Icon Box",
            Self::Counter => "Counter",
            Self::Countdown => "Countdown",
            Self::Form => "Order Form",
            Self::Testimonial => "Testimonial",
            Self::Faq => "FAQ Item",
            Self::PriceBox => "Price Box",
            Self::Gallery => "Gallery",
            Self::Html => "HTML",
        }
    }

    /// Returns a fresh copy of this type's default settings.
    pub fn default_settings(self) -> Settings {
        let template = match self {
            Self::Heading => json!({
                "text": "Your Heading Here",
                "level": "h2",
                "alignment": "center",
                "color": "",
                "fontSize": "32px",
                "fontWeight": "700"
            }),
            Self::Text => json!({
                "content": "Write your text here. Describe your product and its benefits.",
                "alignment": "left",
                "color": "",
                "fontSize": "16px",
                "lineHeight": "1.6"
            }),
            Self::Image => json!({
                "src": "",
                "alt": "Image",
                "width": "100%",
                "alignment": "center",
                "borderRadius": "8px",
                "link": ""
            }),
            Self::Button => json!({
                "text": "Order Now",
                "link": "#checkout",
                "alignment": "center",
                "size": "medium",
                "backgroundColor": "",
                "textColor": "",
                "fullWidth": false
            }),
            Self::Spacer => json!({
                "height": 40
            }),
            Self::Divider => json!({
                "style": "solid",
                "color": "#e5e7eb",
                "thickness": 1,
                "width": "100%"
            }),
            Self::Video => json!({
                "url": "",
                "autoplay": false,
                "aspectRatio": "16:9"
            }),
            Self::IconBox => json!({
                "icon": "✓",
                "title": "Feature Title",
                "description": "Short description of this feature.",
                "iconColor": "",
                "alignment": "center"
            }),
            Self::Counter => json!({
                "number": 1000,
                "prefix": "",
                "suffix": "+",
                "label": "Happy Customers",
                "color": ""
            }),
            Self::Countdown => json!({
                "endDate": "",
                "title": "Offer ends in",
                "expiredText": "This offer has ended",
                "showDays": true
            }),
            Self::Form => json!({
                "title": "Place Your Order",
                "buttonText": "Confirm Order",
                "fields": ["name", "phone", "address"],
                "successMessage": "Thank you! We will call you to confirm."
            }),
            Self::Testimonial => json!({
                "quote": "Excellent product, fast delivery!",
                "author": "Happy Customer",
                "role": "Verified Buyer",
                "avatar": "",
                "rating": 5
            }),
            Self::Faq => json!({
                "question": "How long does delivery take?",
                "answer": "Inside Dhaka 1-2 days, outside Dhaka 3-5 days.",
                "open": false
            }),
            Self::PriceBox => json!({
                "title": "Special Offer",
                "originalPrice": "1500",
                "salePrice": "990",
                "currency": "৳",
                "features": ["Free delivery", "Cash on delivery"],
                "buttonText": "Order Now",
                "buttonLink": "#checkout",
                "highlighted": true
            }),
            Self::Gallery => json!({
                "images": [],
                "columns": 3,
                "gap": "10px"
            }),
            Self::Html => json!({
                "html": ""
            }),
        };
        settings_from(template)
    }
}

/// Atomic content unit placed inside a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    /// Serialized as `type` to match the stored document shape.
    #[serde(rename = "type")]
    pub kind: WidgetType,
    #[serde(default)]
    pub settings: Settings,
}

impl Widget {
    /// Creates a widget with a generated id and the type's template settings.
    pub fn new(kind: WidgetType) -> Self {
        Self::with_id(Uuid::new_v4(), kind)
    }

    pub fn with_id(id: WidgetId, kind: WidgetType) -> Self {
        Self {
            id,
            kind,
            settings: kind.default_settings(),
        }
    }
}
