//! Section domain model and template catalog.
//!
//! # Responsibility
//! - Define the closed catalog of top-level page blocks.
//! - Own the per-type default settings templates.
//!
//! # Invariants
//! - Page body order is list position; `order` only seeds initial placement.
//! - A freshly created section carries every key of its type template.

use crate::model::layout::Row;
use crate::model::settings::{settings_from, Settings};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

pub type SectionId = Uuid;

/// Closed catalog of section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    HeroGradient,
    HeroImage,
    BenefitsGrid,
    FeaturesList,
    ProductShowcase,
    Testimonials,
    Faq,
    Countdown,
    CheckoutForm,
    Pricing,
    Gallery,
    Video,
    CtaBanner,
    TrustBadges,
    BeforeAfter,
    Guarantee,
    HowToOrder,
    CustomHtml,
}

impl SectionType {
    pub const ALL: [SectionType; 18] = [
        SectionType::HeroGradient,
        SectionType::HeroImage,
        SectionType::BenefitsGrid,
        SectionType::FeaturesList,
        SectionType::ProductShowcase,
        SectionType::Testimonials,
        SectionType::Faq,
        SectionType::Countdown,
        SectionType::CheckoutForm,
        SectionType::Pricing,
        SectionType::Gallery,
        SectionType::Video,
        SectionType::CtaBanner,
        SectionType::TrustBadges,
        SectionType::BeforeAfter,
        SectionType::Guarantee,
        SectionType::HowToOrder,
        SectionType::CustomHtml,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeroGradient => "hero-gradient",
            Self::HeroImage => "hero-image",
            Self::BenefitsGrid => "benefits-grid",
            Self::FeaturesList => "features-list",
            Self::ProductShowcase => "product-showcase",
            Self::Testimonials => "testimonials",
            Self::Faq => "faq",
            Self::Countdown => "countdown",
            Self::CheckoutForm => "checkout-form",
            Self::Pricing => "pricing",
            Self::Gallery => "gallery",
            Self::Video => "video",
            Self::CtaBanner => "cta-banner",
            Self::TrustBadges => "trust-badges",
            Self::BeforeAfter => "before-after",
            Self::Guarantee => "guarantee",
            Self::HowToOrder => "how-to-order",
            Self::CustomHtml => "custom-html",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HeroGradient => "Hero (Gradient)",
            Self::HeroImage => "Hero (Image)",
            Self::BenefitsGrid => "Benefits Grid",
            Self::FeaturesList => "Features List",
            Self::ProductShowcase => "Product Showcase",
            Self::Testimonials => "Testimonials",
            Self::Faq => "FAQ",
            Self::Countdown => "Countdown Timer",
            Self::CheckoutForm => "Checkout Form",
            Self::Pricing => "Pricing",
            Self::Gallery => "Image Gallery",
            Self::Video => "Video",
            Self::CtaBanner => "Call to Action",
            Self::TrustBadges => "Trust Badges",
            Self::BeforeAfter => "Before / After",
            Self::Guarantee => "Guarantee",
            Self::HowToOrder => "How to Order",
            Self::CustomHtml => "Custom HTML",
        }
    }

    /// Returns a fresh copy of this type's settings template.
    pub fn default_settings(self) -> Settings {
        let template = match self {
            Self::HeroGradient => json!({
                "headline": "Premium Quality Products",
                "subheadline": "Cash on delivery all over Bangladesh",
                "buttonText": "Order Now",
                "buttonLink": "#checkout",
                "gradientFrom": "#6366f1",
                "gradientTo": "#ec4899",
                "textColor": "#ffffff",
                "image": ""
            }),
            Self::HeroImage => json!({
                "headline": "Discover Our Bestseller",
                "subheadline": "Limited stock available",
                "buttonText": "Order Now",
                "buttonLink": "#checkout",
                "backgroundImage": "",
                "overlayOpacity": 0.5,
                "textColor": "#ffffff"
            }),
            Self::BenefitsGrid => json!({
                "title": "Why Choose Us",
                "columns": 3,
                "items": [
                    {"icon": "🚚", "title": "Fast Delivery", "description": "Delivery within 1-3 days"},
                    {"icon": "💵", "title": "Cash on Delivery", "description": "Pay when you receive"},
                    {"icon": "✅", "title": "Quality Assured", "description": "100% original products"}
                ]
            }),
            Self::FeaturesList => json!({
                "title": "Product Features",
                "image": "",
                "imagePosition": "left",
                "features": ["Premium materials", "Long lasting", "Easy to use"]
            }),
            Self::ProductShowcase => json!({
                "title": "Our Product",
                "description": "Describe the product here.",
                "images": [],
                "price": "990",
                "originalPrice": "1500",
                "currency": "৳",
                "buttonText": "Order Now",
                "buttonLink": "#checkout"
            }),
            Self::Testimonials => json!({
                "title": "What Our Customers Say",
                "items": [
                    {"name": "Rahim", "location": "Dhaka", "text": "Great product, fast delivery.", "rating": 5},
                    {"name": "Karim", "location": "Chattogram", "text": "Exactly as described.", "rating": 5}
                ]
            }),
            Self::Faq => json!({
                "title": "Frequently Asked Questions",
                "items": [
                    {"question": "How do I order?", "answer": "Fill in the order form and we will call you."},
                    {"question": "What is the delivery charge?", "answer": "60 taka inside Dhaka, 120 taka outside."}
                ]
            }),
            Self::Countdown => json!({
                "title": "Offer Ends Soon!",
                "endDate": "",
                "expiredText": "The offer has ended",
                "backgroundColor": "#111827",
                "textColor": "#ffffff"
            }),
            Self::CheckoutForm => json!({
                "title": "Place Your Order",
                "subtitle": "Fill in your details below",
                "buttonText": "Confirm Order",
                "productIds": [],
                "showQuantity": true,
                "deliveryInsideDhaka": 60,
                "deliveryOutsideDhaka": 120
            }),
            Self::Pricing => json!({
                "title": "Choose Your Package",
                "currency": "৳",
                "plans": [
                    {"name": "Single", "price": "990", "features": ["1 piece"], "highlighted": false},
                    {"name": "Combo", "price": "1790", "features": ["2 pieces", "Free delivery"], "highlighted": true}
                ]
            }),
            Self::Gallery => json!({
                "title": "Gallery",
                "images": [],
                "columns": 3
            }),
            Self::Video => json!({
                "title": "Watch the Video",
                "videoUrl": "",
                "description": ""
            }),
            Self::CtaBanner => json!({
                "headline": "Don't Miss Out!",
                "subheadline": "Order today and get free delivery",
                "buttonText": "Order Now",
                "buttonLink": "#checkout",
                "backgroundColor": ""
            }),
            Self::TrustBadges => json!({
                "items": [
                    {"icon": "🔒", "label": "Secure Order"},
                    {"icon": "🚚", "label": "Nationwide Delivery"},
                    {"icon": "↩️", "label": "Easy Returns"}
                ]
            }),
            Self::BeforeAfter => json!({
                "title": "See the Difference",
                "beforeImage": "",
                "afterImage": "",
                "beforeLabel": "Before",
                "afterLabel": "After"
            }),
            Self::Guarantee => json!({
                "title": "100% Money Back Guarantee",
                "description": "Not satisfied? Return within 7 days for a full refund.",
                "icon": "🛡️"
            }),
            Self::HowToOrder => json!({
                "title": "How to Order",
                "steps": [
                    {"title": "Fill the form", "description": "Enter your name, phone and address"},
                    {"title": "Get a call", "description": "We confirm your order by phone"},
                    {"title": "Receive & pay", "description": "Pay cash when the parcel arrives"}
                ]
            }),
            Self::CustomHtml => json!({
                "html": ""
            }),
        };
        settings_from(template)
    }
}

/// Top-level page block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    #[serde(rename = "type")]
    pub kind: SectionType,
    /// Creation-time sort seed (epoch milliseconds).
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub settings: Settings,
    /// Content-area rows rendered after the section's own content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::SectionType;

    #[test]
    fn catalog_has_eighteen_unique_wire_names() {
        let mut names: Vec<_> = SectionType::ALL.iter().map(|kind| kind.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 18);
    }

    #[test]
    fn serde_name_matches_wire_name() {
        for kind in SectionType::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
            assert_eq!(SectionType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn every_template_is_non_empty() {
        for kind in SectionType::ALL {
            assert!(!kind.default_settings().is_empty(), "{}", kind.as_str());
        }
    }
}
