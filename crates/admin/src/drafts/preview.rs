//! Read-only storefront view derived from a [`CustomizationDraft`].

use acaclick_core::{CustomizationDraft, EncodedImage};
use serde::Serialize;

const LOGO_PLACEHOLDER: &str = "https://via.placeholder.com/40x40/7e22ce/ffffff?text=LOGO";
const FEATURED_PLACEHOLDER: &str =
    "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=600&h=400&fit=crop";
const HEADPHONES_PLACEHOLDER: &str =
    "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=300&h=300&fit=crop";
const WATCH_PLACEHOLDER: &str =
    "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=300&h=300&fit=crop";
const SNEAKERS_PLACEHOLDER: &str =
    "https://images.unsplash.com/photo-1560769629-975ec94e6a86?w=300&h=300&fit=crop";
const GRADIENT_END: &str = "#f97316";
pub const FALLBACK_ADDRESS: &str = "Calle Principal 123";

fn image_or(image: Option<&EncodedImage>, placeholder: &str) -> String {
    image.map_or_else(|| placeholder.to_owned(), |i| i.as_str().to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewHeader {
    pub logo_src: String,
    pub store_name: String,
    pub font_css: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewHero {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub background: String,
    pub button_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewFeatured {
    pub image_src: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub name: &'static str,
    pub price: &'static str,
    pub image_src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewFooter {
    pub store_name: String,
    pub address: String,
}

/// Everything the storefront preview shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontPreview {
    pub header: PreviewHeader,
    pub hero: PreviewHero,
    pub featured: PreviewFeatured,
    pub products: [ProductCard; 3],
    pub footer: PreviewFooter,
}

impl StorefrontPreview {
    #[must_use]
    pub fn from_draft(draft: &CustomizationDraft) -> Self {
        let primary = draft.primary_color.to_string();
        let address = if draft.map_address.trim().is_empty() {
            FALLBACK_ADDRESS.to_owned()
        } else {
            draft.map_address.clone()
        };

        Self {
            header: PreviewHeader {
                logo_src: image_or(draft.store_logo.as_ref(), LOGO_PLACEHOLDER),
                store_name: draft.store_name.clone(),
                font_css: draft.font_family.css_stack(),
            },
            hero: PreviewHero {
                title: draft.hero_title.clone(),
                subtitle: draft.hero_subtitle.clone(),
                button_text: draft.hero_button.clone(),
                background: format!("linear-gradient(to right, {primary}, {GRADIENT_END})"),
                button_color: primary,
            },
            featured: PreviewFeatured {
                image_src: image_or(draft.featured_image.as_ref(), FEATURED_PLACEHOLDER),
                title: draft.featured_title.clone(),
                description: draft.featured_description.clone(),
            },
            products: [
                ProductCard {
                    name: "Auriculares Premium",
                    price: "$29.99",
                    image_src: image_or(draft.product_image_1.as_ref(), HEADPHONES_PLACEHOLDER),
                },
                ProductCard {
                    name: "Smart Watch",
                    price: "$49.99",
                    image_src: image_or(draft.product_image_2.as_ref(), WATCH_PLACEHOLDER),
                },
                ProductCard {
                    name: "Zapatillas Deportivas",
                    price: "$39.99",
                    image_src: SNEAKERS_PLACEHOLDER.to_owned(),
                },
            ],
            footer: PreviewFooter {
                store_name: draft.store_name.clone(),
                address,
            },
        }
    }
}
