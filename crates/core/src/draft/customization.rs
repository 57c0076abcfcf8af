//! Storefront personalization draft.
//!
//! The draft serializes to the `personalizacion` object stored on a negocio
//! record, using the camelCase keys the storefront renderer reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{EncodedImage, FontFamily, HexColor, TextSize};

/// Image slots the media tab can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    StoreLogo,
    FeaturedImage,
    ProductImage1,
    ProductImage2,
}

impl ImageSlot {
    pub const ALL: [Self; 4] = [
        Self::StoreLogo,
        Self::FeaturedImage,
        Self::ProductImage1,
        Self::ProductImage2,
    ];

    /// Key under which the slot is stored in `personalizacion`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StoreLogo => "storeLogo",
            Self::FeaturedImage => "featuredImage",
            Self::ProductImage1 => "productImage1",
            Self::ProductImage2 => "productImage2",
        }
    }
}

/// Free-text fields of the customization editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomizationField {
    StoreName,
    StoreSlogan,
    HeroTitle,
    HeroSubtitle,
    HeroButton,
    FeaturedTitle,
    FeaturedDescription,
    MapAddress,
}

impl CustomizationField {
    pub const ALL: [Self; 8] = [
        Self::StoreName,
        Self::StoreSlogan,
        Self::HeroTitle,
        Self::HeroSubtitle,
        Self::HeroButton,
        Self::FeaturedTitle,
        Self::FeaturedDescription,
        Self::MapAddress,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StoreName => "storeName",
            Self::StoreSlogan => "storeSlogan",
            Self::HeroTitle => "heroTitle",
            Self::HeroSubtitle => "heroSubtitle",
            Self::HeroButton => "heroBtn",
            Self::FeaturedTitle => "featuredTitle",
            Self::FeaturedDescription => "featuredDesc",
            Self::MapAddress => "mapAddress",
        }
    }
}

impl std::str::FromStr for CustomizationField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s.trim())
            .ok_or_else(|| format!("unknown customization field: {s}"))
    }
}

/// Presentation settings for a storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationDraft {
    pub store_name: String,
    pub store_logo: Option<EncodedImage>,
    pub store_slogan: String,
    pub primary_color: HexColor,
    #[serde(rename = "bgColor")]
    pub background_color: HexColor,
    pub custom_color: HexColor,
    pub font_family: FontFamily,
    pub text_size: TextSize,
    pub hero_title: String,
    pub hero_subtitle: String,
    #[serde(rename = "heroBtn")]
    pub hero_button: String,
    pub featured_title: String,
    #[serde(rename = "featuredDesc")]
    pub featured_description: String,
    pub featured_image: Option<EncodedImage>,
    #[serde(rename = "productImage1")]
    pub product_image_1: Option<EncodedImage>,
    #[serde(rename = "productImage2")]
    pub product_image_2: Option<EncodedImage>,
    pub map_address: String,
}

impl Default for CustomizationDraft {
    fn default() -> Self {
        let orange = HexColor::rgb(0xf9, 0x73, 0x16);
        Self {
            store_name: "Mi Tienda Online".to_owned(),
            store_logo: None,
            store_slogan: String::new(),
            primary_color: orange,
            background_color: HexColor::rgb(0xff, 0xff, 0xff),
            custom_color: orange,
            font_family: FontFamily::Inter,
            text_size: TextSize::Medium,
            hero_title: "Bienvenido a Nuestra Tienda".to_owned(),
            hero_subtitle: "Descubre los mejores productos con calidad garantizada".to_owned(),
            hero_button: "Explorar Productos".to_owned(),
            featured_title: "Producto Destacado".to_owned(),
            featured_description: "Descripción del producto destacado. Este producto es ideal \
                                   para tu día a día con calidad premium."
                .to_owned(),
            featured_image: None,
            product_image_1: None,
            product_image_2: None,
            map_address: String::new(),
        }
    }
}

/// Outcome of [`CustomizationDraft::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayReport {
    /// Keys whose persisted value was taken.
    pub applied: Vec<String>,
    /// Known keys whose value did not fit the field type.
    pub rejected: Vec<String>,
    /// Keys the draft has no field for.
    pub unknown: Vec<String>,
}

impl OverlayReport {
    /// Whether the persisted object supplied a usable value for `key`.
    #[must_use]
    pub fn supplied(&self, key: &str) -> bool {
        self.applied.iter().any(|k| k == key)
    }
}

impl CustomizationDraft {
    #[must_use]
    pub fn text(&self, field: CustomizationField) -> &str {
        match field {
            CustomizationField::StoreName => &self.store_name,
            CustomizationField::StoreSlogan => &self.store_slogan,
            CustomizationField::HeroTitle => &self.hero_title,
            CustomizationField::HeroSubtitle => &self.hero_subtitle,
            CustomizationField::HeroButton => &self.hero_button,
            CustomizationField::FeaturedTitle => &self.featured_title,
            CustomizationField::FeaturedDescription => &self.featured_description,
            CustomizationField::MapAddress => &self.map_address,
        }
    }

    pub fn set_text(&mut self, field: CustomizationField, value: impl Into<String>) {
        let slot = match field {
            CustomizationField::StoreName => &mut self.store_name,
            CustomizationField::StoreSlogan => &mut self.store_slogan,
            CustomizationField::HeroTitle => &mut self.hero_title,
            CustomizationField::HeroSubtitle => &mut self.hero_subtitle,
            CustomizationField::HeroButton => &mut self.hero_button,
            CustomizationField::FeaturedTitle => &mut self.featured_title,
            CustomizationField::FeaturedDescription => &mut self.featured_description,
            CustomizationField::MapAddress => &mut self.map_address,
        };
        *slot = value.into();
    }

    #[must_use]
    pub const fn image(&self, slot: ImageSlot) -> Option<&EncodedImage> {
        match slot {
            ImageSlot::StoreLogo => self.store_logo.as_ref(),
            ImageSlot::FeaturedImage => self.featured_image.as_ref(),
            ImageSlot::ProductImage1 => self.product_image_1.as_ref(),
            ImageSlot::ProductImage2 => self.product_image_2.as_ref(),
        }
    }

    pub fn set_image(&mut self, slot: ImageSlot, image: Option<EncodedImage>) {
        let target = match slot {
            ImageSlot::StoreLogo => &mut self.store_logo,
            ImageSlot::FeaturedImage => &mut self.featured_image,
            ImageSlot::ProductImage1 => &mut self.product_image_1,
            ImageSlot::ProductImage2 => &mut self.product_image_2,
        };
        *target = image;
    }

    /// Merge a persisted `personalizacion` object onto this draft, key by key.
    ///
    /// A key is only taken when the resulting draft still deserializes, so
    /// one malformed value (say, `"primaryColor": "orange"`) cannot discard
    /// the rest of the object. A `null` or blank-string value is applied but
    /// not reported as supplied.
    pub fn overlay(&mut self, persisted: &Map<String, Value>) -> OverlayReport {
        let mut report = OverlayReport::default();
        let Ok(Value::Object(mut merged)) = serde_json::to_value(&*self) else {
            return report;
        };

        for (key, value) in persisted {
            if !merged.contains_key(key) {
                report.unknown.push(key.clone());
                continue;
            }
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value.clone());
            if serde_json::from_value::<Self>(Value::Object(candidate)).is_ok() {
                merged.insert(key.clone(), value.clone());
                if !is_blank(value) {
                    report.applied.push(key.clone());
                }
            } else {
                report.rejected.push(key.clone());
            }
        }

        if let Ok(draft) = serde_json::from_value(Value::Object(merged)) {
            *self = draft;
        }
        report
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
