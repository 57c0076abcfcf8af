//! Storefront presentation choices: colors, font families and text sizes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string is not a `#rrggbb` color.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}', expected #rrggbb")]
pub struct ColorError(pub String);

/// An sRGB color written as `#rrggbb`.
///
/// Palette swatches and the free-form color picker both produce this type,
/// so a draft can never hold a malformed color. Display output is always
/// lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] for any other shape.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let err = || ColorError(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|part| u8::from_str_radix(part, 16).ok())
                .ok_or_else(err)
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Whether this color is one of the swatches in `palette`.
    #[must_use]
    pub fn is_in(&self, palette: &[Self]) -> bool {
        palette.contains(self)
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Swatches offered for the primary (accent) color.
pub const PRIMARY_PALETTE: [HexColor; 6] = [
    HexColor::rgb(0xf9, 0x73, 0x16),
    HexColor::rgb(0x7e, 0x22, 0xce),
    HexColor::rgb(0x3b, 0x82, 0xf6),
    HexColor::rgb(0x10, 0xb9, 0x81),
    HexColor::rgb(0xef, 0x44, 0x44),
    HexColor::rgb(0xf5, 0x9e, 0x0b),
];

/// Swatches offered for the page background.
pub const BACKGROUND_PALETTE: [HexColor; 4] = [
    HexColor::rgb(0xff, 0xff, 0xff),
    HexColor::rgb(0xf9, 0xfa, 0xfb),
    HexColor::rgb(0xfe, 0xf3, 0xc7),
    HexColor::rgb(0xe0, 0xe7, 0xff),
];

/// Storefront font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Inter,
    Poppins,
    Roboto,
    Montserrat,
}

impl FontFamily {
    pub const ALL: [Self; 4] = [Self::Inter, Self::Poppins, Self::Roboto, Self::Montserrat];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Poppins => "Poppins",
            Self::Roboto => "Roboto",
            Self::Montserrat => "Montserrat",
        }
    }

    /// Label shown next to the font sample in the editor.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inter => "Inter (Moderna)",
            Self::Poppins => "Poppins (Redondeada)",
            Self::Roboto => "Roboto (Clásica)",
            Self::Montserrat => "Montserrat (Elegante)",
        }
    }

    /// CSS `font-family` value with a generic fallback.
    #[must_use]
    pub fn css_stack(self) -> String {
        format!("'{}', sans-serif", self.name())
    }
}

impl std::str::FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid font family: {s}"))
    }
}

/// Base text size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Pequeño",
            Self::Medium => "Mediano",
            Self::Large => "Grande",
        }
    }

    /// Root font size applied to the preview, in pixels.
    #[must_use]
    pub const fn base_px(self) -> u8 {
        match self {
            Self::Small => 14,
            Self::Medium => 16,
            Self::Large => 18,
        }
    }
}

impl std::str::FromStr for TextSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(format!("invalid text size: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_normalizes_case() {
        let c = HexColor::parse("#F97316").unwrap();
        assert_eq!(c.to_string(), "#f97316");
        assert_eq!(c, PRIMARY_PALETTE[0]);
    }

    #[test]
    fn test_hex_parse_rejects_bad_shapes() {
        for bad in ["f97316", "#fff", "#f9731", "#f97316aa", "#gg0000", ""] {
            assert!(HexColor::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_palette_membership() {
        let custom = HexColor::parse("#123456").unwrap();
        assert!(!custom.is_in(&PRIMARY_PALETTE));
        assert!(HexColor::parse("#fef3c7").unwrap().is_in(&BACKGROUND_PALETTE));
    }

    #[test]
    fn test_palettes_display_as_expected() {
        let primary: Vec<String> = PRIMARY_PALETTE.iter().map(ToString::to_string).collect();
        assert_eq!(
            primary,
            ["#f97316", "#7e22ce", "#3b82f6", "#10b981", "#ef4444", "#f59e0b"]
        );
    }

    #[test]
    fn test_font_family_wire_names() {
        assert_eq!(serde_json::to_string(&FontFamily::Montserrat).unwrap(), "\"Montserrat\"");
        assert_eq!("poppins".parse::<FontFamily>().unwrap(), FontFamily::Poppins);
        assert_eq!(FontFamily::Roboto.css_stack(), "'Roboto', sans-serif");
    }

    #[test]
    fn test_text_size_wire_names() {
        assert_eq!(serde_json::to_string(&TextSize::Large).unwrap(), "\"large\"");
        assert_eq!("small".parse::<TextSize>().unwrap(), TextSize::Small);
        assert!("huge".parse::<TextSize>().is_err());
    }
}
