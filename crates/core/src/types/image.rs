//! Images embedded in drafts as `data:` URLs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Errors that can occur when encoding or accepting an image.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image is empty")]
    Empty,
    #[error("image is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("not an image data URL or http(s) URL")]
    InvalidReference,
}

/// Raster formats accepted for logos and storefront media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detect the format from the file's leading bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, ..] => Some(Self::Png),
            [0xff, 0xd8, 0xff, ..] => Some(Self::Jpeg),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

/// An image reference stored in a draft.
///
/// Locally ingested files become `data:<mime>;base64,<payload>` URLs. Records
/// coming back from the negocios service may also carry plain `http(s)` URLs,
/// which are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Default upload limit (5 MiB).
    pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

    /// Encode raw file bytes as a data URL.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if the bytes are empty, larger than
    /// `max_bytes`, or not a supported raster format.
    pub fn encode(bytes: &[u8], max_bytes: usize) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > max_bytes {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                max: max_bytes,
            });
        }
        let format = ImageFormat::sniff(bytes).ok_or(ImageError::UnsupportedFormat)?;
        Ok(Self(format!(
            "data:{};base64,{}",
            format.mime(),
            STANDARD.encode(bytes)
        )))
    }

    /// Accept an existing reference (data URL or http(s) URL).
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidReference`] for anything else.
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        let s = s.trim();
        let ok = s.starts_with("data:image/")
            || s.starts_with("https://")
            || s.starts_with("http://");
        if ok {
            Ok(Self(s.to_owned()))
        } else {
            Err(ImageError::InvalidReference)
        }
    }

    /// MIME type of an embedded image; `None` for remote URLs.
    #[must_use]
    pub fn mime(&self) -> Option<&str> {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EncodedImage> for String {
    fn from(image: EncodedImage) -> Self {
        image.0
    }
}
