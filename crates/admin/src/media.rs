//! Image ingestion: read a local file and embed it as a data URL.

use std::path::Path;

use acaclick_core::{EncodedImage, ImageError};
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur while ingesting an image.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The file could not be read.
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is empty, too large or not a supported image.
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl MediaError {
    /// Text to show the operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Read { .. } => "No se pudo leer la imagen".to_owned(),
            Self::Image(ImageError::TooLarge { max, .. }) => {
                format!("La imagen supera el tamaño máximo de {} MB", max / (1024 * 1024))
            }
            Self::Image(ImageError::Empty) => "La imagen está vacía".to_owned(),
            Self::Image(ImageError::UnsupportedFormat | ImageError::InvalidReference) => {
                "Formato de imagen no soportado (usa PNG, JPG, GIF o WEBP)".to_owned()
            }
        }
    }
}

/// Reads images from disk with a size limit.
#[derive(Debug, Clone, Copy)]
pub struct MediaIngestor {
    max_bytes: usize,
}

impl Default for MediaIngestor {
    fn default() -> Self {
        Self::new(EncodedImage::DEFAULT_MAX_BYTES)
    }
}

impl MediaIngestor {
    #[must_use]
    pub const fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Read `path` and encode it as a `data:` URL.
    ///
    /// The size is checked against file metadata first so oversized files
    /// are rejected without being read.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError`] if the file cannot be read or is not an
    /// acceptable image.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest(&self, path: &Path) -> Result<EncodedImage, MediaError> {
        let read_err = |source| MediaError::Read {
            path: path.display().to_string(),
            source,
        };

        let metadata = tokio::fs::metadata(path).await.map_err(read_err)?;
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.max_bytes {
            return Err(ImageError::TooLarge {
                size,
                max: self.max_bytes,
            }
            .into());
        }

        let bytes = tokio::fs::read(path).await.map_err(read_err)?;
        let image = EncodedImage::encode(&bytes, self.max_bytes)?;
        tracing::debug!(bytes = bytes.len(), mime = image.mime(), "Image ingested");
        Ok(image)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PNG: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

    fn temp_file(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "acaclick-media-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_ingest_png() {
        let path = temp_file("logo.png", &PNG);
        let image = MediaIngestor::default().ingest(&path).await.unwrap();
        assert_eq!(image.mime(), Some("image/png"));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_ingest_rejects_oversized_file() {
        let path = temp_file("big.png", &PNG);
        let err = MediaIngestor::new(4).ingest(&path).await.unwrap_err();
        assert!(matches!(
            err,
            MediaError::Image(ImageError::TooLarge { size: 12, max: 4 })
        ));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_ingest_missing_file() {
        let err = MediaIngestor::default()
            .ingest(Path::new("/nonexistent/acaclick/logo.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Read { .. }));
        assert_eq!(err.user_message(), "No se pudo leer la imagen");
    }

    #[tokio::test]
    async fn test_ingest_rejects_non_image() {
        let path = temp_file("notes.txt", b"hola mundo");
        let err = MediaIngestor::default().ingest(&path).await.unwrap_err();
        assert!(matches!(err, MediaError::Image(ImageError::UnsupportedFormat)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_too_large_message_in_megabytes() {
        let err = MediaError::Image(ImageError::TooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        });
        assert_eq!(err.user_message(), "La imagen supera el tamaño máximo de 5 MB");
    }
}
