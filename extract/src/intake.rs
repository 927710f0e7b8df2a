//! Intake of uploaded floor-plan images.

use image::ImageFormat;

use crate::error::ExtractionError;

/// Formats accepted for analysis.
const SUPPORTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// A raster image that has been checked to decode.
///
/// Only the original encoded bytes are kept; the decoded pixels are dropped
/// once the dimensions are known.
#[derive(Debug, Clone)]
pub struct FloorPlanImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl FloorPlanImage {
    /// Detects the format of `bytes` and verifies that they decode.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidImage`] for empty input, an unknown
    /// or unsupported format, or data that fails to decode.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::InvalidImage(
                "No image file provided".to_string(),
            ));
        }

        let format = image::guess_format(&bytes).map_err(|e| {
            ExtractionError::InvalidImage(format!("Failed to open the image file: {e}"))
        })?;

        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(ExtractionError::InvalidImage(format!(
                "Unsupported image format {format:?}; expected PNG, JPEG or WebP"
            )));
        }

        let decoded = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
            ExtractionError::InvalidImage(format!("Failed to open the image file: {e}"))
        })?;

        tracing::debug!(
            ?format,
            width = decoded.width(),
            height = decoded.height(),
            bytes = bytes.len(),
            "Decoded floor plan image"
        );

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            format,
        })
    }

    /// The original encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// IANA media type of the encoding, e.g. `image/png`.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Detected encoding.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}
