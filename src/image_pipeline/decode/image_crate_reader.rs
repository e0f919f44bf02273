//! Reader for the common interchange formats (JPEG, PNG, TIFF, WebP, ...)
//! backed by the `image` crate.

use image::{ColorType, DynamicImage};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::decode::reader::ImageReader;
use crate::image_pipeline::decode::types::{PixelData, PixelImage};

/// Decodes anything the `image` crate can identify from the bytes themselves.
///
/// Sources with more than 8 bits per channel (16-bit PNG/TIFF, float EXR/HDR)
/// are kept at 16 bits; everything else is stored as 8-bit RGB. Alpha is dropped.
pub struct ImageCrateReader;

impl ImageCrateReader {
    /// Whether the bytes carry a signature the `image` crate recognises.
    pub fn recognizes(data: &[u8]) -> bool {
        image::guess_format(data).is_ok()
    }
}

fn is_high_bit_depth(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L16
            | ColorType::La16
            | ColorType::Rgb16
            | ColorType::Rgba16
            | ColorType::Rgb32F
            | ColorType::Rgba32F
    )
}

impl ImageReader for ImageCrateReader {
    fn read_image(&self, data: &[u8]) -> Result<PixelImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded: DynamicImage = image::load_from_memory(data)
            .map_err(|e| ConversionError::ImageLoadError(e.to_string()))?;

        let width = decoded.width() as usize;
        let height = decoded.height() as usize;
        if width == 0 || height == 0 {
            return Err(ConversionError::ImageLoadError(format!(
                "decoded raster is empty ({}x{})",
                width, height
            )));
        }

        let source_color = decoded.color();
        let data = if is_high_bit_depth(source_color) {
            PixelData::Rgb16(decoded.into_rgb16().into_raw())
        } else {
            PixelData::Rgb8(decoded.into_rgb8().into_raw())
        };

        debug!(
            "Decoded image: {}x{} ({:?} -> {}-bit RGB)",
            width,
            height,
            source_color,
            data.bits_per_sample()
        );

        Ok(PixelImage { width, height, data })
    }
}
