use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::decode::image_crate_reader::ImageCrateReader;
use crate::image_pipeline::decode::reader::ImageReader;
use crate::image_pipeline::decode::types::PixelImage;
use crate::image_pipeline::raw::RawLoaderReader;

/// Default reader: common formats through the `image` crate, anything else
/// is handed to the camera RAW decoder.
pub struct StandardImageReader;

impl ImageReader for StandardImageReader {
    fn read_image(&self, data: &[u8]) -> Result<PixelImage> {
        if data.is_empty() {
            return Err(ConversionError::ImageLoadError("file is empty".to_string()));
        }

        if ImageCrateReader::recognizes(data) {
            ImageCrateReader.read_image(data)
        } else {
            debug!("No interchange format signature, trying RAW decoder");
            RawLoaderReader.read_image(data)
        }
    }
}
