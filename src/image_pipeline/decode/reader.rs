use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::decode::types::PixelImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<PixelImage>;
}
