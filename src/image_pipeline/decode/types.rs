//! Decoded image types

/// Interleaved RGB samples [R, G, B, R, G, B, ...]
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    Rgb8(Vec<u8>),
    Rgb16(Vec<u16>),
}

impl PixelData {
    pub fn len(&self) -> usize {
        match self {
            PixelData::Rgb8(samples) => samples.len(),
            PixelData::Rgb16(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bits_per_sample(&self) -> u32 {
        match self {
            PixelData::Rgb8(_) => 8,
            PixelData::Rgb16(_) => 16,
        }
    }
}

/// A decoded raster ready to be placed in a container
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data
    pub data: PixelData,
}
