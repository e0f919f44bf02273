//! Image decoding module
//!
//! This module turns encoded image bytes into RGB rasters, sniffing the
//! content to choose between common formats and camera RAW files.

mod reader;
mod image_crate_reader;
mod standard_reader;
pub mod types;

pub use reader::ImageReader;
pub use image_crate_reader::ImageCrateReader;
pub use standard_reader::StandardImageReader;
pub use types::{PixelData, PixelImage};
