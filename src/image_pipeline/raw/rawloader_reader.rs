//! RAW image reader implementation using the rawloader library.
//!
//! This module provides support for reading various RAW image formats (ARW, CR2, NEF, DNG, etc.)
//! using the rawloader library. Bayer data is handed to the CPU debayer so that
//! the caller always receives 16-bit RGB.

use std::io::Cursor;

use tracing::debug;
use rawloader::RawImageData as RawloaderImageData;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::debayer::CpuDebayer;
use crate::image_pipeline::decode::{ImageReader, PixelData, PixelImage};
use crate::image_pipeline::raw::types::{CfaPattern, RawMosaic};

/// RAW image reader that uses the rawloader library for decoding.
///
/// This reader supports any RAW format that rawloader can decode, including but not limited to:
/// - Sony ARW
/// - Fujifilm RAF
/// - Adobe DNG
pub struct RawLoaderReader;

/// Convert RAW samples to u16.
/// Integer data is cast directly, float data (normalized 0.0-1.0) is scaled to u16 range
fn samples_to_u16(data: RawloaderImageData) -> Vec<u16> {
    match data {
        RawloaderImageData::Integer(values) => values,
        RawloaderImageData::Float(values) => values
            .iter()
            .map(|&v| (v * u16::MAX as f32).clamp(0.0, u16::MAX as f32) as u16)
            .collect(),
    }
}

/// Message for bytes no decoder accepts. rawloader's own errors carry panic
/// text and a bug-report URL, so they are only logged.
const UNRECOGNISED_INPUT: &str = "not a recognised image or RAW file";

/// Runs rawloader with the panic hook silenced. rawloader catches panics
/// inside its decoders, but the default hook would still print them.
fn decode_quietly(data: &[u8]) -> std::result::Result<rawloader::RawImage, String> {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let result = rawloader::decode(&mut Cursor::new(data));
    std::panic::set_hook(previous_hook);
    result.map_err(|e| format!("{:?}", e))
}

/// Normalizes white balance to green = 1. Missing or NaN coefficients
/// (rawloader reports NaN when the file has none) fall back to neutral.
fn normalized_wb(wb_coeffs: [f32; 4]) -> [f32; 3] {
    let [r, g, b, _] = wb_coeffs;
    if !(r.is_finite() && g.is_finite() && b.is_finite()) || g <= 0.0 {
        return [1.0, 1.0, 1.0];
    }
    [r / g, 1.0, b / g]
}

impl ImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// Single-component files go through [`CpuDebayer`]; files that already
    /// carry three components per pixel (linear DNG) are passed through.
    fn read_image(&self, data: &[u8]) -> Result<PixelImage> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = decode_quietly(data).map_err(|e| {
            debug!("rawloader rejected input: {}", e);
            ConversionError::ImageLoadError(UNRECOGNISED_INPUT.to_string())
        })?;

        let width = decoded.width;
        let height = decoded.height;
        if width == 0 || height == 0 {
            return Err(ConversionError::ImageLoadError(format!(
                "decoded raster is empty ({}x{})",
                width, height
            )));
        }

        debug!("Decoded RAW image: {}x{}, {} component(s)", width, height, decoded.cpp);

        let samples = samples_to_u16(decoded.data);

        if decoded.cpp == 3 {
            return Ok(PixelImage {
                width,
                height,
                data: PixelData::Rgb16(samples),
            });
        }

        if decoded.cpp != 1 {
            return Err(ConversionError::ImageLoadError(format!(
                "unsupported RAW layout with {} components per pixel",
                decoded.cpp
            )));
        }

        let cfa = CfaPattern::from_name(&decoded.cfa.name).ok_or_else(|| {
            ConversionError::ImageLoadError(format!(
                "unsupported colour filter array {}",
                decoded.cfa.name
            ))
        })?;

        let mosaic = RawMosaic {
            width,
            height,
            data: samples,
            cfa,
            black_level: decoded.blacklevels[0],
            white_level: decoded.whitelevels[0],
            wb_coeffs: normalized_wb(decoded.wb_coeffs),
        };

        CpuDebayer.process(&mosaic)
    }
}
