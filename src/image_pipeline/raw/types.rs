//! RAW image data types

/// Colour filter array layout of a Bayer sensor, named by its top-left 2x2 tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfaPattern {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl CfaPattern {
    /// Parses the tile name reported by the RAW decoder (e.g. "RGGB").
    /// Patterns larger than 2x2 (X-Trans) are not Bayer and yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "RGGB" => Some(CfaPattern::Rggb),
            "BGGR" => Some(CfaPattern::Bggr),
            "GRBG" => Some(CfaPattern::Grbg),
            "GBRG" => Some(CfaPattern::Gbrg),
            _ => None,
        }
    }
}

/// Represents a decoded single-channel sensor mosaic
#[derive(Debug, Clone)]
pub struct RawMosaic {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Raw pixel data (single channel Bayer pattern)
    pub data: Vec<u16>,
    /// Filter layout of the sensor
    pub cfa: CfaPattern,
    /// Sensor value that corresponds to no light
    pub black_level: u16,
    /// Sensor value at saturation
    pub white_level: u16,
    /// White balance multipliers for R, G, B
    pub wb_coeffs: [f32; 3],
}
