//! Conversion configuration types

/// Horizontal field of view assumed for both lenses when none is given.
pub const DEFAULT_HFOV_DEGREES: f64 = 55.0;

/// Compression applied to each page of the output container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Configuration for one stereo-to-spatial conversion run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Horizontal field of view of both cameras, in degrees. Must lie in (0, 180).
    pub hfov_degrees: f64,
    /// Compression method to use for the image pages
    pub compression: ContainerCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            hfov_degrees: DEFAULT_HFOV_DEGREES,
            compression: ContainerCompression::None,
            predictor: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    hfov_degrees: Option<f64>,
    compression: Option<ContainerCompression>,
    predictor: Option<Option<u16>>,
}

impl ConversionConfigBuilder {
    pub fn hfov_degrees(mut self, hfov_degrees: f64) -> Self {
        self.hfov_degrees = Some(hfov_degrees);
        self
    }

    pub fn compression(mut self, compression: ContainerCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            hfov_degrees: self.hfov_degrees.unwrap_or(default.hfov_degrees),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
