use tracing::{debug, info};
use std::io::Cursor;
use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::decode::{PixelData, PixelImage};
use crate::image_pipeline::raw::{CfaPattern, RawMosaic};

pub struct CpuDebayer;

impl From<CfaPattern> for CFA {
    fn from(pattern: CfaPattern) -> Self {
        match pattern {
            CfaPattern::Rggb => CFA::RGGB,
            CfaPattern::Bggr => CFA::BGGR,
            CfaPattern::Grbg => CFA::GRBG,
            CfaPattern::Gbrg => CFA::GBRG,
        }
    }
}

impl CpuDebayer {
    /// Demosaics a sensor mosaic into 16-bit RGB.
    ///
    /// Black level is subtracted, the result normalized to the white level and
    /// scaled by the white balance gains. No camera colour matrix is applied.
    pub fn process(&self, mosaic: &RawMosaic) -> Result<PixelImage> {
        let width = mosaic.width;
        let height = mosaic.height;
        info!("Starting CPU debayering for image {}x{}", width, height);

        if mosaic.data.len() != width * height {
            return Err(ConversionError::ImageLoadError(format!(
                "RAW mosaic holds {} samples, expected {}",
                mosaic.data.len(),
                width * height
            )));
        }

        let bayer_bytes: Vec<u8> = mosaic.data.iter()
            .flat_map(|&val| val.to_le_bytes())
            .collect();

        let mut output_buf = vec![0u8; width * height * 3 * 2];
        let mut cursor = Cursor::new(&bayer_bytes[..]);

        debug!("Running demosaic with CFA={:?}, algo=Linear", mosaic.cfa);

        {
            let mut output_raster = RasterMut::new(
                width,
                height,
                RasterDepth::Depth16,
                &mut output_buf,
            );

            bayer::run_demosaic(
                &mut cursor,
                BayerDepth::Depth16LE,
                mosaic.cfa.into(),
                Demosaic::Linear,
                &mut output_raster,
            ).map_err(|e| ConversionError::ImageLoadError(format!("demosaic failed: {:?}", e)))?;
        }

        let black_level = mosaic.black_level as f32;
        let white_level = mosaic.white_level as f32;
        let range = (white_level - black_level).max(1.0);
        let [wb_r, wb_g, wb_b] = mosaic.wb_coeffs;

        // Raster rows are written as native-endian u16
        let rgb_data: Vec<u16> = output_buf.chunks_exact(6)
            .flat_map(|pixel_bytes| {
                let r_raw = u16::from_ne_bytes([pixel_bytes[0], pixel_bytes[1]]) as f32;
                let g_raw = u16::from_ne_bytes([pixel_bytes[2], pixel_bytes[3]]) as f32;
                let b_raw = u16::from_ne_bytes([pixel_bytes[4], pixel_bytes[5]]) as f32;

                let r_lin = ((r_raw - black_level).max(0.0) / range) * wb_r;
                let g_lin = ((g_raw - black_level).max(0.0) / range) * wb_g;
                let b_lin = ((b_raw - black_level).max(0.0) / range) * wb_b;

                [
                    (r_lin * 65535.0).clamp(0.0, 65535.0) as u16,
                    (g_lin * 65535.0).clamp(0.0, 65535.0) as u16,
                    (b_lin * 65535.0).clamp(0.0, 65535.0) as u16,
                ]
            })
            .collect();

        Ok(PixelImage {
            width,
            height,
            data: PixelData::Rgb16(rgb_data),
        })
    }
}
