use std::io::{Cursor, Seek, Write};
use tracing::debug;
use tiff::encoder::{colortype, Compression, TiffEncoder, TiffValue};
use tiff::encoder::colortype::ColorType;
use tiff::encoder::compression::DeflateLevel;
use tiff::tags::{Predictor, Tag};
use crate::image_pipeline::common::config::{ContainerCompression, ConversionConfig};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::container::types::{ContainerEntry, StereoPairEntries, PAIR_IMAGE_COUNT};
use crate::image_pipeline::container::writer::SpatialContainerWriter;
use crate::image_pipeline::decode::PixelData;

/// TIFF `PageNumber` tag: `[page index, page count]`.
pub const PAGE_NUMBER_TAG: u16 = 297;

/// Writes the pair as a two-page TIFF.
///
/// Page 0 holds the left view and page 1 the right view. Each page stores its
/// metadata as JSON in `ImageDescription` and its position in `PageNumber`.
/// The file is assembled in memory and written to `output` in one piece.
pub struct TiffContainerWriter;

fn compression_for(compression: ContainerCompression) -> Compression {
    match compression {
        ContainerCompression::None => Compression::Uncompressed,
        ContainerCompression::Lzw => Compression::Lzw,
        ContainerCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        ContainerCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        ContainerCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    }
}

fn write_error(page_index: usize, e: impl std::fmt::Display) -> ConversionError {
    ConversionError::ContainerWriteError(format!("page {}: {}", page_index, e))
}

fn write_page<C, W>(
    encoder: &mut TiffEncoder<W>,
    entry: &ContainerEntry<'_>,
    samples: &[C::Inner],
    page_index: usize,
) -> Result<()>
where
    C: ColorType,
    W: Write + Seek,
    [C::Inner]: TiffValue,
{
    let description = entry
        .metadata
        .properties()
        .to_json()
        .map_err(|e| write_error(page_index, e))?;

    let mut image = encoder
        .new_image::<C>(entry.image.width as u32, entry.image.height as u32)
        .map_err(|e| write_error(page_index, e))?;

    image
        .encoder()
        .write_tag(Tag::ImageDescription, description.as_str())
        .map_err(|e| write_error(page_index, e))?;
    image
        .encoder()
        .write_tag(
            Tag::from_u16_exhaustive(PAGE_NUMBER_TAG),
            &[page_index as u16, PAIR_IMAGE_COUNT as u16][..],
        )
        .map_err(|e| write_error(page_index, e))?;

    image.write_data(samples).map_err(|e| write_error(page_index, e))
}

impl SpatialContainerWriter for TiffContainerWriter {
    fn write_pair(&self, pair: &StereoPairEntries<'_>, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        let mut buffer = Vec::new();

        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::ContainerCreateError(e.to_string()))?
                .with_compression(compression_for(config.compression));

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            for (page_index, entry) in pair.in_append_order().iter().enumerate() {
                debug!(
                    "Encoding page {}: {}x{}, {}-bit RGB",
                    page_index,
                    entry.image.width,
                    entry.image.height,
                    entry.image.data.bits_per_sample()
                );

                match &entry.image.data {
                    PixelData::Rgb8(samples) => {
                        write_page::<colortype::RGB8, _>(&mut encoder, entry, samples, page_index)?
                    }
                    PixelData::Rgb16(samples) => {
                        write_page::<colortype::RGB16, _>(&mut encoder, entry, samples, page_index)?
                    }
                }
            }
        }

        output
            .write_all(&buffer)
            .map_err(|e| ConversionError::ContainerWriteError(e.to_string()))?;

        debug!("Container encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
