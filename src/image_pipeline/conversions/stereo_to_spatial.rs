use tracing::{debug, info, instrument};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::image_pipeline::{
    common::{config::ConversionConfig, error::{ConversionError, Result}},
    container::{SpatialContainerWriter, StereoPairEntries, TiffContainerWriter},
    decode::{ImageReader, PixelImage, StandardImageReader},
    geometry::{assemble_metadata, build_intrinsics, StereoMetadata, LEFT_IMAGE_INDEX, RIGHT_IMAGE_INDEX},
};

/// Converts a left/right photo pair into one spatial container.
///
/// A run goes through decode left, decode right, build metadata, create
/// container, append left, append right, finalize, strictly in that order.
/// The first failure ends the run.
pub struct StereoToSpatialPipeline<R: ImageReader, W: SpatialContainerWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl StereoToSpatialPipeline<StandardImageReader, TiffContainerWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: StandardImageReader,
            writer: TiffContainerWriter,
            config,
        }
    }
}

impl<R: ImageReader, W: SpatialContainerWriter> StereoToSpatialPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn decode(&self, side: &'static str, data: &[u8]) -> Result<PixelImage> {
        let span = if side == "left" {
            tracing::info_span!("decode_left")
        } else {
            tracing::info_span!("decode_right")
        };
        let _span = span.entered();
        let image = self.reader.read_image(data).map_err(|e| match e {
            ConversionError::ImageLoadError(reason) => {
                ConversionError::ImageLoadError(format!("({} view): {}", side, reason))
            }
            other => other,
        })?;
        debug!(width = image.width, height = image.height, "{} view decoded", side);
        Ok(image)
    }

    fn build_metadata(&self, left: &PixelImage, right: &PixelImage) -> Result<StereoMetadata> {
        let _span = tracing::info_span!("build_metadata", hfov = self.config.hfov_degrees).entered();

        let left_intrinsics = build_intrinsics(left.width, left.height, self.config.hfov_degrees)?;
        let right_intrinsics = build_intrinsics(right.width, right.height, self.config.hfov_degrees)?;

        // Indices must match the order the writer appends the images in
        Ok(assemble_metadata(
            left_intrinsics,
            right_intrinsics,
            LEFT_IMAGE_INDEX,
            RIGHT_IMAGE_INDEX,
        ))
    }

    fn decode_pair(&self, left_data: &[u8], right_data: &[u8]) -> Result<(PixelImage, PixelImage, StereoMetadata)> {
        let left = self.decode("left", left_data)?;
        let right = self.decode("right", right_data)?;
        let metadata = self.build_metadata(&left, &right)?;
        Ok((left, right, metadata))
    }

    fn write_container(
        &self,
        left: &PixelImage,
        right: &PixelImage,
        metadata: &StereoMetadata,
        output: &mut dyn Write,
    ) -> Result<()> {
        let _span = tracing::info_span!("write_container").entered();
        let pair = StereoPairEntries::new(left, right, metadata);
        self.writer.write_pair(&pair, output, &self.config)
    }

    /// Runs the whole conversion against in-memory inputs and an arbitrary sink.
    #[instrument(skip_all, fields(left_size = left_data.len(), right_size = right_data.len()))]
    pub fn convert(&self, left_data: &[u8], right_data: &[u8], output: &mut dyn Write) -> Result<StereoMetadata> {
        info!("Starting stereo to spatial conversion");

        let (left, right, metadata) = self.decode_pair(left_data, right_data)?;
        self.write_container(&left, &right, &metadata, output)?;

        info!(
            left = %format!("{}x{}", left.width, left.height),
            right = %format!("{}x{}", right.width, right.height),
            "Conversion complete"
        );
        Ok(metadata)
    }

    /// Converts two files on disk into a container at `output_path`.
    ///
    /// The container is written to a temporary file next to the destination
    /// and renamed over it only once complete, so a failed run never leaves a
    /// file at `output_path`.
    #[instrument(skip_all)]
    pub fn convert_files<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        left_path: P,
        right_path: Q,
        output_path: O,
    ) -> Result<StereoMetadata> {
        let left_path = left_path.as_ref();
        let right_path = right_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            left = %left_path.display(),
            right = %right_path.display(),
            output = %output_path.display(),
            "Converting files"
        );

        let (left, right, metadata) = {
            let left_data = read_input(left_path)?;
            let right_data = read_input(right_path)?;

            let left = self.decode("left", &left_data)
                .map_err(|e| with_path(e, left_path))?;
            let right = self.decode("right", &right_data)
                .map_err(|e| with_path(e, right_path))?;
            let metadata = self.build_metadata(&left, &right)?;
            (left, right, metadata)
        };

        let mut staging = {
            let _span = tracing::info_span!("create_container").entered();
            create_staging_file(output_path)?
        };
        debug!(staging = %staging.path().display(), "Staging container");

        self.write_container(&left, &right, &metadata, staging.as_file_mut())?;

        {
            let _span = tracing::info_span!("finalize_container").entered();
            let finalize_error = |e: std::io::Error| {
                ConversionError::ContainerWriteError(format!("{}: {}", output_path.display(), e))
            };
            staging.as_file_mut().flush().map_err(finalize_error)?;
            staging.as_file().sync_all().map_err(finalize_error)?;
            staging.persist(output_path).map_err(|e| finalize_error(e.error))?;
        }

        info!(output = %output_path.display(), "Spatial image written");
        Ok(metadata)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file", path = %path.display()).entered();
    std::fs::read(path).map_err(|e| {
        ConversionError::ImageLoadError(format!("{}: {}", path.display(), e))
    })
}

fn with_path(error: ConversionError, path: &Path) -> ConversionError {
    match error {
        ConversionError::ImageLoadError(reason) => {
            ConversionError::ImageLoadError(format!("{} {}", path.display(), reason))
        }
        other => other,
    }
}

/// Temporary file in the destination directory, so the final rename never
/// crosses a filesystem boundary. Removed on drop unless persisted.
fn create_staging_file(output_path: &Path) -> Result<NamedTempFile> {
    if output_path.is_dir() {
        return Err(ConversionError::ContainerCreateError(format!(
            "{}: is a directory",
            output_path.display()
        )));
    }

    let directory = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    tempfile::Builder::new()
        .prefix(".spatial-")
        .suffix(".tmp")
        .tempfile_in(directory)
        .map_err(|e| ConversionError::ContainerCreateError(format!("{}: {}", output_path.display(), e)))
}
