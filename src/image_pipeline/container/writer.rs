use std::io::Write;
use crate::image_pipeline::common::config::ConversionConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::container::types::StereoPairEntries;

/// Encodes both views of a pair into one container.
///
/// Implementations append `pair.left` then `pair.right` and finish the file
/// before returning. A failure to initialise the container is reported as
/// `ContainerCreateError`, anything later as `ContainerWriteError`.
pub trait SpatialContainerWriter {
    fn write_pair(&self, pair: &StereoPairEntries<'_>, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
