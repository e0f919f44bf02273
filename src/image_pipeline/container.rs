//! Spatial container writing module
//!
//! This module encodes a stereo pair and its per-image camera metadata into a
//! single multi-image file.

mod writer;
mod tiff_container_writer;
pub mod types;

pub use writer::SpatialContainerWriter;
pub use tiff_container_writer::{TiffContainerWriter, PAGE_NUMBER_TAG};
pub use types::{ContainerEntry, StereoPairEntries, PAIR_IMAGE_COUNT};
