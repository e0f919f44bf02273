//! Image processing pipeline module
//!
//! This module provides a structured approach to building spatial photos,
//! with separate modules for decoding, camera geometry, container writing,
//! and conversion orchestration.

pub mod common;
pub mod container;
pub mod conversions;
pub mod debayer;
pub mod decode;
pub mod geometry;
pub mod raw;

pub use common::{
    ContainerCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionError,
    DEFAULT_HFOV_DEGREES,
    Result,
};

pub use decode::{
    ImageCrateReader,
    ImageReader,
    PixelData,
    PixelImage,
    StandardImageReader,
};

pub use raw::RawLoaderReader;

pub use geometry::{
    assemble_metadata,
    build_intrinsics,
    canonical_extrinsics,
    CameraExtrinsics,
    CameraIntrinsics,
    ImageProperties,
    PerImageMetadata,
    StereoGroupDescriptor,
    StereoMetadata,
};

pub use container::{
    SpatialContainerWriter,
    StereoPairEntries,
    TiffContainerWriter,
};

pub use conversions::StereoToSpatialPipeline;
