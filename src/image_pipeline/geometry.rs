//! Camera geometry module
//!
//! Builds the pinhole intrinsics and canonical extrinsics for each view and
//! assembles them, together with the stereo-pair group, into the per-image
//! metadata records written alongside the pixels.

pub mod extrinsics;
pub mod intrinsics;
pub mod metadata;
pub mod properties;

pub use extrinsics::{CameraExtrinsics, canonical_extrinsics, CANONICAL_COORDINATE_SYSTEM_ID};
pub use intrinsics::{build_intrinsics, CameraIntrinsics};
pub use metadata::{
    assemble_metadata, GroupType, PerImageMetadata, StereoGroupDescriptor, StereoMetadata,
    LEFT_IMAGE_INDEX, RIGHT_IMAGE_INDEX,
};
pub use properties::ImageProperties;
