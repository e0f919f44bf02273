//! Pipeline conversions module
//!
//! This module contains the orchestration logic that turns a left/right photo
//! pair into a spatial container.

mod stereo_to_spatial;


pub use stereo_to_spatial::StereoToSpatialPipeline;
