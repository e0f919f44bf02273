//! Container input types

use crate::image_pipeline::decode::PixelImage;
use crate::image_pipeline::geometry::{PerImageMetadata, StereoMetadata};

/// Number of images in every spatial container.
pub const PAIR_IMAGE_COUNT: usize = 2;

/// One image and the metadata written next to it
#[derive(Debug, Clone, Copy)]
pub struct ContainerEntry<'a> {
    pub image: &'a PixelImage,
    pub metadata: &'a PerImageMetadata,
}

/// The two entries of a container, in the only order they may be appended.
#[derive(Debug, Clone, Copy)]
pub struct StereoPairEntries<'a> {
    pub left: ContainerEntry<'a>,
    pub right: ContainerEntry<'a>,
}

impl<'a> StereoPairEntries<'a> {
    pub fn new(left: &'a PixelImage, right: &'a PixelImage, metadata: &'a StereoMetadata) -> Self {
        Self {
            left: ContainerEntry { image: left, metadata: &metadata.left },
            right: ContainerEntry { image: right, metadata: &metadata.right },
        }
    }

    /// Left first: the group descriptor refers to images by position only.
    pub fn in_append_order(&self) -> [ContainerEntry<'a>; PAIR_IMAGE_COUNT] {
        [self.left, self.right]
    }
}
