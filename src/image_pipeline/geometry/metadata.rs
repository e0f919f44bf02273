use serde::{Deserialize, Serialize};

use crate::image_pipeline::geometry::extrinsics::CameraExtrinsics;
use crate::image_pipeline::geometry::intrinsics::CameraIntrinsics;
use crate::image_pipeline::geometry::properties::ImageProperties;

/// Container position of the left view. Images are appended in index order.
pub const LEFT_IMAGE_INDEX: u32 = 0;
/// Container position of the right view.
pub const RIGHT_IMAGE_INDEX: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupType {
    #[serde(rename = "StereoPair")]
    StereoPair,
}

/// Links two container images as the left and right views of one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StereoGroupDescriptor {
    pub group_index: u32,
    pub group_type: GroupType,
    pub left_image_index: u32,
    pub right_image_index: u32,
}

impl StereoGroupDescriptor {
    pub fn stereo_pair(left_image_index: u32, right_image_index: u32) -> Self {
        Self {
            group_index: 0,
            group_type: GroupType::StereoPair,
            left_image_index,
            right_image_index,
        }
    }
}

/// Everything written next to one image's pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PerImageMetadata {
    pub group: StereoGroupDescriptor,
    pub camera_intrinsics: CameraIntrinsics,
    pub camera_extrinsics: CameraExtrinsics,
}

impl PerImageMetadata {
    pub fn properties(&self) -> ImageProperties {
        ImageProperties::from(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StereoMetadata {
    pub left: PerImageMetadata,
    pub right: PerImageMetadata,
}

/// Combines the two views' intrinsics with a shared stereo-pair group and the
/// canonical extrinsics.
///
/// Both records carry the same group and pose; they differ only in
/// intrinsics when the two source images differ in size.
pub fn assemble_metadata(
    left_intrinsics: CameraIntrinsics,
    right_intrinsics: CameraIntrinsics,
    left_index: u32,
    right_index: u32,
) -> StereoMetadata {
    let group = StereoGroupDescriptor::stereo_pair(left_index, right_index);
    let extrinsics = CameraExtrinsics::canonical();

    StereoMetadata {
        left: PerImageMetadata {
            group,
            camera_intrinsics: left_intrinsics,
            camera_extrinsics: extrinsics,
        },
        right: PerImageMetadata {
            group,
            camera_intrinsics: right_intrinsics,
            camera_extrinsics: extrinsics,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::geometry::build_intrinsics;

    #[test]
    fn test_matching_views_share_everything() {
        let k = build_intrinsics(4000, 3000, 55.0).unwrap();
        let metadata = assemble_metadata(k, k, LEFT_IMAGE_INDEX, RIGHT_IMAGE_INDEX);

        assert_eq!(metadata.left, metadata.right);
        assert_eq!(metadata.left.group, StereoGroupDescriptor {
            group_index: 0,
            group_type: GroupType::StereoPair,
            left_image_index: 0,
            right_image_index: 1,
        });
        assert_eq!(metadata.left.camera_extrinsics, CameraExtrinsics::canonical());
    }

    #[test]
    fn test_differing_resolutions_keep_own_intrinsics() {
        let left = build_intrinsics(4000, 3000, 55.0).unwrap();
        let right = build_intrinsics(2000, 1500, 55.0).unwrap();
        let metadata = assemble_metadata(left, right, LEFT_IMAGE_INDEX, RIGHT_IMAGE_INDEX);

        assert_eq!(metadata.left.camera_intrinsics, left);
        assert_eq!(metadata.right.camera_intrinsics, right);
        assert_eq!(metadata.right.camera_intrinsics.cx(), 1000.0);
        assert_eq!(metadata.left.group, metadata.right.group);
        assert_eq!(metadata.left.camera_extrinsics, metadata.right.camera_extrinsics);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let left = build_intrinsics(1234, 567, 72.5).unwrap();
        let right = build_intrinsics(1234, 567, 72.5).unwrap();

        let first = assemble_metadata(left, right, LEFT_IMAGE_INDEX, RIGHT_IMAGE_INDEX);
        let second = assemble_metadata(left, right, LEFT_IMAGE_INDEX, RIGHT_IMAGE_INDEX);

        assert_eq!(first, second);
        assert_eq!(
            first.left.properties().to_json().unwrap(),
            second.left.properties().to_json().unwrap()
        );
        assert_eq!(
            first.right.properties().to_json().unwrap(),
            second.right.properties().to_json().unwrap()
        );
    }
}
