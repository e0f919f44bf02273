//! Serialized form of [`PerImageMetadata`].
//!
//! Key names and nesting follow the image property dictionary read by
//! spatial-photo viewers:
//!
//! ```text
//! {
//!   "Groups": { "GroupIndex", "GroupType", "GroupImageIndexLeft", "GroupImageIndexRight" },
//!   "{HEIF}": {
//!     "CameraModel": { "Intrinsics": [9 x f64, row-major] },
//!     "CameraExtrinsics": { "CoordinateSystemID", "Position": [3 x f64], "Rotation": [9 x f64, row-major] }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::image_pipeline::geometry::metadata::{GroupType, PerImageMetadata};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProperties {
    #[serde(rename = "Groups")]
    pub groups: GroupProperties,
    #[serde(rename = "{HEIF}")]
    pub heif: HeifProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProperties {
    #[serde(rename = "GroupIndex")]
    pub group_index: u32,
    #[serde(rename = "GroupType")]
    pub group_type: GroupType,
    #[serde(rename = "GroupImageIndexLeft")]
    pub left_image_index: u32,
    #[serde(rename = "GroupImageIndexRight")]
    pub right_image_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeifProperties {
    #[serde(rename = "CameraModel")]
    pub camera_model: CameraModelProperties,
    #[serde(rename = "CameraExtrinsics")]
    pub camera_extrinsics: CameraExtrinsicsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraModelProperties {
    #[serde(rename = "Intrinsics")]
    pub intrinsics: [f64; 9],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraExtrinsicsProperties {
    #[serde(rename = "CoordinateSystemID")]
    pub coordinate_system_id: u32,
    #[serde(rename = "Position")]
    pub position: [f64; 3],
    #[serde(rename = "Rotation")]
    pub rotation: [f64; 9],
}

impl From<&PerImageMetadata> for ImageProperties {
    fn from(metadata: &PerImageMetadata) -> Self {
        let group = &metadata.group;
        let extrinsics = &metadata.camera_extrinsics;
        Self {
            groups: GroupProperties {
                group_index: group.group_index,
                group_type: group.group_type,
                left_image_index: group.left_image_index,
                right_image_index: group.right_image_index,
            },
            heif: HeifProperties {
                camera_model: CameraModelProperties {
                    intrinsics: metadata.camera_intrinsics.to_row_major(),
                },
                camera_extrinsics: CameraExtrinsicsProperties {
                    coordinate_system_id: extrinsics.coordinate_system_id,
                    position: extrinsics.position_array(),
                    rotation: extrinsics.rotation_row_major(),
                },
            },
        }
    }
}

impl ImageProperties {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
