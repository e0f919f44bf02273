use nalgebra::{Rotation3, Vector3};

/// Coordinate system shared by both views of a pair.
pub const CANONICAL_COORDINATE_SYSTEM_ID: u32 = 0;

/// Pose of a camera in the rig coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraExtrinsics {
    pub coordinate_system_id: u32,
    pub position: Vector3<f64>,
    pub rotation: Rotation3<f64>,
}

impl CameraExtrinsics {
    /// Both cameras co-located at the rig origin, looking down the same axis.
    /// The physical baseline between the lenses is not encoded.
    pub fn canonical() -> Self {
        Self {
            coordinate_system_id: CANONICAL_COORDINATE_SYSTEM_ID,
            position: Vector3::zeros(),
            rotation: Rotation3::identity(),
        }
    }

    pub fn position_array(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }

    /// Rotation coefficients in row-major order.
    pub fn rotation_row_major(&self) -> [f64; 9] {
        super::intrinsics::row_major(self.rotation.matrix())
    }
}

pub fn canonical_extrinsics() -> CameraExtrinsics {
    CameraExtrinsics::canonical()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_pose() {
        let extrinsics = canonical_extrinsics();

        assert_eq!(extrinsics.coordinate_system_id, 0);
        assert_eq!(extrinsics.position_array(), [0.0, 0.0, 0.0]);
        assert_eq!(
            extrinsics.rotation_row_major(),
            [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
    }
}
