use serde::{Deserialize, Serialize};
use webar_geometry::{PlaneEquation, ToVector3, Vector3};

/// Where a ray cast from a screen position hit the point cloud, and the plane fitted there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickingPointAndPlane {
    pub point: [f32; 3],
    /// `a, b, c, d` with `(a, b, c)` the unit normal.
    pub plane: [f32; 4],
}

impl PickingPointAndPlane {
    pub fn new(point: Vector3, plane: PlaneEquation) -> Self {
        Self {
            point: point.as_vec3().to_array(),
            plane: plane.into(),
        }
    }

    pub fn point(&self) -> Vector3 {
        self.point.to_vector3()
    }

    pub fn plane(&self) -> PlaneEquation {
        self.plane.into()
    }
}
