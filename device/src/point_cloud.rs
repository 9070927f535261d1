use serde::{Deserialize, Serialize};
use webar_geometry::Matrix4;

/// Value that marks an unused slot in [`PointCloud::points`].
pub const UNUSED_POINT_VALUE: f32 = f32::MAX;

/// A point cloud frame as filled in by [`crate::ArDisplay::get_point_cloud`].
///
/// `points` is allocated once with room for the maximum number of points the display can
/// detect and is reused for every frame. Only the first `number_of_points` triplets are valid, the
/// rest are set to [`UNUSED_POINT_VALUE`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub number_of_points: usize,
    pub points: Vec<f32>,
    /// Transforms `points` into world space when `points_already_transformed` is false. Identity
    /// otherwise.
    pub points_transform_matrix: Matrix4,
    pub points_already_transformed: bool,
}

impl PointCloud {
    pub fn with_capacity(max_number_of_points: usize) -> Self {
        Self {
            number_of_points: 0,
            points: vec![UNUSED_POINT_VALUE; max_number_of_points * 3],
            points_transform_matrix: Matrix4::IDENTITY,
            points_already_transformed: true,
        }
    }

    /// The number of points `points` has room for.
    pub fn capacity(&self) -> usize {
        self.points.len() / 3
    }

    /// The valid `x, y, z` values. A `number_of_points` beyond the capacity is clamped.
    pub fn valid_points(&self) -> &[f32] {
        &self.points[..self.number_of_points.min(self.capacity()) * 3]
    }

    /// Replaces the content with `points`, truncated to the capacity.
    pub fn set_points(&mut self, points: impl IntoIterator<Item = [f32; 3]>) {
        let mut count = 0;
        for (slot, point) in self.points.chunks_exact_mut(3).zip(points) {
            slot.copy_from_slice(&point);
            count += 1;
        }
        self.points[count * 3..].fill(UNUSED_POINT_VALUE);
        self.number_of_points = count;
    }
}

/// Parameters of a point cloud update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointCloudRequest {
    /// Update the cloud on the device (for picking) without returning points.
    pub just_update_point_cloud: bool,
    /// Return every `points_to_skip + 1`th point only.
    pub points_to_skip: usize,
    /// Transform the points into world space on the device side.
    pub transform_points: bool,
}

impl PointCloudRequest {
    /// Number of points returned out of `detected`.
    pub fn returned_count(&self, detected: usize) -> usize {
        if self.just_update_point_cloud {
            return 0;
        }
        detected / (self.points_to_skip + 1)
    }
}
