use std::ops::{Mul, MulAssign};

use serde::{Deserialize, Serialize};

use crate::{Matrix4, Quaternion, Vector3};

/// A rigid transform: rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3,
    pub orientation: Quaternion,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vector3::ZERO,
        orientation: Quaternion::IDENTITY,
    };

    pub fn new(position: impl Into<Vector3>, orientation: Quaternion) -> Self {
        Self {
            position: position.into(),
            orientation,
        }
    }

    pub fn from_position(position: impl Into<Vector3>) -> Self {
        position.into().into()
    }

    pub fn to_matrix4(&self) -> Matrix4 {
        if self.is_translation_only() {
            return Matrix4::from_translation(self.position);
        }
        Matrix4::from_rotation_translation(self.orientation, self.position)
    }

    /// Extracts the rigid part of a matrix. Scale, if any, is dropped.
    pub fn from_matrix4(matrix: Matrix4) -> Self {
        let (_, orientation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            orientation,
        }
    }

    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        if self.is_translation_only() {
            return point + self.position;
        }
        self.orientation * point + self.position
    }

    pub fn transform_vector(&self, vector: Vector3) -> Vector3 {
        if self.is_translation_only() {
            return vector;
        }
        self.orientation * vector
    }

    pub fn inverse(&self) -> Self {
        let orientation = self.orientation.inverse();
        Self {
            position: orientation * -self.position,
            orientation,
        }
    }

    pub fn is_translation_only(&self) -> bool {
        self.orientation == Quaternion::IDENTITY
    }
}

impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Self::Output {
        Pose {
            position: self.position + self.orientation * rhs.position,
            orientation: self.orientation * rhs.orientation,
        }
    }
}

impl MulAssign for Pose {
    fn mul_assign(&mut self, rhs: Pose) {
        *self = *self * rhs;
    }
}

impl From<(f64, f64, f64)> for Pose {
    fn from(value: (f64, f64, f64)) -> Self {
        Self::from(Vector3::from(value))
    }
}

impl From<Vector3> for Pose {
    fn from(position: Vector3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn composition_applies_right_hand_side_first() {
        let turn = Pose::new((1.0, 0.0, 0.0), Quaternion::from_rotation_y(FRAC_PI_2));
        let step = Pose::from_position((0.0, 0.0, -1.0));

        let p = (turn * step).transform_point(Vector3::ZERO);
        let expected = turn.transform_point(step.transform_point(Vector3::ZERO));
        assert_abs_diff_eq!(p.x, expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, expected.y, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn inverse_round_trips_points() {
        let pose = Pose::new((0.5, 2.0, -3.0), Quaternion::from_rotation_x(0.3));
        let p = Vector3::new(1.0, -1.0, 4.0);
        let back = pose.inverse().transform_point(pose.transform_point(p));
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-12);
        assert_abs_diff_eq!(back.z, p.z, epsilon = 1e-12);
    }

    #[test]
    fn matrix_agrees_with_transform_point() {
        let pose = Pose::new((3.0, 0.0, 1.0), Quaternion::from_rotation_z(1.1));
        let p = Vector3::new(0.25, 0.5, 0.75);
        let via_matrix = pose.to_matrix4().transform_point3(p);
        let direct = pose.transform_point(p);
        assert_abs_diff_eq!(via_matrix.x, direct.x, epsilon = 1e-12);
        assert_abs_diff_eq!(via_matrix.y, direct.y, epsilon = 1e-12);
        assert_abs_diff_eq!(via_matrix.z, direct.z, epsilon = 1e-12);

        let recovered = Pose::from_matrix4(pose.to_matrix4());
        assert_abs_diff_eq!(recovered.position.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(recovered.position.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn translation_only_leaves_vectors_alone() {
        let pose = Pose::from((1.0, 2.0, 3.0));
        assert!(pose.is_translation_only());
        assert_eq!(pose.transform_vector(Vector3::X), Vector3::X);
        assert_eq!(pose.transform_point(Vector3::X), Vector3::new(2.0, 2.0, 3.0));
    }
}
