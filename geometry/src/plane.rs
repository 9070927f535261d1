use serde::{Deserialize, Serialize};

use crate::Vector3;

/// The coefficients of `ax + by + cz + d = 0`.
///
/// `(a, b, c)` is expected to be the unit normal of the plane, `d` its signed offset from the
/// origin. Nothing here normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PlaneEquation {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// The plane through `point` with the given `normal`.
    pub fn from_point_normal(point: Vector3, normal: Vector3) -> Self {
        Self::new(normal.x, normal.y, normal.z, -normal.dot(point))
    }

    pub fn normal(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, point: Vector3) -> f64 {
        self.normal().dot(point) + self.d
    }

    /// A point on the plane, the one closest to the origin.
    pub fn origin_point(&self) -> Vector3 {
        self.normal() * -self.d
    }
}

impl From<[f32; 4]> for PlaneEquation {
    fn from([a, b, c, d]: [f32; 4]) -> Self {
        Self::new(a as f64, b as f64, c as f64, d as f64)
    }
}

impl From<PlaneEquation> for [f32; 4] {
    fn from(plane: PlaneEquation) -> Self {
        [
            plane.a as f32,
            plane.b as f32,
            plane.c as f32,
            plane.d as f32,
        ]
    }
}
