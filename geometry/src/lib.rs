//! Geometry primitives shared by the WebAR device records and the scene helpers.

mod bounds3;
mod color;
mod depth_range;
mod frustum;
mod plane;
mod pose;
mod ray;
mod unit_interval;

pub use bounds3::*;
pub use color::*;
pub use depth_range::*;
pub use frustum::*;
pub use plane::*;
pub use pose::*;
pub use ray::*;
pub use unit_interval::*;

pub const EPSILON: f64 = f64::EPSILON;

pub type Matrix3 = glam::DMat3;
pub type Matrix4 = glam::DMat4;
pub type Vector3 = glam::DVec3;
pub type Vector4 = glam::DVec4;
pub type Quaternion = glam::DQuat;

pub trait PerspectiveDivide {
    fn perspective_divide(&self) -> Option<Vector3>;
}

impl PerspectiveDivide for Vector4 {
    // Converts homogeneous (x,y,z,w) into (x/w,y/w,z/w), None if w is too close to zero.
    fn perspective_divide(&self) -> Option<Vector3> {
        let w = self.w;
        if w.abs() < EPSILON {
            return None;
        }
        Some(Vector3::new(self.x / w, self.y / w, self.z / w))
    }
}

/// Conversion from the `f32` triplets the device API hands out.
pub trait ToVector3 {
    fn to_vector3(self) -> Vector3;
}

impl ToVector3 for [f32; 3] {
    fn to_vector3(self) -> Vector3 {
        let [x, y, z] = self;
        Vector3::new(x as f64, y as f64, z as f64)
    }
}
