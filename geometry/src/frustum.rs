use crate::{DepthRange, Matrix4};

/// An off-center view frustum, given by the extents of its near plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub depth: DepthRange,
}

impl Frustum {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64, depth: impl Into<DepthRange>) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            depth: depth.into(),
        }
    }

    /// A symmetric frustum. `fovy` is in degrees.
    pub fn perspective(fovy: f64, aspect: f64, depth: impl Into<DepthRange>) -> Self {
        let depth = depth.into();
        let top = depth.near * (fovy / 2.0).to_radians().tan();
        let right = top * aspect;
        Self::new(-right, right, -top, top, depth)
    }

    /// The OpenGL style projection matrix (clip z in -1..1).
    pub fn projection_matrix(&self) -> Matrix4 {
        let DepthRange { near, far } = self.depth;
        Matrix4::frustum_rh_gl(self.left, self.right, self.bottom, self.top, near, far)
    }
}
