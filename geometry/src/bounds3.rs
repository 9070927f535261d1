use crate::Vector3;

/// Axis aligned box over a set of points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds3 {
    pub min: Vector3,
    pub max: Vector3,
}

impl Bounds3 {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Bounds of all finite points, None if there are none.
    ///
    /// Device buffers pad unused slots with `f32::MAX` or infinity. Both are skipped, so are
    /// components that are NaN.
    pub fn from_points(points: impl IntoIterator<Item = Vector3>) -> Option<Self> {
        points
            .into_iter()
            .filter(|p| p.is_finite() && p.abs().max_element() < f32::MAX as f64)
            .fold(None, |bounds: Option<Self>, p| match bounds {
                None => Some(Self::new(p, p)),
                Some(b) => Some(Self::new(b.min.min(p), b.max.max(p))),
            })
    }

    /// Bounds of a flat `x, y, z, x, y, z, ...` buffer.
    pub fn from_triplets(values: &[f32]) -> Option<Self> {
        Self::from_points(
            values
                .chunks_exact(3)
                .map(|c| Vector3::new(c[0] as f64, c[1] as f64, c[2] as f64)),
        )
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) / 2.0
    }

    /// Radius of the sphere around `center()` that contains the box.
    pub fn radius(&self) -> f64 {
        self.size().length() / 2.0
    }
}
