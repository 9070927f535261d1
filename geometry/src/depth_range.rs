use serde::{Deserialize, Serialize};

/// Near and far clipping distances, both positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub near: f64,
    pub far: f64,
}

impl DepthRange {
    pub fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }

    pub fn is_valid(&self) -> bool {
        self.near > 0.0 && self.far > self.near && self.far.is_finite()
    }
}

impl From<(f64, f64)> for DepthRange {
    fn from((near, far): (f64, f64)) -> Self {
        Self::new(near, far)
    }
}
