use log::warn;
use serde::{Deserialize, Serialize};

/// 0 .. 1
///
/// Normalized screen coordinates are expressed in this range.
#[derive(
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Debug,
    Default,
    Serialize,
    Deserialize,
    derive_more::Mul,
    derive_more::MulAssign,
)]
pub struct UnitInterval(f64);

impl UnitInterval {
    pub const CENTER: Self = Self(0.5);

    pub fn new(mut v: f64) -> Self {
        if v.is_nan() {
            warn!("Unit Interval provided with NaN, set to 0.0");
            v = 0.0;
        }
        let clamped = v.clamp(0.0, 1.0);
        if clamped != v {
            warn!("Unit Interval clamped to be in the 0.0..1.0 range, was: {v}");
        }
        Self(clamped)
    }

    pub const fn new_unchecked(v: f64) -> Self {
        Self(v)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Maps 0..1 to -1..1.
    pub fn to_ndc(self) -> f64 {
        self.0 * 2.0 - 1.0
    }
}

impl From<f64> for UnitInterval {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<UnitInterval> for f64 {
    fn from(ui: UnitInterval) -> Self {
        ui.0
    }
}
