use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// A clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        Ok(match degrees.rem_euclid(360) {
            0 => Self::Deg0,
            90 => Self::Deg90,
            180 => Self::Deg180,
            270 => Self::Deg270,
            _ => bail!("Rotation must be a multiple of 90 degrees, was: {degrees}"),
        })
    }

    pub fn quarter_turns(self) -> usize {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    pub fn degrees(self) -> i32 {
        self.quarter_turns() as i32 * 90
    }

    /// The rotation that remains after undoing `other`.
    pub fn relative_to(self, other: Rotation) -> Rotation {
        Self::from_quarter_turns(self.quarter_turns() + 4 - other.quarter_turns())
    }

    fn from_quarter_turns(turns: usize) -> Self {
        match turns % 4 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// True if width and height are exchanged.
    pub fn is_transposed(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Pinhole intrinsics and texture layout of a see-through camera.
///
/// Camera frames are uploaded into a texture that may be larger than the image, `texture_width`
/// and `texture_height` are its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeeThroughCamera {
    pub width: u32,
    pub height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
    pub focal_length_x: f64,
    pub focal_length_y: f64,
    /// Principal point, in pixels. y points down.
    pub point_x: f64,
    pub point_y: f64,
    /// Mounting rotation of the camera sensor.
    pub orientation: Rotation,
}

impl SeeThroughCamera {
    /// The part of the texture covered by the image.
    pub fn uv_extent(&self) -> (f32, f32) {
        (
            self.width as f32 / self.texture_width as f32,
            self.height as f32 / self.texture_height as f32,
        )
    }
}
