use derive_more::Display;
use serde::{Deserialize, Serialize};
use webar_geometry::{Pose, Quaternion, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[repr(u32)]
pub enum MarkerType {
    #[display("AR")]
    Ar = 0x01,
    #[display("QR code")]
    QrCode = 0x02,
}

impl MarkerType {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0x01 => Some(Self::Ar),
            0x02 => Some(Self::QrCode),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// A detected marker.
///
/// AR markers carry the id encoded in the physical marker, QR codes carry their `content`
/// instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub marker_type: MarkerType,
    pub id: u32,
    pub content: Option<String>,
    pub position: [f32; 3],
    /// x, y, z, w
    pub orientation: [f32; 4],
}

impl Marker {
    pub fn pose(&self) -> Pose {
        let [x, y, z] = self.position;
        let [qx, qy, qz, qw] = self.orientation;
        Pose::new(
            Vector3::new(x as f64, y as f64, z as f64),
            Quaternion::from_xyzw(qx as f64, qy as f64, qz as f64, qw as f64).normalize(),
        )
    }
}
