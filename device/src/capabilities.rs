use serde::{Deserialize, Serialize};

/// What a display is able to provide in addition to its pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayCapabilities {
    pub has_point_cloud: bool,
    pub has_see_through_camera: bool,
    pub has_adf_support: bool,
    pub has_marker_support: bool,
}

impl DisplayCapabilities {
    pub const ALL: Self = Self {
        has_point_cloud: true,
        has_see_through_camera: true,
        has_adf_support: true,
        has_marker_support: true,
    };
}
