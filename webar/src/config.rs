//! Settings of the WebAR helpers, read from TOML.
//!
//! ```toml
//! [camera]
//! near = 0.01
//! far = 100.0
//! fallback_fovy = 60.0
//!
//! [point_cloud]
//! mode = "copy"
//! points_to_skip = 0
//! transform_points = true
//!
//! [anchor]
//! offset_scale = 0.05
//! validate_normals = false
//! ```
//!
//! All sections and keys are optional.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use webar_device::PointCloudRequest;
use webar_geometry::DepthRange;

use crate::point_cloud::PointCloudMode;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebArConfig {
    pub camera: CameraSection,
    pub point_cloud: PointCloudSection,
    pub anchor: AnchorSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSection {
    pub near: f64,
    pub far: f64,
    /// Vertical field of view in degrees, used when the display has no see-through camera.
    pub fallback_fovy: f64,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            near: 0.01,
            far: 100.0,
            fallback_fovy: 60.0,
        }
    }
}

impl CameraSection {
    pub fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.near, self.far)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointCloudSection {
    pub mode: PointCloudMode,
    pub points_to_skip: usize,
    pub transform_points: bool,
}

impl Default for PointCloudSection {
    fn default() -> Self {
        Self {
            mode: PointCloudMode::Copy,
            points_to_skip: 0,
            transform_points: true,
        }
    }
}

impl PointCloudSection {
    /// The request for frames that are rendered.
    pub fn request(&self) -> PointCloudRequest {
        PointCloudRequest {
            just_update_point_cloud: false,
            points_to_skip: self.points_to_skip,
            transform_points: self.transform_points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorSection {
    /// Distance objects are pushed away from the surface, usually half their size.
    pub offset_scale: f64,
    /// Reject non-unit plane normals instead of producing NaN poses.
    pub validate_normals: bool,
}

/// Intermediate representation of the TOML file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    camera: Option<CameraSection>,
    #[serde(default)]
    point_cloud: Option<PointCloudSection>,
    #[serde(default)]
    anchor: Option<AnchorSection>,
}

impl WebArConfig {
    pub fn from_toml(toml: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(toml).context("Failed to parse TOML configuration")?;

        let config = Self {
            camera: file.camera.unwrap_or_default(),
            point_cloud: file.point_cloud.unwrap_or_default(),
            anchor: file.anchor.unwrap_or_default(),
        };
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let CameraSection {
            near,
            far,
            fallback_fovy,
        } = self.camera;
        if !self.camera.depth_range().is_valid() {
            bail!("Camera depth range must satisfy 0 < near < far, was: near {near}, far {far}");
        }
        if !(fallback_fovy > 0.0 && fallback_fovy < 180.0) {
            bail!("Fallback field of view must be in 0..180 degrees, was: {fallback_fovy}");
        }
        let offset_scale = self.anchor.offset_scale;
        if !offset_scale.is_finite() || offset_scale < 0.0 {
            bail!("Anchor offset scale must be finite and not negative, was: {offset_scale}");
        }
        Ok(())
    }
}
