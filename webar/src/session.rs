use anyhow::Result;
use log::{debug, info};
use webar_device::{ArDisplay, Rotation};
use webar_geometry::{Matrix4, UnitInterval};

use crate::{
    anchor::{AnchorTarget, OrientedAnchor, place_on_surface},
    config::WebArConfig,
    point_cloud::PointCloudGeometry,
    see_through::{SeeThroughMesh, see_through_projection},
};

/// A display together with the configuration and the point cloud geometry that follows it.
#[derive(Debug)]
pub struct WebArSession<D: ArDisplay> {
    display: D,
    config: WebArConfig,
    point_cloud: PointCloudGeometry,
}

impl<D: ArDisplay> WebArSession<D> {
    pub fn new(display: D, config: WebArConfig) -> Self {
        let capabilities = display.capabilities();
        info!("WebAR session: {capabilities:?}");
        let point_cloud = if capabilities.has_point_cloud {
            PointCloudGeometry::for_display(&display, config.point_cloud.mode)
        } else {
            PointCloudGeometry::placeholder()
        };
        Self {
            display,
            config,
            point_cloud,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn config(&self) -> &WebArConfig {
        &self.config
    }

    pub fn point_cloud(&self) -> &PointCloudGeometry {
        &self.point_cloud
    }

    pub fn point_cloud_mut(&mut self) -> &mut PointCloudGeometry {
        &mut self.point_cloud
    }

    /// Pulls the next point cloud frame, once per rendered frame.
    pub fn update_point_cloud(&mut self) -> Result<()> {
        if !self.display.capabilities().has_point_cloud {
            return Ok(());
        }
        let request = self.config.point_cloud.request();
        self.point_cloud.update(&mut self.display, request)
    }

    pub fn projection_matrix(&self, aspect: f64) -> Matrix4 {
        let camera = &self.config.camera;
        see_through_projection(
            &self.display,
            camera.depth_range(),
            camera.fallback_fovy,
            aspect,
        )
    }

    pub fn see_through_mesh(&self, screen: Rotation) -> SeeThroughMesh {
        SeeThroughMesh::new(self.display.see_through_camera().as_ref(), screen)
    }

    /// Places `target` on the surface under the normalized screen position `(x, y)`.
    ///
    /// `Ok(None)` if nothing was hit, `target` is left as is then.
    pub fn place_at(
        &self,
        x: impl Into<UnitInterval>,
        y: impl Into<UnitInterval>,
        target: &mut impl AnchorTarget,
    ) -> Result<Option<OrientedAnchor>> {
        let (x, y) = (x.into(), y.into());
        let Some(pick) = self.display.get_picking_point_and_plane(x, y) else {
            debug!("No surface at {x:?}, {y:?}");
            return Ok(None);
        };
        let anchor = &self.config.anchor;
        let placed = place_on_surface(&pick, target, anchor.offset_scale, anchor.validate_normals)?;
        Ok(Some(placed))
    }
}
