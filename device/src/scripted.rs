use anyhow::{Result, bail};
use log::{debug, trace};
use uuid::Uuid;
use webar_geometry::{Matrix4, PlaneEquation, Pose, Ray, ToVector3, UnitInterval, Vector3};

use crate::{
    Adf, ArDisplay, DisplayCapabilities, Marker, MarkerType, PickingPointAndPlane, PointCloud,
    PointCloudRequest, SeeThroughCamera,
};

/// An in-memory display that replays a fixed scene.
///
/// Detected points are stored in device space and moved into world space by the display pose.
/// Picking intersects the pick ray with analytic surfaces instead of the point cloud.
#[derive(Debug, Clone)]
pub struct ScriptedDisplay {
    capabilities: DisplayCapabilities,
    max_number_of_points: usize,
    pose: Pose,
    /// Vertical field of view of the picking camera, in degrees.
    fovy: f64,
    aspect: f64,
    points: Vec<[f32; 3]>,
    surfaces: Vec<PlaneEquation>,
    camera: Option<SeeThroughCamera>,
    adfs: Vec<Adf>,
    enabled_adf: Option<Uuid>,
    markers: Vec<Marker>,
    point_cloud_updated: bool,
}

impl ScriptedDisplay {
    pub const DEFAULT_FOVY: f64 = 60.0;

    /// A display with every capability and no content.
    pub fn new(max_number_of_points: usize) -> Self {
        Self {
            capabilities: DisplayCapabilities::ALL,
            max_number_of_points,
            pose: Pose::IDENTITY,
            fovy: Self::DEFAULT_FOVY,
            aspect: 1.0,
            points: Vec::new(),
            surfaces: Vec::new(),
            camera: None,
            adfs: Vec::new(),
            enabled_adf: None,
            markers: Vec::new(),
            point_cloud_updated: false,
        }
    }

    pub fn with_capabilities(mut self, capabilities: DisplayCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_field_of_view(mut self, fovy: f64, aspect: f64) -> Self {
        self.fovy = fovy;
        self.aspect = aspect;
        self
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = [f32; 3]>) -> Self {
        self.points = points.into_iter().collect();
        self
    }

    pub fn with_surface(mut self, surface: PlaneEquation) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn with_camera(mut self, camera: SeeThroughCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_adf(mut self, adf: Adf) -> Self {
        self.adfs.push(adf);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Replaces the detected points of the next frame.
    pub fn set_points(&mut self, points: impl IntoIterator<Item = [f32; 3]>) {
        self.points = points.into_iter().collect();
    }

    pub fn enabled_adf(&self) -> Option<Uuid> {
        self.enabled_adf
    }

    /// The world space ray through the normalized screen position. y points down.
    pub fn pick_ray(&self, x: UnitInterval, y: UnitInterval) -> Ray {
        let tan = (self.fovy / 2.0).to_radians().tan();
        let dir = Vector3::new(x.to_ndc() * tan * self.aspect, -y.to_ndc() * tan, -1.0);
        Ray::new(
            self.pose.position,
            self.pose.transform_vector(dir).normalize(),
        )
    }
}

impl ArDisplay for ScriptedDisplay {
    fn capabilities(&self) -> DisplayCapabilities {
        self.capabilities
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn max_number_of_points(&self) -> usize {
        if !self.capabilities.has_point_cloud {
            return 0;
        }
        self.max_number_of_points
    }

    fn get_point_cloud(&mut self, cloud: &mut PointCloud, request: PointCloudRequest) -> Result<()> {
        if !self.capabilities.has_point_cloud {
            bail!("Display does not provide a point cloud");
        }
        self.point_cloud_updated = true;

        let detected = self.points.len().min(self.max_number_of_points);
        let count = request.returned_count(detected);
        let selected = self.points[..detected]
            .iter()
            .step_by(request.points_to_skip + 1)
            .take(count);

        if request.transform_points {
            let pose = self.pose;
            cloud.set_points(
                selected.map(|&p| pose.transform_point(p.to_vector3()).as_vec3().to_array()),
            );
            cloud.points_transform_matrix = Matrix4::IDENTITY;
            cloud.points_already_transformed = true;
        } else {
            cloud.set_points(selected.copied());
            cloud.points_transform_matrix = self.pose.to_matrix4();
            cloud.points_already_transformed = false;
        }

        trace!(
            "Point cloud updated: {} of {detected} points returned",
            cloud.number_of_points
        );
        Ok(())
    }

    fn get_picking_point_and_plane(
        &self,
        x: UnitInterval,
        y: UnitInterval,
    ) -> Option<PickingPointAndPlane> {
        if !self.capabilities.has_point_cloud || !self.point_cloud_updated {
            return None;
        }
        let ray = self.pick_ray(x, y);

        let (t, surface) = self
            .surfaces
            .iter()
            .filter_map(|s| ray.plane_distance(s).map(|t| (t, s)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))?;

        // Report the normal facing the viewer.
        let surface = if surface.signed_distance(ray.origin) < 0.0 {
            PlaneEquation::new(-surface.a, -surface.b, -surface.c, -surface.d)
        } else {
            *surface
        };

        Some(PickingPointAndPlane::new(ray.at(t), surface))
    }

    fn see_through_camera(&self) -> Option<SeeThroughCamera> {
        if !self.capabilities.has_see_through_camera {
            return None;
        }
        self.camera
    }

    fn adfs(&self) -> Vec<Adf> {
        if !self.capabilities.has_adf_support {
            return Vec::new();
        }
        self.adfs.clone()
    }

    fn enable_adf(&mut self, uuid: Uuid) -> Result<()> {
        if !self.capabilities.has_adf_support {
            bail!("Display does not support area descriptions");
        }
        let Some(adf) = self.adfs.iter().find(|adf| adf.uuid == uuid) else {
            bail!("Area description {uuid} not found");
        };
        if let Some(previous) = self.enabled_adf.replace(uuid) {
            debug!("Area description {previous} disabled");
        }
        debug!("Area description '{}' ({uuid}) enabled", adf.name);
        Ok(())
    }

    fn disable_adf(&mut self) {
        if let Some(uuid) = self.enabled_adf.take() {
            debug!("Area description {uuid} disabled");
        }
    }

    fn detect_markers(&mut self, marker_type: MarkerType, marker_size: f32) -> Vec<Marker> {
        if !self.capabilities.has_marker_support {
            return Vec::new();
        }
        trace!("Detecting {marker_type} markers of size {marker_size}m");
        self.markers
            .iter()
            .filter(|m| m.marker_type == marker_type)
            .cloned()
            .collect()
    }
}
