use anyhow::Result;
use uuid::Uuid;
use webar_geometry::{Pose, UnitInterval};

use crate::{
    Adf, DisplayCapabilities, Marker, MarkerType, PickingPointAndPlane, PointCloud,
    PointCloudRequest, SeeThroughCamera,
};

/// A display that tracks its pose and may provide AR functionality on top.
///
/// Which of the optional functions work is described by [`ArDisplay::capabilities`].
pub trait ArDisplay {
    fn capabilities(&self) -> DisplayCapabilities;

    /// The current 6DOF pose of the display.
    fn pose(&self) -> Pose;

    /// The maximum number of points a point cloud may contain. 0 if the display does not provide
    /// point clouds.
    fn max_number_of_points(&self) -> usize;

    /// A point cloud frame sized for this display.
    fn new_point_cloud(&self) -> PointCloud {
        PointCloud::with_capacity(self.max_number_of_points())
    }

    /// Updates the point cloud and fills `cloud` as described by `request`.
    ///
    /// Fails if the display has no point cloud support.
    fn get_point_cloud(&mut self, cloud: &mut PointCloud, request: PointCloudRequest) -> Result<()>;

    /// Casts a ray from the normalized screen position `(x, y)` into the point cloud.
    ///
    /// The point cloud must have been updated at least once before. None if there is no point
    /// cloud support or nothing was hit.
    fn get_picking_point_and_plane(
        &self,
        x: UnitInterval,
        y: UnitInterval,
    ) -> Option<PickingPointAndPlane>;

    fn see_through_camera(&self) -> Option<SeeThroughCamera>;

    /// The area descriptions stored on the device.
    fn adfs(&self) -> Vec<Adf>;

    /// Localizes against the ADF with the given `uuid`. Only one ADF can be enabled, a previously
    /// enabled one is disabled.
    fn enable_adf(&mut self, uuid: Uuid) -> Result<()>;

    /// Disables the enabled ADF, if any. Pose estimation is relative to the start of the service
    /// from then on.
    fn disable_adf(&mut self);

    /// Detects markers of `marker_type` in the current camera frame. `marker_size` is the physical
    /// size of the markers in meters.
    fn detect_markers(&mut self, marker_type: MarkerType, marker_size: f32) -> Vec<Marker>;
}
