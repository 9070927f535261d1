//! Showing the see-through camera behind the scene.
//!
//! The camera image is drawn on a full screen quad, and virtual content is rendered with a
//! projection that matches the camera's intrinsics so it lines up with the image.

use log::debug;
use webar_device::{ArDisplay, Rotation, SeeThroughCamera};
use webar_geometry::{DepthRange, Frustum, Matrix4};

/// A quad in normalized device coordinates textured with the camera image.
#[derive(Debug, Clone, PartialEq)]
pub struct SeeThroughMesh {
    /// `x, y, z` of the corners: top left, top right, bottom right, bottom left.
    pub positions: [f32; 12],
    pub indices: [u16; 6],
    /// `u, v` per corner. v points down, the texture is not flipped.
    pub uvs: [f32; 8],
}

impl SeeThroughMesh {
    pub const POSITIONS: [f32; 12] = [
        -1.0, 1.0, 0.0, //
        1.0, 1.0, 0.0, //
        1.0, -1.0, 0.0, //
        -1.0, -1.0, 0.0,
    ];
    pub const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    /// The quad for `camera` viewed on a screen rotated by `screen`.
    ///
    /// Only the part of the texture the camera image covers is mapped. Without a camera (a video
    /// file for example) the whole texture is used.
    pub fn new(camera: Option<&SeeThroughCamera>, screen: Rotation) -> Self {
        let ((u, v), rotation) = match camera {
            Some(camera) => (camera.uv_extent(), camera.orientation.relative_to(screen)),
            None => ((1.0, 1.0), Rotation::Deg0),
        };

        let mut corners = [[0.0, 0.0], [u, 0.0], [u, v], [0.0, v]];
        corners.rotate_left(rotation.quarter_turns());

        let mut uvs = [0.0; 8];
        for (uv, corner) in uvs.chunks_exact_mut(2).zip(corners) {
            uv.copy_from_slice(&corner);
        }

        Self {
            positions: Self::POSITIONS,
            indices: Self::INDICES,
            uvs,
        }
    }
}

/// The frustum of a pinhole camera.
///
/// The principal point may be off center, which shifts the frustum. Camera pixel coordinates have
/// y pointing down, so the vertical offset is negated.
pub fn see_through_frustum(camera: &SeeThroughCamera, depth: DepthRange) -> Frustum {
    let width = camera.width as f64;
    let height = camera.height as f64;

    let xscale = depth.near / camera.focal_length_x;
    let yscale = depth.near / camera.focal_length_y;

    let xoffset = (camera.point_x - width / 2.0) * xscale;
    let yoffset = -(camera.point_y - height / 2.0) * yscale;

    Frustum::new(
        xscale * -width / 2.0 - xoffset,
        xscale * width / 2.0 - xoffset,
        yscale * -height / 2.0 - yoffset,
        yscale * height / 2.0 - yoffset,
        depth,
    )
}

/// The projection for rendering over the see-through camera of `display`.
///
/// Falls back to a symmetric perspective with `fallback_fovy` (degrees) and `aspect` if the display
/// has no camera.
pub fn see_through_projection(
    display: &impl ArDisplay,
    depth: DepthRange,
    fallback_fovy: f64,
    aspect: f64,
) -> Matrix4 {
    let frustum = match display.see_through_camera() {
        Some(camera) => see_through_frustum(&camera, depth),
        None => {
            debug!("No see-through camera, using a {fallback_fovy} degree perspective");
            Frustum::perspective(fallback_fovy, aspect, depth)
        }
    };
    frustum.projection_matrix()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use webar_device::{DisplayCapabilities, ScriptedDisplay};
    use webar_geometry::{PerspectiveDivide, Vector3};

    use super::*;

    fn camera(orientation: Rotation) -> SeeThroughCamera {
        SeeThroughCamera {
            width: 1280,
            height: 720,
            texture_width: 1280,
            texture_height: 1024,
            focal_length_x: 1040.0,
            focal_length_y: 1030.0,
            point_x: 652.0,
            point_y: 349.0,
            orientation,
        }
    }

    #[test]
    fn uvs_cover_the_camera_image() {
        let mesh = SeeThroughMesh::new(Some(&camera(Rotation::Deg0)), Rotation::Deg0);
        assert_eq!(mesh.uvs, [
            0.0, 0.0, 1.0, 0.0, 1.0, 0.703125, 0.0, 0.703125
        ]);
        assert_eq!(mesh.indices, [0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.positions, SeeThroughMesh::POSITIONS);
    }

    #[test]
    fn uvs_without_camera() {
        let mesh = SeeThroughMesh::new(None, Rotation::Deg270);
        assert_eq!(mesh.uvs, [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn uvs_follow_the_relative_rotation() {
        let v = 0.703125;
        let cases = [
            (Rotation::Deg0, Rotation::Deg0, [0.0, 0.0, 1.0, 0.0, 1.0, v, 0.0, v]),
            (Rotation::Deg90, Rotation::Deg0, [1.0, 0.0, 1.0, v, 0.0, v, 0.0, 0.0]),
            (Rotation::Deg90, Rotation::Deg90, [0.0, 0.0, 1.0, 0.0, 1.0, v, 0.0, v]),
            (Rotation::Deg0, Rotation::Deg90, [0.0, v, 0.0, 0.0, 1.0, 0.0, 1.0, v]),
            (Rotation::Deg270, Rotation::Deg90, [1.0, v, 0.0, v, 0.0, 0.0, 1.0, 0.0]),
        ];
        for (sensor, screen, expected) in cases {
            let mesh = SeeThroughMesh::new(Some(&camera(sensor)), screen);
            assert_eq!(mesh.uvs, expected, "sensor {sensor:?}, screen {screen:?}");
        }
    }

    #[test]
    fn frustum_reprojects_pixels() {
        let camera = camera(Rotation::Deg0);
        let projection = see_through_frustum(&camera, DepthRange::new(0.1, 100.0)).projection_matrix();

        // A point 2m in front of the camera, in GL camera space (y up, looking down -z).
        let p = Vector3::new(0.3, -0.2, -2.0);
        let depth = -p.z;
        let u = camera.focal_length_x * p.x / depth + camera.point_x;
        let v = -camera.focal_length_y * p.y / depth + camera.point_y;

        let ndc = (projection * p.extend(1.0)).perspective_divide().unwrap();
        assert_abs_diff_eq!(ndc.x, 2.0 * u / 1280.0 - 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ndc.y, 1.0 - 2.0 * v / 720.0, epsilon = 1e-9);
    }

    #[test]
    fn centered_principal_point_is_symmetric() {
        let mut camera = camera(Rotation::Deg0);
        camera.point_x = 640.0;
        camera.point_y = 360.0;
        let frustum = see_through_frustum(&camera, DepthRange::new(0.5, 10.0));
        assert_abs_diff_eq!(frustum.left, -frustum.right, epsilon = 1e-12);
        assert_abs_diff_eq!(frustum.bottom, -frustum.top, epsilon = 1e-12);
        assert_abs_diff_eq!(frustum.right, 0.5 * 640.0 / 1040.0, epsilon = 1e-12);
    }

    #[test]
    fn projection_falls_back_without_camera() {
        let depth = DepthRange::new(0.1, 50.0);
        let display = ScriptedDisplay::new(0).with_capabilities(DisplayCapabilities::default());
        let projection = see_through_projection(&display, depth, 60.0, 1.5);
        assert_eq!(
            projection,
            Frustum::perspective(60.0, 1.5, depth).projection_matrix()
        );

        let display = ScriptedDisplay::new(0).with_camera(camera(Rotation::Deg0));
        let projection = see_through_projection(&display, depth, 60.0, 1.5);
        assert_eq!(
            projection,
            see_through_frustum(&camera(Rotation::Deg0), depth).projection_matrix()
        );
    }
}
