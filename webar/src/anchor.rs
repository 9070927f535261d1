//! Placing objects flush against surfaces picked in the point cloud.
//!
//! A pick yields a point and the plane fitted around it. From the plane normal `N` an orthonormal
//! basis `[N, Y, Z]` is built, so the object's local X axis points away from the surface. The
//! object is then moved along `N` by an offset, usually half its extent along X, so it rests on the
//! surface instead of being centered in it.
//!
//! Everything here is a pure function of its inputs.

use derive_more::{Display, Error};
use log::trace;
use webar_device::PickingPointAndPlane;
use webar_geometry::{Matrix3, Matrix4, PlaneEquation, Pose, Quaternion, Vector3};

const WORLD_UP: Vector3 = Vector3::Y;

/// Above this `dot(N, WORLD_UP)` the surface counts as horizontal and `Z` replaces `WORLD_UP` as
/// the reference axis. 0.5 is about 60 degrees.
pub const WORLD_UP_THRESHOLD: f64 = 0.5;

/// Accepted deviation of the normal's length from 1 in [`try_compute_anchor_pose`].
pub const NORMAL_LENGTH_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Display, Error)]
pub enum AnchorError {
    #[display("Plane normal {normal} is not a unit vector")]
    InvalidNormal { normal: Vector3 },
}

/// Position and orientation of an object anchored to a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedAnchor {
    pub position: Vector3,
    /// Columns are the object's local axes in world space: the plane normal, then Y and Z.
    pub basis: Matrix3,
}

impl OrientedAnchor {
    pub fn orientation(&self) -> Quaternion {
        Quaternion::from_mat3(&self.basis)
    }

    pub fn to_pose(&self) -> Pose {
        Pose::new(self.position, self.orientation())
    }

    /// The model matrix, built from the basis directly.
    pub fn to_matrix4(&self) -> Matrix4 {
        let mut m = Matrix4::from_mat3(self.basis);
        m.w_axis = self.position.extend(1.0);
        m
    }
}

impl From<OrientedAnchor> for Pose {
    fn from(anchor: OrientedAnchor) -> Self {
        anchor.to_pose()
    }
}

/// The reference axis the basis is derived from.
///
/// The comparison is strict: a normal exactly at the threshold keeps `WORLD_UP`.
pub fn reference_up(normal: Vector3) -> Vector3 {
    if normal.dot(WORLD_UP) > WORLD_UP_THRESHOLD {
        Vector3::Z
    } else {
        WORLD_UP
    }
}

/// The orthonormal basis `[N, Y, Z]` for the unit normal `N`.
///
/// `N` is used as given. A zero or non-unit normal produces a degenerate basis, NaN included.
pub fn surface_basis(normal: Vector3) -> Matrix3 {
    let axis_z = normal.cross(reference_up(normal)).normalize();
    let axis_y = axis_z.cross(normal).normalize();
    Matrix3::from_cols(normal, axis_y, axis_z)
}

/// Computes the pose that places an object on the plane at `picked_point`, pushed `offset_scale`
/// along the plane normal.
///
/// The plane's normal must be unit length. This is not checked, see [`try_compute_anchor_pose`].
pub fn compute_anchor_pose(
    picked_point: Vector3,
    plane: &PlaneEquation,
    offset_scale: f64,
) -> OrientedAnchor {
    let normal = plane.normal();
    let anchor = OrientedAnchor {
        position: picked_point + normal * offset_scale,
        basis: surface_basis(normal),
    };
    trace!(
        "Anchor at {} with normal {normal} (offset {offset_scale})",
        anchor.position
    );
    anchor
}

/// Like [`compute_anchor_pose`], but rejects normals that are not finite unit vectors instead of
/// producing NaN.
pub fn try_compute_anchor_pose(
    picked_point: Vector3,
    plane: &PlaneEquation,
    offset_scale: f64,
) -> Result<OrientedAnchor, AnchorError> {
    let normal = plane.normal();
    if !normal.is_finite() || (normal.length() - 1.0).abs() > NORMAL_LENGTH_TOLERANCE {
        return Err(AnchorError::InvalidNormal { normal });
    }
    Ok(compute_anchor_pose(picked_point, plane, offset_scale))
}

/// Something in a scene that can be positioned and oriented.
pub trait AnchorTarget {
    fn set_position_and_orientation(&mut self, position: Vector3, orientation: Quaternion);
}

impl AnchorTarget for Pose {
    fn set_position_and_orientation(&mut self, position: Vector3, orientation: Quaternion) {
        self.position = position;
        self.orientation = orientation;
    }
}

/// Moves `target` onto the picked surface.
///
/// With `validate` the normal is checked first and `target` is left untouched if it is invalid.
pub fn place_on_surface(
    pick: &PickingPointAndPlane,
    target: &mut impl AnchorTarget,
    offset_scale: f64,
    validate: bool,
) -> Result<OrientedAnchor, AnchorError> {
    let (point, plane) = (pick.point(), pick.plane());
    let anchor = if validate {
        try_compute_anchor_pose(point, &plane, offset_scale)?
    } else {
        compute_anchor_pose(point, &plane, offset_scale)
    };
    target.set_position_and_orientation(anchor.position, anchor.orientation());
    Ok(anchor)
}

#[cfg(test)]
mod tests {
    use approx::{abs_diff_eq, assert_abs_diff_eq};

    use super::*;

    const TOLERANCE: f64 = 1e-5;

    fn plane(normal: Vector3) -> PlaneEquation {
        PlaneEquation::new(normal.x, normal.y, normal.z, 0.0)
    }

    fn assert_vec_eq(actual: Vector3, expected: Vector3) {
        assert!(
            abs_diff_eq!(actual.x, expected.x, epsilon = TOLERANCE)
                && abs_diff_eq!(actual.y, expected.y, epsilon = TOLERANCE)
                && abs_diff_eq!(actual.z, expected.z, epsilon = TOLERANCE),
            "{actual} != {expected}"
        );
    }

    fn sample_normals() -> Vec<Vector3> {
        let mut normals = Vec::new();
        for i in 0..=12 {
            let polar = std::f64::consts::PI * i as f64 / 12.0;
            for j in 0..24 {
                let azimuth = std::f64::consts::TAU * j as f64 / 24.0;
                normals.push(Vector3::new(
                    polar.sin() * azimuth.cos(),
                    polar.cos(),
                    polar.sin() * azimuth.sin(),
                ));
            }
        }
        normals
    }

    #[test]
    fn floor_uses_z_as_reference() {
        let anchor = compute_anchor_pose(Vector3::new(1.0, 0.0, 2.0), &plane(Vector3::Y), 0.1);

        assert_eq!(anchor.basis.x_axis, Vector3::Y);
        assert_eq!(anchor.basis.z_axis, Vector3::X);
        // cross(X, Y)
        assert_eq!(anchor.basis.y_axis, Vector3::Z);
        assert_eq!(anchor.position, Vector3::new(1.0, 0.1, 2.0));
    }

    #[test]
    fn wall_facing_the_viewer() {
        let basis = surface_basis(Vector3::Z);
        assert_eq!(reference_up(Vector3::Z), Vector3::Y);
        assert_eq!(basis.x_axis, Vector3::Z);
        assert_eq!(basis.z_axis, Vector3::NEG_X);
        assert_eq!(basis.y_axis, Vector3::Y);
    }

    #[test]
    fn threshold_is_strict() {
        let at_threshold = Vector3::new(0.75f64.sqrt(), 0.5, 0.0);
        assert_eq!(at_threshold.dot(Vector3::Y), 0.5);
        assert_eq!(reference_up(at_threshold), Vector3::Y);

        let above = Vector3::new(0.7, 0.51, 0.0).normalize();
        assert_eq!(reference_up(above), Vector3::Z);

        let ceiling = Vector3::NEG_Y;
        assert_eq!(reference_up(ceiling), Vector3::Y);
    }

    #[test]
    fn basis_is_orthonormal_and_right_handed() {
        for normal in sample_normals() {
            let basis = surface_basis(normal);
            let (x, y, z) = (basis.x_axis, basis.y_axis, basis.z_axis);

            for axis in [x, y, z] {
                assert_abs_diff_eq!(axis.length(), 1.0, epsilon = TOLERANCE);
            }
            assert_abs_diff_eq!(x.dot(y), 0.0, epsilon = TOLERANCE);
            assert_abs_diff_eq!(x.dot(z), 0.0, epsilon = TOLERANCE);
            assert_abs_diff_eq!(y.dot(z), 0.0, epsilon = TOLERANCE);
            assert_abs_diff_eq!(basis.determinant(), 1.0, epsilon = TOLERANCE);
            assert_eq!(x, normal);
        }
    }

    #[test]
    fn orientation_maps_local_axes_onto_the_basis() {
        for normal in sample_normals() {
            let anchor = compute_anchor_pose(Vector3::ZERO, &plane(normal), 0.0);
            let orientation = anchor.orientation();
            assert_abs_diff_eq!(orientation.length(), 1.0, epsilon = TOLERANCE);
            assert_vec_eq(orientation * Vector3::X, anchor.basis.x_axis);
            assert_vec_eq(orientation * Vector3::Y, anchor.basis.y_axis);
            assert_vec_eq(orientation * Vector3::Z, anchor.basis.z_axis);
        }
    }

    #[test]
    fn offset_moves_along_the_normal() {
        let picked = Vector3::new(-0.3, 1.25, 4.0);
        for normal in sample_normals() {
            let at_surface = compute_anchor_pose(picked, &plane(normal), 0.0);
            assert_eq!(at_surface.position, picked);

            let offset = compute_anchor_pose(picked, &plane(normal), 0.2);
            assert_eq!(offset.position, picked + normal * 0.2);
        }
    }

    #[test]
    fn deterministic() {
        let normal = Vector3::new(0.3, 0.4, -0.5).normalize();
        let a = compute_anchor_pose(Vector3::ONE, &plane(normal), 0.05);
        let b = compute_anchor_pose(Vector3::ONE, &plane(normal), 0.05);
        assert_eq!(a, b);
        assert_eq!(a.orientation(), b.orientation());
    }

    #[test]
    fn plane_offset_is_ignored() {
        let a = compute_anchor_pose(Vector3::ZERO, &PlaneEquation::new(0.0, 1.0, 0.0, 3.0), 1.0);
        let b = compute_anchor_pose(Vector3::ZERO, &PlaneEquation::new(0.0, 1.0, 0.0, -7.0), 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_normal_propagates_nan() {
        let anchor = compute_anchor_pose(Vector3::ZERO, &plane(Vector3::ZERO), 1.0);
        assert!(anchor.basis.is_nan());
        assert_eq!(anchor.position, Vector3::ZERO);
    }

    #[test]
    fn validation_rejects_degenerate_normals() {
        for normal in [
            Vector3::ZERO,
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(f64::NAN, 1.0, 0.0),
        ] {
            let result = try_compute_anchor_pose(Vector3::ZERO, &plane(normal), 0.1);
            assert!(matches!(result, Err(AnchorError::InvalidNormal { .. })));
        }
        assert!(try_compute_anchor_pose(Vector3::ZERO, &plane(Vector3::Y), 0.1).is_ok());
    }

    #[test]
    fn matrix_agrees_with_pose() {
        let normal = Vector3::new(-0.2, 0.9, 0.1).normalize();
        let anchor = compute_anchor_pose(Vector3::new(1.0, 2.0, 3.0), &plane(normal), 0.5);
        let p = Vector3::new(0.1, -0.2, 0.3);
        assert_vec_eq(
            anchor.to_matrix4().transform_point3(p),
            anchor.to_pose().transform_point(p),
        );
    }

    #[test]
    fn places_targets() {
        let pick = PickingPointAndPlane {
            point: [1.0, 0.0, 2.0],
            plane: [0.0, 1.0, 0.0, 0.0],
        };
        let mut target = Pose::IDENTITY;
        let anchor = place_on_surface(&pick, &mut target, 0.25, true).unwrap();
        assert_eq!(target.position, Vector3::new(1.0, 0.25, 2.0));
        assert_eq!(target.orientation, anchor.orientation());

        let broken = PickingPointAndPlane {
            point: [1.0, 0.0, 2.0],
            plane: [0.0, 0.0, 0.0, 0.0],
        };
        let mut untouched = Pose::IDENTITY;
        assert!(place_on_surface(&broken, &mut untouched, 0.25, true).is_err());
        assert_eq!(untouched, Pose::IDENTITY);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn anchor_types_cross_threads() {
        assert_send_sync::<OrientedAnchor>();
        assert_send_sync::<AnchorError>();
        assert_send_sync::<PlaneEquation>();
        assert_send_sync::<Pose>();
    }

    #[test]
    fn concurrent_calls_agree_with_sequential_ones() {
        let normals = sample_normals();
        let point = Vector3::new(0.5, -1.0, 2.0);
        let sequential: Vec<_> = normals
            .iter()
            .map(|n| compute_anchor_pose(point, &plane(*n), 0.2))
            .collect();

        let concurrent: Vec<_> = std::thread::scope(|scope| {
            let workers: Vec<_> = normals
                .chunks(normals.len() / 4)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|n| compute_anchor_pose(point, &plane(*n), 0.2))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|worker| worker.join().unwrap())
                .collect()
        });

        assert_eq!(concurrent, sequential);
    }
}
