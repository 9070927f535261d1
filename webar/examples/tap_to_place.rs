//! Replays a scripted room and places a cube wherever the screen is tapped.
//!
//! Run with `RUST_LOG=debug` to follow the point cloud and the placements. An optional argument
//! names a TOML configuration file.

use std::{env, fs};

use anyhow::{Context, Result};
use log::{info, warn};
use webar::{
    WebArConfig, WebArSession,
    device::{Adf, ArDisplay, MarkerType, Rotation, ScriptedDisplay, SeeThroughCamera},
    geometry::{PlaneEquation, Pose, Quaternion, Vector3},
};

const CUBE_SIZE: f64 = 0.1;

fn main() -> Result<()> {
    env_logger::init();

    let mut config = match env::args().nth(1) {
        Some(path) => {
            let toml = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read configuration {path}"))?;
            WebArConfig::from_toml(&toml)?
        }
        None => WebArConfig::default(),
    };
    if config.anchor.offset_scale == 0.0 {
        config.anchor.offset_scale = CUBE_SIZE / 2.0;
    }

    let office = Adf::new("office", 1_490_000_000_000);
    let display = ScriptedDisplay::new(1024)
        .with_pose(Pose::new(
            (0.0, 1.6, 0.0),
            Quaternion::from_rotation_x(-0.6),
        ))
        .with_field_of_view(60.0, 9.0 / 16.0)
        .with_points(room_points())
        // Floor and the wall in front.
        .with_surface(PlaneEquation::new(0.0, 1.0, 0.0, 0.0))
        .with_surface(PlaneEquation::from_point_normal(
            Vector3::new(0.0, 0.0, -2.5),
            Vector3::Z,
        ))
        .with_camera(SeeThroughCamera {
            width: 1920,
            height: 1080,
            texture_width: 2048,
            texture_height: 2048,
            focal_length_x: 1500.0,
            focal_length_y: 1500.0,
            point_x: 955.0,
            point_y: 545.0,
            orientation: Rotation::Deg90,
        })
        .with_adf(office.clone());

    let mut session = WebArSession::new(display, config);
    session.display_mut().enable_adf(office.uuid)?;
    session.update_point_cloud()?;
    info!(
        "Point cloud: {} points, bounds {:?}",
        session.point_cloud().vertex_count(),
        session.point_cloud().bounds()
    );

    let mesh = session.see_through_mesh(Rotation::Deg0);
    info!("Camera quad uvs: {:?}", mesh.uvs);
    info!("Projection: {:?}", session.projection_matrix(9.0 / 16.0));

    for (x, y) in [(0.5, 0.9), (0.5, 0.2), (0.1, 0.5), (0.5, 0.0)] {
        let mut cube = Pose::IDENTITY;
        match session.place_at(x, y, &mut cube)? {
            Some(anchor) => info!(
                "Tap at ({x}, {y}): cube at {}, facing {}",
                cube.position, anchor.basis.x_axis
            ),
            None => warn!("Tap at ({x}, {y}) hit nothing"),
        }
    }

    let markers = session.display_mut().detect_markers(MarkerType::Ar, 0.1);
    info!("{} AR markers", markers.len());

    Ok(())
}

/// A grid on the floor and one on the wall, in device space.
fn room_points() -> Vec<[f32; 3]> {
    let pose = Pose::new((0.0, 1.6, 0.0), Quaternion::from_rotation_x(-0.6)).inverse();
    let floor = (0..20).flat_map(|i| {
        (0..20).map(move |j| Vector3::new(i as f64 * 0.1 - 1.0, 0.0, j as f64 * -0.1 - 0.5))
    });
    let wall = (0..20).flat_map(|i| {
        (0..10).map(move |j| Vector3::new(i as f64 * 0.1 - 1.0, j as f64 * 0.2, -2.5))
    });
    floor
        .chain(wall)
        .map(|p| pose.transform_point(p).as_vec3().to_array())
        .collect()
}
