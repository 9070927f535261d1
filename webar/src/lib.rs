//! Scene helpers on top of the WebAR device API: point cloud buffers, the see-through camera quad
//! and projection, and anchoring objects on picked surfaces.

pub mod anchor;
pub mod config;
pub mod point_cloud;
pub mod see_through;
mod session;

pub use anchor::{
    AnchorError, AnchorTarget, OrientedAnchor, compute_anchor_pose, place_on_surface,
    try_compute_anchor_pose,
};
pub use config::WebArConfig;
pub use point_cloud::{PointCloudGeometry, PointCloudMode};
pub use see_through::{SeeThroughMesh, see_through_frustum, see_through_projection};
pub use session::*;

pub use webar_device as device;
pub use webar_geometry as geometry;
