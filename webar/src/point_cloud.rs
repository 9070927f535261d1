//! Vertex buffers that follow the device point cloud frame by frame.

use anyhow::Result;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use webar_device::{ArDisplay, PointCloud, PointCloudRequest};
use webar_geometry::{Bounds3, Color, Matrix4};

/// Positions that are not part of the current cloud. Renderers discard them.
pub const HIDDEN_POSITION: f32 = f32::INFINITY;

/// How the positions buffer relates to the device's point cloud frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointCloudMode {
    /// The geometry keeps its own positions and copies the valid points of each frame into them.
    #[default]
    Copy,
    /// The positions are the device frame itself. Unused slots keep the device's padding value.
    Direct,
}

#[derive(Debug)]
enum Positions {
    /// No display, a fixed quad of four points in front of the viewer.
    Placeholder(Vec<f32>),
    Copy { positions: Vec<f32>, frame: PointCloud },
    Direct(PointCloud),
}

/// Position and color buffers of a point cloud, ready to be rendered as points.
#[derive(Debug)]
pub struct PointCloudGeometry {
    positions: Positions,
    colors: Vec<f32>,
    last_vertex_count: usize,
    needs_update: bool,
}

impl PointCloudGeometry {
    pub const COLOR: Color = Color::WHITE;

    pub fn for_display(display: &impl ArDisplay, mode: PointCloudMode) -> Self {
        let mut frame = display.new_point_cloud();
        frame.points.fill(HIDDEN_POSITION);
        debug!(
            "Point cloud geometry for {} points ({mode:?})",
            frame.capacity()
        );

        let positions = match mode {
            PointCloudMode::Copy => Positions::Copy {
                positions: frame.points.clone(),
                frame,
            },
            PointCloudMode::Direct => Positions::Direct(frame),
        };
        Self::new(positions)
    }

    pub fn placeholder() -> Self {
        Self::new(Positions::Placeholder(vec![
            -1.0, 1.0, -2.0, //
            1.0, 1.0, -2.0, //
            1.0, -1.0, -2.0, //
            -1.0, -1.0, -2.0,
        ]))
    }

    fn new(positions: Positions) -> Self {
        let mut geometry = Self {
            positions,
            colors: Vec::new(),
            last_vertex_count: 0,
            needs_update: true,
        };
        let len = geometry.positions().len();
        geometry.colors = Self::COLOR.to_array().repeat(len / 3);
        geometry.last_vertex_count = match &geometry.positions {
            Positions::Placeholder(p) => p.len() / 3,
            _ => 0,
        };
        geometry
    }

    /// Pulls the next frame from `display`.
    ///
    /// In copy mode a frame without points leaves the buffer as it is.
    pub fn update(
        &mut self,
        display: &mut impl ArDisplay,
        request: PointCloudRequest,
    ) -> Result<()> {
        match &mut self.positions {
            Positions::Placeholder(_) => {}
            Positions::Copy { positions, frame } => {
                display.get_point_cloud(frame, request)?;
                if frame.number_of_points > 0 {
                    let vertex_count = frame.number_of_points.min(positions.len() / 3);
                    let value_count = vertex_count * 3;
                    positions[..value_count].copy_from_slice(&frame.points[..value_count]);
                    let last_value_count = self.last_vertex_count * 3;
                    if last_value_count > value_count {
                        positions[value_count..last_value_count].fill(HIDDEN_POSITION);
                    }
                    trace!(
                        "Point cloud copied: {vertex_count} points, {} before",
                        self.last_vertex_count
                    );
                    self.last_vertex_count = vertex_count;
                    self.needs_update = true;
                }
            }
            Positions::Direct(frame) => {
                display.get_point_cloud(frame, request)?;
                self.last_vertex_count = frame.number_of_points.min(frame.capacity());
                self.needs_update = true;
            }
        }
        Ok(())
    }

    /// `x, y, z` per vertex. Slots beyond [`Self::vertex_count`] are hidden.
    pub fn positions(&self) -> &[f32] {
        match &self.positions {
            Positions::Placeholder(positions) => positions,
            Positions::Copy { positions, .. } => positions,
            Positions::Direct(frame) => &frame.points,
        }
    }

    /// `r, g, b` per vertex.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Number of valid vertices at the start of [`Self::positions`].
    pub fn vertex_count(&self) -> usize {
        self.last_vertex_count
    }

    /// True once after the positions changed.
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }

    /// The matrix that moves the positions into world space.
    pub fn points_transform_matrix(&self) -> Matrix4 {
        match &self.positions {
            Positions::Placeholder(_) => Matrix4::IDENTITY,
            Positions::Copy { frame, .. } | Positions::Direct(frame) => {
                frame.points_transform_matrix
            }
        }
    }

    /// Bounds of the valid positions, before [`Self::points_transform_matrix`].
    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_triplets(&self.positions()[..self.vertex_count() * 3])
    }
}
