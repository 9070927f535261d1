//! The WebAR device surface: records a display hands out and the [`ArDisplay`] trait describing
//! what it can do.

mod adf;
mod capabilities;
mod display;
mod marker;
mod picking;
mod point_cloud;
mod scripted;
mod see_through_camera;

pub use adf::*;
pub use capabilities::*;
pub use display::*;
pub use marker::*;
pub use picking::*;
pub use point_cloud::*;
pub use scripted::*;
pub use see_through_camera::*;
