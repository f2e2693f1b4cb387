//! Viewport-facing math: the orbit camera, ray picking, and the 3-axis
//! manipulation handle with its selection/drag controller.

pub mod camera;
pub mod controller;
pub mod gizmo;
pub mod picking;
