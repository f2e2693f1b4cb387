//! The 3-axis manipulation handle: axis affordances, hit testing, and the
//! line geometry handed to the display layer.

use glam::DVec3;

use super::picking::{ray_segment_distance, Ray};
use crate::geometry::mesh::LineMeshData;

/// Handle arm length in world units.
pub const GIZMO_LENGTH: f64 = 2.0;

/// Maximum ray-to-arm distance that still counts as a hit.
const HIT_THRESHOLD: f64 = 0.15;

/// One of the three world axes the handle can drag along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector of this world axis.
    pub fn unit(&self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// Component index in render-space order.
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Index of this axis in B-rep storage order ([x, z, y]).
    pub fn storage_index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 2,
            Axis::Z => 1,
        }
    }

    /// Display color of this axis (red/green/blue).
    pub fn color(&self) -> [f32; 4] {
        match self {
            Axis::X => [0.9, 0.2, 0.2, 1.0],
            Axis::Y => [0.2, 0.8, 0.2, 1.0],
            Axis::Z => [0.2, 0.3, 0.9, 1.0],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Test if a ray hits one of the handle's axis arms.
/// Returns the axis whose arm passes closest within the hit threshold.
pub fn gizmo_hit_test(ray: &Ray, center: DVec3, axis_length: f64) -> Option<Axis> {
    let axes = [Axis::X, Axis::Y, Axis::Z];

    let mut best: Option<(Axis, f64)> = None;
    for axis in axes {
        let arm_end = center + axis.unit() * axis_length;
        let dist = ray_segment_distance(ray, center, arm_end);
        if dist < HIT_THRESHOLD && best.is_none_or(|(_, d)| dist < d) {
            best = Some((axis, dist));
        }
    }

    best.map(|(axis, _)| axis)
}

/// Floating on-screen label showing the distance dragged along an axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceLabel {
    pub visible: bool,
    pub axis: Option<Axis>,
    /// Signed distance along the active axis.
    pub value: f64,
}

impl DistanceLabel {
    pub fn show(&mut self, axis: Axis, value: f64) {
        self.visible = true;
        self.axis = Some(axis);
        self.value = value;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.axis = None;
        self.value = 0.0;
    }

    /// Label text, e.g. `Y: 2.50`.
    pub fn text(&self) -> Option<String> {
        let axis = self.axis?;
        self.visible
            .then(|| format!("{}: {:.2}", axis.label(), self.value))
    }
}

/// Build the handle's line mesh at the given center point.
pub fn build_gizmo_lines(center: DVec3, length: f64) -> LineMeshData {
    let mut vertices = Vec::new();
    let arrow = length * 0.15;

    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let color = axis.color();
        let dir = axis.unit();
        let tip = center + dir * length;

        push_line_vert(&mut vertices, center, color);
        push_line_vert(&mut vertices, tip, color);

        // Arrowhead: two short barbs perpendicular to the arm.
        let side = match axis {
            Axis::X => DVec3::Y,
            Axis::Y => DVec3::X,
            Axis::Z => DVec3::Y,
        };
        for sign in [0.5, -0.5] {
            push_line_vert(&mut vertices, tip, color);
            push_line_vert(&mut vertices, tip - dir * arrow + side * (arrow * sign), color);
        }
    }

    LineMeshData { vertices }
}

fn push_line_vert(vertices: &mut Vec<f32>, p: DVec3, color: [f32; 4]) {
    vertices.extend_from_slice(&[
        p.x as f32, p.y as f32, p.z as f32, color[0], color[1], color[2], color[3],
    ]);
}
