//! Outline extrusion into flat-shaded solids.
//!
//! Sketch coordinates map into render space as `(u, v) -> (x, z)` with the
//! extrusion running along +Y (the viewer's up axis), symmetric about the
//! sketch plane: the solid spans `y in [-depth/2, +depth/2]` before the
//! unit's transform is applied.

use glam::DVec2;

use super::mesh::{push_vertex, MeshData, STRIDE};
use super::outline::ensure_ccw;

/// Extrude a closed outline into a solid.
///
/// The outline winding is canonicalized to counter-clockwise so caps and
/// side walls always face outward.
pub fn extrude_outline(outline: &[DVec2], depth: f64, color: [f32; 3]) -> MeshData {
    let mut points = outline.to_vec();
    ensure_ccw(&mut points);

    let n = points.len();
    let half = depth.abs() / 2.0;

    let bottom: Vec<[f32; 3]> = points
        .iter()
        .map(|p| [p.x as f32, (-half) as f32, p.y as f32])
        .collect();
    let top: Vec<[f32; 3]> = points
        .iter()
        .map(|p| [p.x as f32, half as f32, p.y as f32])
        .collect();

    let mut vertices: Vec<f32> = Vec::with_capacity(n * 4 * STRIDE);
    let mut indices: Vec<u32> = Vec::new();

    // Bottom cap (fan triangulation), facing -Y.
    let base = (vertices.len() / STRIDE) as u32;
    for p in &bottom {
        push_vertex(&mut vertices, *p, [0.0, -1.0, 0.0], color);
    }
    for i in 1..(n - 1) {
        indices.extend_from_slice(&[base, base + i as u32, base + (i + 1) as u32]);
    }

    // Top cap, facing +Y.
    let base = (vertices.len() / STRIDE) as u32;
    for p in &top {
        push_vertex(&mut vertices, *p, [0.0, 1.0, 0.0], color);
    }
    for i in 1..(n - 1) {
        indices.extend_from_slice(&[base, base + (i + 1) as u32, base + i as u32]);
    }

    // Side walls: one quad per outline edge, outward face normal.
    for i in 0..n {
        let next = (i + 1) % n;
        let edge = points[next] - points[i];
        let len = edge.length();
        if len < f64::EPSILON {
            continue;
        }
        let normal = [(edge.y / len) as f32, 0.0, (-edge.x / len) as f32];

        let b0 = bottom[i];
        let b1 = bottom[next];
        let t0 = top[i];
        let t1 = top[next];

        let base = (vertices.len() / STRIDE) as u32;
        push_vertex(&mut vertices, b0, normal, color);
        push_vertex(&mut vertices, t0, normal, color);
        push_vertex(&mut vertices, t1, normal, color);
        push_vertex(&mut vertices, b1, normal, color);

        indices.extend_from_slice(&[base, base + 1, base + 2]);
        indices.extend_from_slice(&[base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}
