//! Boolean hole subtraction through the Manifold kernel.
//!
//! Outer and hole outlines are extruded as Manifold solids; each hole is
//! made slightly taller than the parent so the subtraction always cuts all
//! the way through. Manifold builds its extrusions in the XY plane along
//! +Z, so extracted vertices are remapped into the engine's frame
//! (`(u, v) -> (x, z)`, extrusion along Y, symmetric about the sketch
//! plane).

use glam::{DVec2, Vec3};
use manifold_rs::Manifold;

use crate::geometry::mesh::{push_vertex, MeshData};

/// Extra height added to each end of a hole tool so the cut fully
/// penetrates the parent solid.
const HOLE_OVERSHOOT: f64 = 0.01;

/// Extrude an outer outline with holes subtracted.
///
/// Returns an error when the kernel produces empty geometry at any step;
/// the caller falls back to the unmodified outer solid.
pub fn extrude_with_holes(
    outer: &[DVec2],
    holes: &[Vec<DVec2>],
    depth: f64,
    color: [f32; 3],
) -> Result<MeshData, String> {
    let height = depth.abs();
    if height <= f64::EPSILON {
        return Err("zero extrusion depth".to_string());
    }

    let outer_polygon = flatten(outer);
    let outer_slice: &[f64] = &outer_polygon;
    let mut solid = Manifold::extrude(&[outer_slice], height, 1, 0.0, 1.0, 1.0);
    if solid.is_empty() {
        return Err("outer profile produced empty geometry".to_string());
    }

    for (i, hole) in holes.iter().enumerate() {
        let hole_polygon = flatten(hole);
        let hole_slice: &[f64] = &hole_polygon;
        let tool = Manifold::extrude(
            &[hole_slice],
            height + 2.0 * HOLE_OVERSHOOT,
            1,
            0.0,
            1.0,
            1.0,
        )
        .translate(0.0, 0.0, -HOLE_OVERSHOOT);
        if tool.is_empty() {
            tracing::warn!("hole {i} produced empty tool geometry, skipping");
            continue;
        }

        let cut = solid.difference(&tool);
        if cut.is_empty() {
            return Err(format!("subtraction of hole {i} emptied the solid"));
        }
        solid = cut;
    }

    extract_mesh(&solid, height, color)
}

fn flatten(points: &[DVec2]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Extract flat-shaded mesh data from a Manifold solid, remapping from
/// Manifold's frame (sketch in XY, extrusion 0..height along +Z) into the
/// engine's (sketch in XZ, extrusion along Y, centered).
fn extract_mesh(solid: &Manifold, height: f64, color: [f32; 3]) -> Result<MeshData, String> {
    let mesh = solid.to_mesh();
    let positions = mesh.vertices();
    let indices = mesh.indices();

    if positions.is_empty() || indices.is_empty() {
        return Err("kernel returned an empty mesh".to_string());
    }

    let half = (height / 2.0) as f32;
    let remap = |i: usize| -> Vec3 {
        let x = positions[i * 3];
        let y = positions[i * 3 + 1];
        let z = positions[i * 3 + 2];
        Vec3::new(x, z - half, y)
    };

    let tri_count = indices.len() / 3;
    let mut vertices = Vec::with_capacity(tri_count * 3 * 9);
    let mut new_indices = Vec::with_capacity(tri_count * 3);

    for tri in 0..tri_count {
        let i0 = indices[tri * 3] as usize;
        let i1 = indices[tri * 3 + 1] as usize;
        let i2 = indices[tri * 3 + 2] as usize;

        // The y/z swap mirrors the mesh, so triangles are re-wound to keep
        // their faces outward.
        let p0 = remap(i0);
        let p1 = remap(i2);
        let p2 = remap(i1);

        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

        let base = (tri * 3) as u32;
        for p in [p0, p1, p2] {
            push_vertex(
                &mut vertices,
                [p.x, p.y, p.z],
                [normal.x, normal.y, normal.z],
                color,
            );
        }
        new_indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    Ok(MeshData {
        vertices,
        indices: new_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::Aabb;
    use crate::geometry::outline::{circle, rectangle};
    use crate::geometry::validate::MeshValidator;

    #[test]
    fn plate_with_hole_loses_center_volume() {
        let outer = rectangle([0.0, 0.0], 4.0, 4.0);
        let hole = circle([0.0, 0.0], 1.0);
        let mesh = extrude_with_holes(&outer, &[hole], 1.0, [0.5; 3]).unwrap();

        let validator = MeshValidator::new(&mesh);
        assert!(validator.validate_all().is_empty());

        // Outer dimensions survive.
        let aabb = Aabb::from_mesh(&mesh);
        assert!((aabb.size().x - 4.0).abs() < 1e-3);
        assert!((aabb.size().z - 4.0).abs() < 1e-3);
        assert!((aabb.size().y - 1.0).abs() < 1e-3);

        // The hole's wall ring exists: some vertices sit on the cylinder.
        let on_hole_wall = (0..mesh.vertex_count()).any(|i| {
            let p = mesh.position(i);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            (r - 1.0).abs() < 1e-2
        });
        assert!(on_hole_wall, "no hole wall vertices found");
    }

    #[test]
    fn no_holes_matches_plain_extrusion_bounds() {
        let outer = rectangle([1.0, 2.0], 2.0, 3.0);
        let mesh = extrude_with_holes(&outer, &[], 2.0, [0.5; 3]).unwrap();
        let aabb = Aabb::from_mesh(&mesh);
        assert!((aabb.center().x - 1.0).abs() < 1e-3);
        assert!((aabb.center().z - 2.0).abs() < 1e-3);
        assert!((aabb.center().y).abs() < 1e-3);
    }

    #[test]
    fn swallowing_hole_reports_failure() {
        // A hole larger than the outer profile consumes the whole solid.
        let outer = rectangle([0.0, 0.0], 1.0, 1.0);
        let hole = circle([0.0, 0.0], 5.0);
        assert!(extrude_with_holes(&outer, &[hole], 1.0, [0.5; 3]).is_err());
    }

    #[test]
    fn zero_depth_rejected() {
        let outer = rectangle([0.0, 0.0], 1.0, 1.0);
        assert!(extrude_with_holes(&outer, &[], 0.0, [0.5; 3]).is_err());
    }
}
