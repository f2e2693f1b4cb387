//! Reconstruction of B-rep assemblies.
//!
//! Each part's faces are rebuilt loop by loop: loop 0 bounds the face,
//! later loops are holes cut by boolean subtraction. A loop containing a
//! `circle_*` or `cone_*` element is a complete circular primitive and
//! bypasses edge chaining. All face meshes of a part merge into one unit
//! carrying the part's coordinate system.

use cadview_model::{element_kind, BRepAssembly, ElementKind, Loop, Part};
use glam::{DVec2, DVec3};
use tracing::warn;

use super::{csg, swap_storage_axes, unit_color, BuildResult, BuiltUnit};
use crate::geometry::chain::{order_edges, outline_from_edges, SketchEdge};
use crate::geometry::extrude::extrude_outline;
use crate::geometry::mesh::{placeholder_box, MeshData};
use crate::geometry::outline;

/// Build every part of a B-rep assembly, in document order.
pub fn build_brep(doc: &BRepAssembly) -> BuildResult {
    let mut result = BuildResult::default();

    for (id, part) in &doc.parts {
        let unit = build_part(id, part, &mut result.errors);
        result.units.push(unit);
    }

    result
}

fn build_part(id: &str, part: &Part, errors: &mut Vec<(String, String)>) -> BuiltUnit {
    let cs = &part.coordinate_system;
    let extrusion = &part.extrusion;
    let depth = extrusion.extrude_depth_towards_normal;
    let sketch_scale = extrusion.sketch_scale;
    let global_scale = extrusion.global_scale_factor.unwrap_or(1.0);
    let color = unit_color(id, 0);

    let mut part_mesh = MeshData::default();

    for (face_id, face) in &part.sketch {
        let mut outer: Option<Vec<DVec2>> = None;
        let mut holes: Vec<Vec<DVec2>> = Vec::new();

        for (loop_id, loop_edges) in face {
            if loop_edges.is_empty() {
                warn!(part = %id, face = %face_id, loop_id = %loop_id, "empty loop, skipping");
                continue;
            }

            let Some(mut points) = loop_outline(id, face_id, loop_id, loop_edges) else {
                continue;
            };
            outline::scale(&mut points, sketch_scale);

            if outline::is_degenerate(&points) {
                warn!(part = %id, face = %face_id, loop_id = %loop_id, "degenerate loop outline, skipping");
                continue;
            }

            if outer.is_none() {
                outer = Some(points);
            } else {
                holes.push(points);
            }
        }

        let Some(outer) = outer else {
            warn!(part = %id, face = %face_id, "face produced no boundary outline");
            continue;
        };

        let face_mesh = if holes.is_empty() {
            extrude_outline(&outer, depth, color)
        } else {
            match csg::extrude_with_holes(&outer, &holes, depth, color) {
                Ok(mesh) => mesh,
                Err(message) => {
                    warn!(part = %id, face = %face_id, %message, "hole subtraction failed, keeping solid face");
                    extrude_outline(&outer, depth, color)
                }
            }
        };

        part_mesh.append(&face_mesh);
    }

    let placeholder = part_mesh.is_empty();
    if placeholder {
        warn!(part = %id, "no geometry reconstructed, using placeholder");
        errors.push((
            id.to_string(),
            "no geometry could be reconstructed".to_string(),
        ));
        part_mesh = placeholder_box(DVec3::new(sketch_scale, depth, sketch_scale));
    }

    BuiltUnit {
        unit_id: id.to_string(),
        contour_index: None,
        mesh: part_mesh,
        translation: swap_storage_axes(cs.translation_vector),
        rotation_deg: swap_storage_axes(cs.euler_angles),
        scale: DVec3::splat(global_scale),
        init_translation: cs.translation_vector,
        placeholder,
    }
}

/// Outline of one loop. A circle/cone element short-circuits the loop into
/// a full circular primitive; otherwise line and arc edges are chained.
fn loop_outline(part: &str, face: &str, loop_id: &str, edges: &Loop) -> Option<Vec<DVec2>> {
    // Circle and cone elements make the loop a complete primitive.
    for (key, data) in edges {
        match element_kind(key) {
            Some(ElementKind::Circle) | Some(ElementKind::Cone) => {
                return match data.as_circle() {
                    Some(circle) => Some(outline::circle(circle.center, circle.radius)),
                    None => {
                        warn!(part, face, loop_id, element = %key, "circle element missing center or radius");
                        None
                    }
                };
            }
            _ => {}
        }
    }

    let mut chain: Vec<SketchEdge> = Vec::new();
    for (key, data) in edges {
        match element_kind(key) {
            Some(ElementKind::Line) => match data.as_line() {
                Some(line) => chain.push(SketchEdge::Line {
                    start: DVec2::from_array(line.start),
                    end: DVec2::from_array(line.end),
                }),
                None => {
                    warn!(part, face, loop_id, element = %key, "line element missing endpoints, skipping");
                }
            },
            Some(ElementKind::Arc) => match data.as_arc() {
                Some(arc) => chain.push(SketchEdge::Arc {
                    start: DVec2::from_array(arc.start),
                    mid: DVec2::from_array(arc.mid),
                    end: DVec2::from_array(arc.end),
                }),
                None => {
                    warn!(part, face, loop_id, element = %key, "arc element missing points, skipping");
                }
            },
            Some(ElementKind::Circle) | Some(ElementKind::Cone) => {}
            None => {
                warn!(part, face, loop_id, element = %key, "unsupported element type, skipping");
            }
        }
    }

    if chain.is_empty() {
        warn!(part, face, loop_id, "no usable edges in loop");
        return None;
    }

    let ordered = order_edges(&chain);
    Some(outline_from_edges(&ordered))
}
