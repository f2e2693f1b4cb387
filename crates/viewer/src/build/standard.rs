//! Reconstruction of standard-format assemblies.
//!
//! Each contour of each component becomes one independent mesh carrying
//! the parent component's id, so every contour can be picked and dragged
//! on its own.

use cadview_model::{Contour, StandardAssembly, EXTRUDED_SKETCH};
use glam::{DVec2, DVec3};
use tracing::warn;

use super::{unit_color, BuildResult, BuiltUnit};
use crate::geometry::extrude::extrude_outline;
use crate::geometry::outline;

/// Build every component of a standard assembly, in document order.
pub fn build_standard(doc: &StandardAssembly) -> BuildResult {
    let mut result = BuildResult::default();

    for (id, component) in &doc.assembly.components {
        if component.kind != EXTRUDED_SKETCH {
            warn!(component = %id, kind = %component.kind, "unsupported component type, skipping");
            continue;
        }

        let distance = component.extrusion.distance;
        let transform = &component.transform;

        for (index, entry) in component.sketch.contours.iter().enumerate() {
            let Some(contour) = entry.known() else {
                warn!(
                    component = %id,
                    contour = index,
                    kind = entry.unknown_kind().unwrap_or("?"),
                    "unsupported contour type, skipping"
                );
                continue;
            };

            let Some(points) = contour_outline(contour) else {
                warn!(component = %id, contour = index, "contour cannot form an outline, skipping");
                continue;
            };

            if outline::is_degenerate(&points) {
                warn!(component = %id, contour = index, "degenerate contour, skipping");
                continue;
            }

            let color = unit_color(id, index);
            let mesh = extrude_outline(&points, distance, color);

            result.units.push(BuiltUnit {
                unit_id: id.clone(),
                contour_index: Some(index),
                mesh,
                translation: DVec3::from_array(transform.translation),
                rotation_deg: DVec3::from_array(transform.rotation),
                scale: DVec3::ONE,
                init_translation: transform.translation,
                placeholder: false,
            });
        }
    }

    result
}

/// Outline points of a recognized contour, if it can bound a profile.
fn contour_outline(contour: &Contour) -> Option<Vec<DVec2>> {
    match contour {
        Contour::Rectangle {
            center,
            width,
            height,
        } => Some(outline::rectangle(*center, *width, *height)),
        Contour::Circle { center, radius } => Some(outline::circle(*center, *radius)),
        Contour::Polyline { points, closed } => {
            if !closed || points.len() <= 2 {
                return None;
            }
            Some(outline::polyline(points))
        }
    }
}
