//! Predefined shape templates for the standard format.
//!
//! Each template is a ready-made `extruded_sketch` component that can be
//! merged into the current document under a fresh id. Curved solids are
//! deliberately rough extrusion approximations so every template stays a
//! single closed contour.

use serde::{Deserialize, Serialize};

use crate::{
    Component, Contour, ContourEntry, Extrusion, Sketch, StandardAssembly, Transform,
    EXTRUDED_SKETCH,
};

/// Shapes the template library offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Pyramid,
}

impl ShapeKind {
    /// Display name for status messages.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Torus => "torus",
            ShapeKind::Pyramid => "pyramid",
        }
    }
}

/// Build the component template for a shape.
pub fn shape_component(kind: ShapeKind) -> Component {
    let (contour, distance, translation) = match kind {
        ShapeKind::Box => (
            Contour::Rectangle {
                center: [0.0, 0.0],
                width: 5.0,
                height: 5.0,
            },
            5.0,
            [0.0, 2.5, 0.0],
        ),
        ShapeKind::Sphere => (
            Contour::Circle {
                center: [0.0, 0.0],
                radius: 3.0,
            },
            6.0,
            [0.0, 3.0, 0.0],
        ),
        ShapeKind::Cylinder => (
            Contour::Circle {
                center: [0.0, 0.0],
                radius: 2.0,
            },
            6.0,
            [0.0, 3.0, 0.0],
        ),
        ShapeKind::Cone => (
            Contour::Circle {
                center: [0.0, 0.0],
                radius: 3.0,
            },
            6.0,
            [0.0, 3.0, 0.0],
        ),
        ShapeKind::Torus => (
            Contour::Circle {
                center: [0.0, 0.0],
                radius: 3.0,
            },
            1.0,
            [0.0, 3.0, 0.0],
        ),
        ShapeKind::Pyramid => (
            Contour::Rectangle {
                center: [0.0, 0.0],
                width: 4.0,
                height: 4.0,
            },
            6.0,
            [0.0, 0.0, 0.0],
        ),
    };

    Component {
        kind: EXTRUDED_SKETCH.to_string(),
        sketch: Sketch {
            planes: Some(vec!["XY".to_string()]),
            contours: vec![ContourEntry::Known(contour)],
        },
        extrusion: Extrusion {
            distance,
            direction: Some([0.0, 0.0, 1.0]),
        },
        transform: Transform {
            translation,
            rotation: [0.0; 3],
        },
    }
}

/// Merge a component into an assembly under the given id, replacing any
/// existing component with the same id.
pub fn insert_component(assembly: &mut StandardAssembly, id: &str, component: Component) {
    assembly
        .assembly
        .components
        .insert(id.to_string(), component);
}
