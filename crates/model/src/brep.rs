//! B-rep face/loop/edge assembly schema.
//!
//! The B-rep format stores each part as a nested map: face id → loop id →
//! edge id → edge data. Edge ids carry the element type as a key prefix
//! (`line_*`, `arc_*`, `circle_*`, `cone_*`); the values themselves are
//! untagged field bags with spaced key names ("Start Point", "Radius").

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::PartId;

/// Root of a B-rep document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BRepAssembly {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_shape: Option<String>,
    /// Parts keyed by id, iterated in insertion order.
    #[serde(default)]
    pub parts: IndexMap<PartId, Part>,
}

/// A B-rep part: a placed, extruded sketch of faces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub coordinate_system: CoordinateSystem,
    /// Face id → loop id → edge id → edge data. Loop 0 is the outer
    /// boundary of its face; later loops are holes.
    #[serde(default)]
    pub sketch: IndexMap<String, Face>,
    #[serde(default)]
    pub extrusion: BRepExtrusion,
}

/// A face: loops in document order, each a set of edges.
pub type Face = IndexMap<String, Loop>;

/// A loop: edge elements keyed by prefixed id.
pub type Loop = IndexMap<String, EdgeData>;

/// Part placement. Both vectors use the storage axis order `[x, z, y]`
/// relative to render space — indices 1 and 2 are exchanged on load and on
/// write-back. This is a load-bearing convention of the format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordinateSystem {
    #[serde(rename = "Euler Angles", default)]
    pub euler_angles: [f64; 3],
    #[serde(rename = "Translation Vector", default)]
    pub translation_vector: [f64; 3],
}

/// Extrusion parameters for a B-rep part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BRepExtrusion {
    #[serde(default = "default_depth")]
    pub extrude_depth_towards_normal: f64,
    #[serde(default = "default_scale")]
    pub sketch_scale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_scale_factor: Option<f64>,
}

impl Default for BRepExtrusion {
    fn default() -> Self {
        Self {
            extrude_depth_towards_normal: default_depth(),
            sketch_scale: default_scale(),
            global_scale_factor: None,
        }
    }
}

fn default_depth() -> f64 {
    1.0
}

fn default_scale() -> f64 {
    1.0
}

/// Raw edge element data. Which fields are meaningful depends on the
/// element kind carried by the edge's key prefix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(rename = "Start Point", default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<[f64; 2]>,
    #[serde(rename = "End Point", default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<[f64; 2]>,
    #[serde(rename = "Mid Point", default, skip_serializing_if = "Option::is_none")]
    pub mid_point: Option<[f64; 2]>,
    #[serde(rename = "Center", default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(rename = "Radius", default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Element kind, derived from the edge id's key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Line,
    Arc,
    /// Full circle — the loop is a complete circular primitive.
    Circle,
    /// Cone base — treated as a full circular primitive as well.
    Cone,
}

/// Classify an edge id by its key prefix. Unknown prefixes return `None`
/// and are skipped by the reconstruction engine.
pub fn element_kind(key: &str) -> Option<ElementKind> {
    if key.starts_with("line_") {
        Some(ElementKind::Line)
    } else if key.starts_with("arc_") {
        Some(ElementKind::Arc)
    } else if key.starts_with("circle_") {
        Some(ElementKind::Circle)
    } else if key.starts_with("cone_") {
        Some(ElementKind::Cone)
    } else {
        None
    }
}

/// A line edge with both endpoints present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEdge {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

/// An arc edge through three points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEdge {
    pub start: [f64; 2],
    pub mid: [f64; 2],
    pub end: [f64; 2],
}

/// A full circle (or cone base) primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: [f64; 2],
    pub radius: f64,
}

impl EdgeData {
    /// Extract a line edge, if both endpoints are present.
    pub fn as_line(&self) -> Option<LineEdge> {
        Some(LineEdge {
            start: self.start_point?,
            end: self.end_point?,
        })
    }

    /// Extract an arc edge, if all three points are present.
    pub fn as_arc(&self) -> Option<ArcEdge> {
        Some(ArcEdge {
            start: self.start_point?,
            mid: self.mid_point?,
            end: self.end_point?,
        })
    }

    /// Extract a circle primitive, if center and radius are present.
    pub fn as_circle(&self) -> Option<CirclePrimitive> {
        Some(CirclePrimitive {
            center: self.center?,
            radius: self.radius?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_kind_prefixes() {
        assert_eq!(element_kind("line_1"), Some(ElementKind::Line));
        assert_eq!(element_kind("arc_12"), Some(ElementKind::Arc));
        assert_eq!(element_kind("circle_1"), Some(ElementKind::Circle));
        assert_eq!(element_kind("cone_3"), Some(ElementKind::Cone));
        assert_eq!(element_kind("ellipse_1"), None);
        assert_eq!(element_kind("spline_1"), None);
    }

    #[test]
    fn edge_data_spaced_keys() {
        let json = r#"{
            "Start Point": [0.0, 0.0],
            "End Point": [1.0, 0.0]
        }"#;
        let edge: EdgeData = serde_json::from_str(json).unwrap();
        let line = edge.as_line().unwrap();
        assert_eq!(line.start, [0.0, 0.0]);
        assert_eq!(line.end, [1.0, 0.0]);
        assert!(edge.as_arc().is_none());
        assert!(edge.as_circle().is_none());
    }

    #[test]
    fn arc_needs_all_three_points() {
        let json = r#"{
            "Start Point": [0.0, 0.0],
            "Mid Point": [0.5, 0.5],
            "End Point": [1.0, 0.0]
        }"#;
        let edge: EdgeData = serde_json::from_str(json).unwrap();
        let arc = edge.as_arc().unwrap();
        assert_eq!(arc.mid, [0.5, 0.5]);
    }

    #[test]
    fn circle_primitive_fields() {
        let json = r#"{ "Center": [1.0, 1.0], "Radius": 2.0 }"#;
        let edge: EdgeData = serde_json::from_str(json).unwrap();
        let circle = edge.as_circle().unwrap();
        assert_eq!(circle.center, [1.0, 1.0]);
        assert_eq!(circle.radius, 2.0);
    }

    #[test]
    fn edge_data_roundtrip_skips_absent_fields() {
        let edge = EdgeData {
            center: Some([1.0, 1.0]),
            radius: Some(2.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&edge).unwrap();
        assert!(json.contains("Center"));
        assert!(!json.contains("Start Point"));
        let restored: EdgeData = serde_json::from_str(&json).unwrap();
        assert_eq!(edge, restored);
    }

    #[test]
    fn extrusion_defaults() {
        let extrusion: BRepExtrusion = serde_json::from_str("{}").unwrap();
        assert_eq!(extrusion.extrude_depth_towards_normal, 1.0);
        assert_eq!(extrusion.sketch_scale, 1.0);
        assert!(extrusion.global_scale_factor.is_none());
    }

    #[test]
    fn loops_preserve_document_order() {
        let json = r#"{
            "loop_1": { "line_1": { "Start Point": [0,0], "End Point": [1,0] } },
            "loop_2": { "circle_1": { "Center": [0.5, 0.5], "Radius": 0.2 } }
        }"#;
        let face: Face = serde_json::from_str(json).unwrap();
        let keys: Vec<&String> = face.keys().collect();
        assert_eq!(keys, ["loop_1", "loop_2"]);
    }
}
