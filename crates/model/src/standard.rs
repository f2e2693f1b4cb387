//! Standard sketch-extrusion assembly schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ComponentId;

/// The only component kind the standard format defines.
pub const EXTRUDED_SKETCH: &str = "extruded_sketch";

/// Root of a standard-format document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardAssembly {
    pub assembly: Assembly,
}

/// Assembly container: named components in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assembly {
    /// Components keyed by id, iterated in insertion order.
    #[serde(default)]
    pub components: IndexMap<ComponentId, Component>,
}

/// A single assembly component: a 2D sketch extruded into a solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component kind tag, expected to be [`EXTRUDED_SKETCH`].
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub sketch: Sketch,
    #[serde(default)]
    pub extrusion: Extrusion,
    #[serde(default)]
    pub transform: Transform,
}

/// A 2D sketch: a set of closed contours.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sketch {
    /// Sketch plane names (informational, e.g. `["XY"]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planes: Option<Vec<String>>,
    #[serde(default)]
    pub contours: Vec<ContourEntry>,
}

/// A contour entry: either a recognized contour or an unknown value.
///
/// Unknown contour types must not fail the whole document parse — they are
/// skipped one by one at reconstruction time, so the raw value is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContourEntry {
    Known(Contour),
    Unknown(serde_json::Value),
}

impl ContourEntry {
    /// The recognized contour, if any.
    pub fn known(&self) -> Option<&Contour> {
        match self {
            ContourEntry::Known(c) => Some(c),
            ContourEntry::Unknown(_) => None,
        }
    }

    /// The `type` tag of an unrecognized contour, for diagnostics.
    pub fn unknown_kind(&self) -> Option<&str> {
        match self {
            ContourEntry::Known(_) => None,
            ContourEntry::Unknown(value) => value.get("type").and_then(|t| t.as_str()),
        }
    }
}

/// A closed 2D outline in sketch coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Contour {
    Rectangle {
        center: [f64; 2],
        width: f64,
        height: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
    },
    Polyline {
        points: Vec<[f64; 2]>,
        #[serde(default)]
        closed: bool,
    },
}

/// Extrusion parameters for a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    /// Extrusion distance along the sketch normal.
    #[serde(default = "default_distance")]
    pub distance: f64,
    /// Extrusion direction (informational; the sketch normal is used).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<[f64; 3]>,
}

impl Default for Extrusion {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            direction: None,
        }
    }
}

fn default_distance() -> f64 {
    1.0
}

/// Component placement: translation in render-space order, Euler degrees X,Y,Z.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub translation: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
}
