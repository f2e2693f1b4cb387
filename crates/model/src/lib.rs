//! Document schema layer for the cadview ecosystem.
//!
//! Two JSON schemas describe a model: the standard sketch-extrusion assembly
//! format (`assembly.components`) and the B-rep face/loop/edge format
//! (`parts` / `final_name`). Neither carries a version or format tag, so the
//! format is inferred from the top-level keys by [`Document::classify`].
//!
//! The schema is purely declarative — no mesh data, just contours, edges and
//! transforms. Reconstruction into geometry is handled by the viewer crate.

mod brep;
mod standard;

pub mod shapes;

pub use brep::{
    element_kind, ArcEdge, BRepAssembly, BRepExtrusion, CirclePrimitive, CoordinateSystem,
    EdgeData, ElementKind, Face, LineEdge, Loop, Part,
};
pub use standard::{
    Assembly, Component, Contour, ContourEntry, Extrusion, Sketch, StandardAssembly, Transform,
    EXTRUDED_SKETCH,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier of a standard-format component.
pub type ComponentId = String;

/// Unique identifier of a B-rep part.
pub type PartId = String;

/// Errors raised by document parsing and classification.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not valid JSON or does not match the schema it claimed.
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Neither `assembly.components` nor `parts`/`final_name` is present.
    #[error("unrecognized document shape: expected `assembly.components` or `parts`")]
    UnrecognizedFormat,
}

/// Which of the two schemas a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Sketch-extrusion assembly (`assembly.components`).
    Standard,
    /// Boundary-representation parts (`parts` / `final_name`).
    BRep,
}

impl DocumentFormat {
    /// Human-readable format name for status display.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Standard => "standard assembly",
            DocumentFormat::BRep => "B-rep assembly",
        }
    }
}

/// A parsed model document — a tagged union over the two schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    /// Standard sketch-extrusion assembly.
    Standard(StandardAssembly),
    /// B-rep face/loop/edge assembly.
    BRep(BRepAssembly),
}

impl Document {
    /// Classify a JSON value as one of the two formats.
    ///
    /// `assembly.components` wins when both shapes are somehow present.
    /// A value matching neither shape is an error, never a silent
    /// fallthrough.
    pub fn classify(value: &serde_json::Value) -> Result<DocumentFormat, DocumentError> {
        if value
            .get("assembly")
            .and_then(|a| a.get("components"))
            .is_some()
        {
            return Ok(DocumentFormat::Standard);
        }
        if value.get("parts").is_some() || value.get("final_name").is_some() {
            return Ok(DocumentFormat::BRep);
        }
        Err(DocumentError::UnrecognizedFormat)
    }

    /// Parse a document from an already-parsed JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DocumentError> {
        match Self::classify(value)? {
            DocumentFormat::Standard => Ok(Document::Standard(serde_json::from_value(
                value.clone(),
            )?)),
            DocumentFormat::BRep => Ok(Document::BRep(serde_json::from_value(value.clone())?)),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Serialize to pretty JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The document's format.
    pub fn format(&self) -> DocumentFormat {
        match self {
            Document::Standard(_) => DocumentFormat::Standard,
            Document::BRep(_) => DocumentFormat::BRep,
        }
    }

    /// Summary statistics for status display.
    pub fn stats(&self) -> DocumentStats {
        match self {
            Document::Standard(doc) => {
                let contour_count = doc
                    .assembly
                    .components
                    .values()
                    .map(|c| c.sketch.contours.len())
                    .sum();
                DocumentStats {
                    format: DocumentFormat::Standard,
                    unit_count: doc.assembly.components.len(),
                    contour_count,
                    name: None,
                }
            }
            Document::BRep(doc) => {
                let contour_count = doc
                    .parts
                    .values()
                    .map(|p| p.sketch.values().map(|f| f.len()).sum::<usize>())
                    .sum();
                DocumentStats {
                    format: DocumentFormat::BRep,
                    unit_count: doc.parts.len(),
                    contour_count,
                    name: doc.final_name.clone(),
                }
            }
        }
    }
}

/// Summary counts for a loaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStats {
    /// Detected format.
    pub format: DocumentFormat,
    /// Number of components or parts.
    pub unit_count: usize,
    /// Total number of contours (standard) or face loops (B-rep).
    pub contour_count: usize,
    /// Model name, when the document carries one.
    pub name: Option<String>,
}
