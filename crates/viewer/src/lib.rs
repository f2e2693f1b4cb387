//! cadview engine: reconstructs 3D geometry from JSON CAD documents and
//! drives the axis-constrained drag protocol against an orbit camera.
//!
//! The GPU display layer and the text-editor widget are external
//! collaborators; this crate exposes mesh buffers, camera math, and a
//! headless editor buffer at those seams. See [`viewer::Viewer`] for the
//! coordinator that ties the pieces together.

pub mod build;
pub mod document;
pub mod fixtures;
pub mod generate;
pub mod geometry;
pub mod scene;
pub mod viewer;
pub mod viewport;

pub use viewer::{Viewer, ViewerError};
