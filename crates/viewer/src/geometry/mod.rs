//! Geometric reconstruction primitives: outlines, arcs, edge chaining,
//! extrusion, and mesh buffers.

pub mod arc;
pub mod chain;
pub mod extrude;
pub mod mesh;
pub mod outline;
pub mod validate;
