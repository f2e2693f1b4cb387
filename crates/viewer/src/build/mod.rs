//! Model document adapter: dispatches each unit of a parsed document to
//! the reconstruction engine and collects meshes ready for the scene
//! registry.

mod brep;
mod csg;
mod standard;

pub use brep::build_brep;
pub use standard::build_standard;

use cadview_model::Document;
use glam::DVec3;

use crate::geometry::mesh::MeshData;

/// One reconstructed unit: a mesh plus its document back-reference and
/// initial pose.
pub struct BuiltUnit {
    /// Originating component or part id.
    pub unit_id: String,
    /// Contour index within the component (standard format only).
    pub contour_index: Option<usize>,
    pub mesh: MeshData,
    /// Render-space translation from the unit's transform.
    pub translation: DVec3,
    /// Render-space Euler rotation, degrees, order X,Y,Z.
    pub rotation_deg: DVec3,
    /// Uniform render scale (B-rep `global_scale_factor`).
    pub scale: DVec3,
    /// The unit's translation exactly as stored in the JSON document
    /// (B-rep storage order), snapshotted for patch arithmetic.
    pub init_translation: [f64; 3],
    /// True when reconstruction failed and this is the fallback solid.
    pub placeholder: bool,
}

/// Result of rebuilding a whole document.
#[derive(Default)]
pub struct BuildResult {
    pub units: Vec<BuiltUnit>,
    /// Per-unit failure descriptions (the unit still carries a placeholder).
    pub errors: Vec<(String, String)>,
}

/// Reconstruct every unit of a document. Never fails as a whole: bad
/// elements are skipped and failed units become placeholders.
pub fn build_document(document: &Document) -> BuildResult {
    match document {
        Document::Standard(doc) => build_standard(doc),
        Document::BRep(doc) => build_brep(doc),
    }
}

/// Deterministic muted fill color for a unit: each channel lands in the
/// `0.3 + 0.4 * t` band, seeded from the unit id and contour index.
pub fn unit_color(unit_id: &str, index: usize) -> [f32; 3] {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in unit_id.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    h ^= index as u64;
    h = mix(h);

    let channel = |shift: u32| 0.3 + 0.4 * (((h >> shift) & 0xffff) as f32 / 65535.0);
    [channel(0), channel(16), channel(32)]
}

fn mix(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ceb9fe1a85ec53);
    h ^= h >> 33;
    h
}

/// Remap a stored B-rep vector into render space: storage order is
/// `[x, z, y]`, so indices 1 and 2 are exchanged.
pub fn swap_storage_axes(v: [f64; 3]) -> DVec3 {
    DVec3::new(v[0], v[2], v[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_color_deterministic_and_muted() {
        let a = unit_color("part_1", 0);
        let b = unit_color("part_1", 0);
        assert_eq!(a, b);
        for c in a {
            assert!((0.3..=0.7).contains(&c), "channel out of band: {c}");
        }
    }

    #[test]
    fn unit_color_varies_by_id_and_index() {
        assert_ne!(unit_color("part_1", 0), unit_color("part_2", 0));
        assert_ne!(unit_color("part_1", 0), unit_color("part_1", 1));
    }

    #[test]
    fn storage_axis_swap() {
        let v = swap_storage_axes([1.0, 2.0, 3.0]);
        assert_eq!(v, DVec3::new(1.0, 3.0, 2.0));
    }
}
