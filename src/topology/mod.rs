//! Mesh topology and cross-decomposition addressing.
//!
//! - [`addressing`]: partition addressing arrays and their inverses
//! - [`decomposition_map`]: entity maps between two meshes
//! - [`poly_mesh`]: the polyhedral mesh of one subdomain

pub mod addressing;
pub mod decomposition_map;
pub mod poly_mesh;

pub use addressing::{
    InverseAddressing, Label, ProcAddressing, UNMAPPED, invert_addressing, normalize_face_signs,
};
pub use decomposition_map::{DecompositionMap, PairMaps};
pub use poly_mesh::{BoundaryPatch, PatchKind, PolyMesh, PolyMeshParts};
