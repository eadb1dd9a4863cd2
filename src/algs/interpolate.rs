//! Cell-to-face interpolation.
//!
//! # Example
//! ```rust
//! # fn try_main() -> Result<(), mesh_remap::mesh_error::MeshRemapError> {
//! use mesh_remap::algs::interpolate::interpolate_linear;
//! use mesh_remap::data::field::VolField;
//! use mesh_remap::mesh_generation::{BlockSpec, block_mesh};
//!
//! let mesh = block_mesh(&BlockSpec::new([2, 1, 1]))?;
//! let mut cells = VolField::<f64>::zeros(&mesh);
//! cells.internal_mut().copy_from_slice(&[1.0, 3.0]);
//! let faces = interpolate_linear(&mesh, &cells);
//! assert_eq!(faces.internal(), &[2.0]);
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

use crate::data::field::{FieldValue, SurfaceField, VolField};
use crate::topology::poly_mesh::PolyMesh;

/// Linear interpolation of a cell field onto faces.
///
/// Internal faces blend owner and neighbour with
/// [`PolyMesh::linear_weight`]; boundary faces take the cell field's own
/// boundary values.
pub fn interpolate_linear<T: FieldValue>(mesh: &PolyMesh, field: &VolField<T>) -> SurfaceField<T> {
    let cells = field.internal();
    let internal = (0..mesh.n_internal_faces())
        .map(|face| interpolate_face(mesh, cells, face))
        .collect();
    SurfaceField::new(internal, field.boundary().to_vec())
}

/// Linear interpolation of `cells` on internal face `face`.
#[inline]
pub fn interpolate_face<T: FieldValue>(mesh: &PolyMesh, cells: &[T], face: usize) -> T {
    let own = &cells[mesh.owner()[face]];
    let nei = &cells[mesh.neighbour()[face]];
    T::lerp(mesh.linear_weight(face), own, nei)
}
