#![allow(dead_code)]
use std::path::Path;

use mesh_remap::algs::distribute::{DecomposedPiece, distribute_mesh, partition_by_axis};
use mesh_remap::data::tensor::SymmTensor;
use mesh_remap::io::case::DecomposedCase;
use mesh_remap::mesh_generation::{BlockSpec, block_mesh};
use mesh_remap::topology::poly_mesh::PolyMesh;

/// Unit-cell block of `nx × ny × nz` cells.
pub fn block(cells: [usize; 3]) -> PolyMesh {
    block_mesh(&BlockSpec::new(cells)).unwrap()
}

/// Slab decomposition of `mesh` along x into `n_parts` pieces.
pub fn slabs(mesh: &PolyMesh, n_parts: usize) -> Vec<DecomposedPiece> {
    let parts = partition_by_axis(mesh, 0, n_parts);
    distribute_mesh(mesh, &parts, n_parts).unwrap()
}

/// Write a slab-decomposed case under `root`.
pub fn slab_case(root: &Path, mesh: &PolyMesh, n_parts: usize) -> DecomposedCase {
    DecomposedCase::create(root, &slabs(mesh, n_parts)).unwrap()
}

/// `diag(v, v, v)`.
pub fn diag(v: f64) -> SymmTensor {
    SymmTensor::IDENTITY * v
}

/// Componentwise closeness for tensors.
pub fn assert_tensor_close(got: &SymmTensor, want: &SymmTensor) {
    let d = *got - *want;
    assert!(
        d.double_dot(&d).sqrt() < 1e-10,
        "tensor mismatch\n got={got:?}\nwant={want:?}"
    );
}
