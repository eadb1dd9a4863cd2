//! Split a whole mesh into subdomain meshes with partition addressing.
//!
//! This is what a decomposition tool produces: one [`PolyMesh`] per
//! subdomain plus `cellProcAddressing` / `faceProcAddressing`. Choosing the
//! cell → subdomain assignment is left to the caller; [`partition_by_axis`]
//! is a simple slab split for demos and tests.

use std::collections::BTreeMap;

use crate::mesh_error::MeshRemapError;
use crate::topology::addressing::Label;
use crate::topology::poly_mesh::{BoundaryPatch, PatchKind, PolyMesh, PolyMeshParts};

/// One subdomain of a decomposed mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct DecomposedPiece {
    pub mesh: PolyMesh,
    /// Original cell index of every local cell.
    pub cell_addressing: Vec<Label>,
    /// `±(original face + 1)`; negative when the face was flipped.
    pub face_addressing: Vec<Label>,
}

/// Name of the processor patch of subdomain `from` facing subdomain `to`.
pub fn processor_patch_name(from: usize, to: usize) -> String {
    format!("procBoundary{from}to{to}")
}

/// Split `mesh` according to `parts[cell]`.
///
/// Per subdomain, faces are laid out as: internal faces (original order),
/// every physical patch of `mesh` (possibly empty), then one processor patch
/// per neighbouring subdomain in ascending order. Processor faces keep the
/// original orientation when the local cell was the original owner and are
/// flipped otherwise.
pub fn distribute_mesh(
    mesh: &PolyMesh,
    parts: &[usize],
    n_parts: usize,
) -> Result<Vec<DecomposedPiece>, MeshRemapError> {
    if parts.len() != mesh.n_cells() {
        return Err(MeshRemapError::FieldSizeMismatch {
            field: "cell partition".into(),
            expected: mesh.n_cells(),
            found: parts.len(),
        });
    }
    if let Some(&p) = parts.iter().find(|p| **p >= n_parts) {
        return Err(MeshRemapError::IndexOutOfBounds {
            what: "subdomain",
            index: p,
            len: n_parts,
        });
    }

    // local index of every cell within its own subdomain
    let mut counts = vec![0usize; n_parts];
    let local_cell: Vec<usize> = parts
        .iter()
        .map(|&p| {
            let idx = counts[p];
            counts[p] += 1;
            idx
        })
        .collect();

    (0..n_parts)
        .map(|part| extract_piece(mesh, parts, &local_cell, part))
        .collect()
}

struct FaceEntry {
    original: usize,
    flipped: bool,
    owner: usize,
}

fn extract_piece(
    mesh: &PolyMesh,
    parts: &[usize],
    local_cell: &[usize],
    part: usize,
) -> Result<DecomposedPiece, MeshRemapError> {
    let owner = mesh.owner();
    let neighbour = mesh.neighbour();

    let cell_addressing: Vec<Label> = parts
        .iter()
        .enumerate()
        .filter(|(_, p)| **p == part)
        .map(|(c, _)| c as Label)
        .collect();

    let mut internal = Vec::new();
    let mut internal_neighbours = Vec::new();
    let mut processor: BTreeMap<usize, Vec<FaceEntry>> = BTreeMap::new();
    for face in 0..mesh.n_internal_faces() {
        let (own, nei) = (owner[face], neighbour[face]);
        match (parts[own] == part, parts[nei] == part) {
            (true, true) => {
                internal.push(FaceEntry {
                    original: face,
                    flipped: false,
                    owner: local_cell[own],
                });
                internal_neighbours.push(local_cell[nei]);
            }
            (true, false) => processor.entry(parts[nei]).or_default().push(FaceEntry {
                original: face,
                flipped: false,
                owner: local_cell[own],
            }),
            (false, true) => processor.entry(parts[own]).or_default().push(FaceEntry {
                original: face,
                flipped: true,
                owner: local_cell[nei],
            }),
            (false, false) => {}
        }
    }

    let mut boundary: Vec<(BoundaryPatch, Vec<FaceEntry>)> = mesh
        .patches()
        .iter()
        .map(|patch| {
            let faces = patch
                .faces()
                .filter(|&f| parts[owner[f]] == part)
                .map(|f| FaceEntry {
                    original: f,
                    flipped: false,
                    owner: local_cell[owner[f]],
                })
                .collect();
            (patch.clone(), faces)
        })
        .collect();
    for (other, faces) in processor {
        let patch = BoundaryPatch::new(
            processor_patch_name(part, other),
            0,
            0,
            PatchKind::Processor,
        );
        boundary.push((patch, faces));
    }

    // renumber points in ascending original order
    let mut used = vec![false; mesh.n_points()];
    let all_faces = internal
        .iter()
        .chain(boundary.iter().flat_map(|(_, faces)| faces.iter()));
    for entry in all_faces {
        for &p in &mesh.faces()[entry.original] {
            used[p] = true;
        }
    }
    let mut point_map = vec![usize::MAX; mesh.n_points()];
    let mut points = Vec::new();
    for (p, _) in used.iter().enumerate().filter(|(_, u)| **u) {
        point_map[p] = points.len();
        points.push(mesh.points()[p]);
    }

    let mut faces = Vec::new();
    let mut face_owner = Vec::new();
    let mut face_addressing = Vec::new();
    let mut push_face = |entry: &FaceEntry| {
        let mut verts: Vec<usize> = mesh.faces()[entry.original]
            .iter()
            .map(|&p| point_map[p])
            .collect();
        let label = entry.original as Label + 1;
        if entry.flipped {
            verts.reverse();
            face_addressing.push(-label);
        } else {
            face_addressing.push(label);
        }
        faces.push(verts);
        face_owner.push(entry.owner);
    };

    for entry in &internal {
        push_face(entry);
    }
    let mut patches = Vec::with_capacity(boundary.len());
    let mut start = internal.len();
    for (mut patch, entries) in boundary {
        patch.start = start;
        patch.size = entries.len();
        start += patch.size;
        for entry in &entries {
            push_face(entry);
        }
        patches.push(patch);
    }

    let mesh = PolyMesh::from_parts(PolyMeshParts {
        points,
        faces,
        owner: face_owner,
        neighbour: internal_neighbours,
        patches,
    })?;
    Ok(DecomposedPiece {
        mesh,
        cell_addressing,
        face_addressing,
    })
}

/// Assign cells to `n_parts` slabs of equal cell count along `axis`,
/// ordered by cell centre coordinate. Ties keep the cell order.
pub fn partition_by_axis(mesh: &PolyMesh, axis: usize, n_parts: usize) -> Vec<usize> {
    let n_cells = mesh.n_cells();
    if n_parts == 0 || n_cells == 0 {
        return vec![0; n_cells];
    }
    let axis = axis.min(2);
    let centres = mesh.cell_centres();
    let mut order: Vec<usize> = (0..n_cells).collect();
    order.sort_by(|&a, &b| centres[a][axis].total_cmp(&centres[b][axis]));

    let mut parts = vec![0; n_cells];
    for (rank, cell) in order.into_iter().enumerate() {
        parts[cell] = rank * n_parts / n_cells;
    }
    parts
}
