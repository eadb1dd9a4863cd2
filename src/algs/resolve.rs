//! Cross-decomposition index resolution.
//!
//! Two decompositions of the same original mesh share original indices.
//! For a local entity with original index `o`, the global subdomain's
//! inverse addressing gives the global-local index `g`; the global
//! subdomain's reconstruction map then gives the value recorded in the
//! local map.

use crate::io::case::MeshCase;
use crate::mesh_error::MeshRemapError;
use crate::topology::addressing::{InverseAddressing, ProcAddressing, UNMAPPED};
use crate::topology::decomposition_map::{DecompositionMap, PairMaps};
use crate::topology::poly_mesh::PolyMesh;

/// Cell and face partition addressing of one subdomain, sign-normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecompositionAddressing {
    pub cells: ProcAddressing,
    pub faces: ProcAddressing,
}

impl DecompositionAddressing {
    pub fn load(case: &MeshCase) -> Result<Self, MeshRemapError> {
        Ok(Self {
            cells: case.read_cell_addressing()?,
            faces: case.read_face_addressing()?,
        })
    }
}

/// A global subdomain held resident for the whole mapping pass.
#[derive(Clone, Debug)]
pub struct GlobalSubdomain {
    pub mesh: PolyMesh,
    pub reconstruction: PairMaps,
    cell_inverse: InverseAddressing,
    face_inverse: InverseAddressing,
}

impl GlobalSubdomain {
    pub fn new(
        mesh: PolyMesh,
        addressing: &DecompositionAddressing,
        reconstruction: PairMaps,
    ) -> Result<Self, MeshRemapError> {
        Ok(Self {
            mesh,
            reconstruction,
            cell_inverse: addressing.cells.invert()?,
            face_inverse: addressing.faces.invert()?,
        })
    }

    pub fn load(case: &MeshCase) -> Result<Self, MeshRemapError> {
        let mesh = case.read_mesh()?;
        let addressing = DecompositionAddressing::load(case)?;
        let reconstruction = case.read_reconstruction_maps()?;
        Self::new(mesh, &addressing, reconstruction)
    }

    pub fn cell_inverse(&self) -> &InverseAddressing {
        &self.cell_inverse
    }

    pub fn face_inverse(&self) -> &InverseAddressing {
        &self.face_inverse
    }
}

/// Resolve every local entity against one global subdomain.
///
/// Returns the map and whether any entry is non-negative. A reconstruction
/// value is recorded as-is even when negative; only non-negative values
/// count as a correspondence.
pub fn resolve_entities(
    local: &ProcAddressing,
    inverse: &InverseAddressing,
    reconstruction: &DecompositionMap,
) -> Result<(DecompositionMap, bool), MeshRemapError> {
    let mut exists = false;
    let mut entries = Vec::with_capacity(local.len());
    for original in local.iter() {
        let value = match inverse.lookup(original) {
            None => UNMAPPED,
            Some(g) => reconstruction
                .raw(g)
                .ok_or(MeshRemapError::IndexOutOfBounds {
                    what: "reconstruction map",
                    index: g,
                    len: reconstruction.len(),
                })?,
        };
        exists |= value >= 0;
        entries.push(value);
    }
    Ok((DecompositionMap::new(entries), exists))
}

/// Face and cell maps of a (local, global) pair, or `None` when no entity
/// of either kind corresponds.
pub fn resolve_pair(
    local: &DecompositionAddressing,
    global: &GlobalSubdomain,
) -> Result<Option<PairMaps>, MeshRemapError> {
    let (face_map, faces_exist) =
        resolve_entities(&local.faces, &global.face_inverse, &global.reconstruction.face_map)?;
    let (cell_map, cells_exist) =
        resolve_entities(&local.cells, &global.cell_inverse, &global.reconstruction.cell_map)?;
    Ok((faces_exist || cells_exist).then_some(PairMaps { face_map, cell_map }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_cells_resolve_through_reconstruction_map() {
        let local = ProcAddressing::from_cells(&[10, 11, 12]).unwrap();
        let global = ProcAddressing::from_cells(&[8, 10, 12, 14, 16]).unwrap();
        let reconstruction = DecompositionMap::new(vec![-1, 0, 1, -1, 2]);
        let (map, exists) = resolve_entities(&local, &global.invert().unwrap(), &reconstruction).unwrap();
        assert_eq!(map.as_slice(), &[0, -1, 1]);
        assert!(exists);
    }

    #[test]
    fn beyond_inverse_bound_is_unmapped() {
        let local = ProcAddressing::from_cells(&[100]).unwrap();
        let global = ProcAddressing::from_cells(&[0, 1]).unwrap();
        let (map, exists) =
            resolve_entities(&local, &global.invert().unwrap(), &DecompositionMap::identity(2)).unwrap();
        assert_eq!(map.as_slice(), &[UNMAPPED]);
        assert!(!exists);
    }

    #[test]
    fn negative_reconstruction_value_is_kept_but_not_counted() {
        let local = ProcAddressing::from_cells(&[3]).unwrap();
        let global = ProcAddressing::from_cells(&[3]).unwrap();
        let (map, exists) =
            resolve_entities(&local, &global.invert().unwrap(), &DecompositionMap::new(vec![-7])).unwrap();
        assert_eq!(map.as_slice(), &[-7]);
        assert!(!exists);
    }

    #[test]
    fn short_reconstruction_map_is_an_error() {
        let local = ProcAddressing::from_cells(&[1]).unwrap();
        let global = ProcAddressing::from_cells(&[0, 1]).unwrap();
        assert!(matches!(
            resolve_entities(&local, &global.invert().unwrap(), &DecompositionMap::identity(1)),
            Err(MeshRemapError::IndexOutOfBounds { index: 1, len: 1, .. })
        ));
    }

    #[test]
    fn face_match_alone_keeps_the_pair() {
        use crate::mesh_generation::{BlockSpec, block_mesh};
        let mesh = block_mesh(&BlockSpec::new([1, 1, 1])).unwrap();
        let global_addr = DecompositionAddressing {
            cells: ProcAddressing::from_original(vec![5]),
            faces: ProcAddressing::from_faces(vec![1, 2, 3, 4, 5, 6]),
        };
        let global = GlobalSubdomain::new(
            mesh,
            &global_addr,
            PairMaps {
                face_map: DecompositionMap::identity(6),
                cell_map: DecompositionMap::identity(1),
            },
        )
        .unwrap();
        let local = DecompositionAddressing {
            cells: ProcAddressing::from_original(vec![0]),
            faces: ProcAddressing::from_faces(vec![-6, 9]),
        };
        let maps = resolve_pair(&local, &global).unwrap().unwrap();
        assert_eq!(maps.face_map.as_slice(), &[5, -1]);
        assert_eq!(maps.cell_map.as_slice(), &[-1]);

        let disjoint = DecompositionAddressing {
            cells: ProcAddressing::from_original(vec![0]),
            faces: ProcAddressing::from_original(vec![0, 42]),
        };
        assert_eq!(resolve_pair(&disjoint, &global).unwrap(), None);
    }
}
