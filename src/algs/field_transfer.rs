//! Field transfer between a local subdomain and one global subdomain.
//!
//! Cell values travel through `cellMap`. Boundary faces need care: a face on
//! the boundary of one subdomain may be internal in the other (a processor
//! face of one decomposition lying inside a subdomain of the other). Such a
//! face has no stored boundary value on the internal side, so the linear
//! interpolation of the adjacent cells is used instead.

use crate::data::field::{FieldValue, SurfaceField, VolField};
use crate::mesh_error::MeshRemapError;
use crate::topology::decomposition_map::{DecompositionMap, PairMaps};
use crate::topology::poly_mesh::PolyMesh;

/// Meshes and decomposition maps of one (local, global) subdomain pair.
#[derive(Clone, Copy, Debug)]
pub struct PairView<'a> {
    pub local: &'a PolyMesh,
    pub global: &'a PolyMesh,
    pub maps: &'a PairMaps,
}

/// Counts of values moved by one transfer call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferStats {
    pub cells: usize,
    /// Boundary values copied from a boundary value.
    pub boundary_faces: usize,
    /// Values taken from an interpolated face field.
    pub interpolated_faces: usize,
}

fn check_map(
    name: &str,
    map: &DecompositionMap,
    source_len: usize,
    target_len: usize,
) -> Result<(), MeshRemapError> {
    if map.len() != source_len {
        return Err(MeshRemapError::FieldSizeMismatch {
            field: name.to_string(),
            expected: source_len,
            found: map.len(),
        });
    }
    match map.mapped().find(|&(_, t)| t >= target_len) {
        Some((_, t)) => Err(MeshRemapError::IndexOutOfBounds {
            what: "decomposition map target",
            index: t,
            len: target_len,
        }),
        None => Ok(()),
    }
}

impl<'a> PairView<'a> {
    pub fn new(local: &'a PolyMesh, global: &'a PolyMesh, maps: &'a PairMaps) -> Self {
        Self { local, global, maps }
    }

    /// Check map lengths against the local mesh and targets against the
    /// global mesh.
    pub fn validate(&self) -> Result<(), MeshRemapError> {
        check_map(
            "cellMap",
            &self.maps.cell_map,
            self.local.n_cells(),
            self.global.n_cells(),
        )?;
        check_map(
            "faceMap",
            &self.maps.face_map,
            self.local.n_faces(),
            self.global.n_faces(),
        )
    }

    fn local_boundary_faces(&self) -> std::ops::Range<usize> {
        self.local.n_internal_faces()..self.local.n_faces()
    }
}

/// Scatter a local cell field into the global one.
///
/// `local_faces` is the linear interpolation of `local`. Mapped cells are
/// copied; a local boundary face landing on a global boundary face copies
/// its boundary value; a local internal face landing on a global boundary
/// face (a global processor face) takes the interpolated value.
pub fn local_to_global<T: FieldValue>(
    pair: &PairView<'_>,
    local: &VolField<T>,
    local_faces: &SurfaceField<T>,
    global: &mut VolField<T>,
) -> Result<TransferStats, MeshRemapError> {
    pair.validate()?;
    local.check_against(pair.local, "local field")?;
    local_faces.check_against(pair.local, "local face field")?;
    global.check_against(pair.global, "global field")?;

    let mut stats = TransferStats::default();
    for (lc, gc) in pair.maps.cell_map.mapped() {
        global.internal_mut()[gc] = local.internal()[lc];
        stats.cells += 1;
    }

    for lf in pair.local_boundary_faces() {
        let Some(gf) = pair.maps.face_map.get(lf) else {
            continue;
        };
        if pair.global.is_internal_face(gf) {
            continue;
        }
        if let Some(value) = local.boundary_value(pair.local, lf) {
            global.set_boundary_value(pair.global, gf, value);
            stats.boundary_faces += 1;
        }
    }

    for (lf, value) in local_faces.internal().iter().enumerate() {
        let Some(gf) = pair.maps.face_map.get(lf) else {
            continue;
        };
        if !pair.global.is_internal_face(gf) {
            global.set_boundary_value(pair.global, gf, *value);
            stats.interpolated_faces += 1;
        }
    }
    Ok(stats)
}

/// Copy every mapped local face value (internal or boundary) onto its
/// global face, wherever that face lives. Returns the number of faces set.
pub fn local_faces_to_global<T: FieldValue>(
    pair: &PairView<'_>,
    local_faces: &SurfaceField<T>,
    global_faces: &mut SurfaceField<T>,
) -> Result<usize, MeshRemapError> {
    pair.validate()?;
    local_faces.check_against(pair.local, "local face field")?;
    global_faces.check_against(pair.global, "global face field")?;

    let mut moved = 0;
    for (lf, gf) in pair.maps.face_map.mapped() {
        if let Some(value) = local_faces.face_value(pair.local, lf) {
            if global_faces.set_face_value(pair.global, gf, value) {
                moved += 1;
            }
        }
    }
    Ok(moved)
}

/// Gather a global cell field into the local one.
///
/// `global_faces` is the linear interpolation of `global`. Mapped cells are
/// copied back; a local boundary face takes the global boundary value, or
/// the interpolated value when its global face is internal.
pub fn global_to_local<T: FieldValue>(
    pair: &PairView<'_>,
    global: &VolField<T>,
    global_faces: &SurfaceField<T>,
    local: &mut VolField<T>,
) -> Result<TransferStats, MeshRemapError> {
    pair.validate()?;
    global.check_against(pair.global, "global field")?;
    global_faces.check_against(pair.global, "global face field")?;
    local.check_against(pair.local, "local field")?;

    let mut stats = TransferStats::default();
    for (lc, gc) in pair.maps.cell_map.mapped() {
        local.internal_mut()[lc] = global.internal()[gc];
        stats.cells += 1;
    }

    for lf in pair.local_boundary_faces() {
        let Some(gf) = pair.maps.face_map.get(lf) else {
            continue;
        };
        let value = if pair.global.is_internal_face(gf) {
            stats.interpolated_faces += 1;
            global_faces.internal()[gf]
        } else {
            match global.boundary_value(pair.global, gf) {
                Some(value) => {
                    stats.boundary_faces += 1;
                    value
                }
                None => continue,
            }
        };
        local.set_boundary_value(pair.local, lf, value);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::distribute::distribute_mesh;
    use crate::algs::interpolate::interpolate_linear;
    use crate::algs::resolve::{DecompositionAddressing, GlobalSubdomain, resolve_pair};
    use crate::data::tensor::SymmTensor;
    use crate::mesh_generation::{BlockSpec, block_mesh};
    use crate::topology::addressing::ProcAddressing;

    /// 4×1×1 block; local = whole mesh as one subdomain, global = two halves.
    fn fixture() -> (PolyMesh, Vec<(PolyMesh, PairMaps)>) {
        let mesh = block_mesh(&BlockSpec::new([4, 1, 1])).unwrap();
        let local = distribute_mesh(&mesh, &[0; 4], 1).unwrap().remove(0);
        let local_addr = DecompositionAddressing {
            cells: ProcAddressing::from_cells(&local.cell_addressing).unwrap(),
            faces: ProcAddressing::from_faces(local.face_addressing.clone()),
        };
        let pairs = distribute_mesh(&mesh, &[0, 0, 1, 1], 2)
            .unwrap()
            .into_iter()
            .map(|piece| {
                let addr = DecompositionAddressing {
                    cells: ProcAddressing::from_cells(&piece.cell_addressing).unwrap(),
                    faces: ProcAddressing::from_faces(piece.face_addressing.clone()),
                };
                let identity = PairMaps {
                    cell_map: DecompositionMap::identity(piece.mesh.n_cells()),
                    face_map: DecompositionMap::identity(piece.mesh.n_faces()),
                };
                let global = GlobalSubdomain::new(piece.mesh, &addr, identity).unwrap();
                let maps = resolve_pair(&local_addr, &global).unwrap().unwrap();
                (global.mesh, maps)
            })
            .collect();
        (local.mesh, pairs)
    }

    fn diag(v: f64) -> SymmTensor {
        SymmTensor::new(v, 0.0, 0.0, v, 0.0, v)
    }

    #[test]
    fn scatter_fills_processor_faces_with_interpolation() {
        let (local_mesh, pairs) = fixture();
        let mut local = VolField::<SymmTensor>::zeros(&local_mesh);
        for (c, v) in local.internal_mut().iter_mut().enumerate() {
            *v = diag(c as f64);
        }
        let local_faces = interpolate_linear(&local_mesh, &local);

        let (global_mesh, maps) = &pairs[0];
        let pair = PairView::new(&local_mesh, global_mesh, maps);
        let mut global = VolField::<SymmTensor>::zeros(global_mesh);
        let stats = local_to_global(&pair, &local, &local_faces, &mut global).unwrap();
        assert_eq!(stats.cells, 2);
        assert_eq!(stats.interpolated_faces, 1);
        assert_eq!(global.internal(), &[diag(0.0), diag(1.0)]);

        // processor patch of the left half sits between local cells 1 and 2
        let proc_patch = global_mesh.patches().iter().position(|p| p.is_processor()).unwrap();
        assert_eq!(global.boundary()[proc_patch], vec![diag(1.5)]);
    }

    #[test]
    fn gather_synthesizes_values_for_internal_global_faces() {
        // local = two halves, global = whole mesh
        let mesh = block_mesh(&BlockSpec::new([4, 1, 1])).unwrap();
        let whole = distribute_mesh(&mesh, &[0; 4], 1).unwrap().remove(0);
        let halves = distribute_mesh(&mesh, &[0, 0, 1, 1], 2).unwrap();
        let global_addr = DecompositionAddressing {
            cells: ProcAddressing::from_cells(&whole.cell_addressing).unwrap(),
            faces: ProcAddressing::from_faces(whole.face_addressing.clone()),
        };
        let global_sub = GlobalSubdomain::new(
            whole.mesh.clone(),
            &global_addr,
            PairMaps {
                cell_map: DecompositionMap::identity(4),
                face_map: DecompositionMap::identity(whole.mesh.n_faces()),
            },
        )
        .unwrap();
        let right = &halves[1];
        let right_addr = DecompositionAddressing {
            cells: ProcAddressing::from_cells(&right.cell_addressing).unwrap(),
            faces: ProcAddressing::from_faces(right.face_addressing.clone()),
        };
        let maps = resolve_pair(&right_addr, &global_sub).unwrap().unwrap();
        let pair = PairView::new(&right.mesh, &whole.mesh, &maps);

        let mut global = VolField::<f64>::zeros(&whole.mesh);
        global.internal_mut().copy_from_slice(&[0.0, 10.0, 20.0, 30.0]);
        let global_faces = interpolate_linear(&whole.mesh, &global);
        let mut local = VolField::<f64>::zeros(&right.mesh);
        let stats = global_to_local(&pair, &global, &global_faces, &mut local).unwrap();

        assert_eq!(local.internal(), &[20.0, 30.0]);
        assert_eq!(stats.interpolated_faces, 1);
        let proc_patch = right.mesh.patches().iter().position(|p| p.is_processor()).unwrap();
        assert_eq!(local.boundary()[proc_patch], vec![15.0]);
    }

    #[test]
    fn scatter_then_gather_restores_mapped_cells() {
        let (local_mesh, pairs) = fixture();
        let mut local = VolField::<SymmTensor>::zeros(&local_mesh);
        for (c, v) in local.internal_mut().iter_mut().enumerate() {
            *v = SymmTensor::new(c as f64, 1.0, 2.0, 3.0, 4.0, -(c as f64));
        }
        for (p, values) in local.boundary_mut().iter_mut().enumerate() {
            values.iter_mut().for_each(|v| *v = diag(100.0 + p as f64));
        }
        let local_faces = interpolate_linear(&local_mesh, &local);

        let mut back = VolField::<SymmTensor>::zeros(&local_mesh);
        for (global_mesh, maps) in &pairs {
            let pair = PairView::new(&local_mesh, global_mesh, maps);
            let mut global = VolField::zeros(global_mesh);
            local_to_global(&pair, &local, &local_faces, &mut global).unwrap();
            let global_faces = interpolate_linear(global_mesh, &global);
            global_to_local(&pair, &global, &global_faces, &mut back).unwrap();
        }
        assert_eq!(back, local);
    }

    #[test]
    fn face_fields_follow_the_face_map() {
        let (local_mesh, pairs) = fixture();
        let mut local = VolField::<f64>::zeros(&local_mesh);
        local.internal_mut().copy_from_slice(&[0.0, 2.0, 4.0, 6.0]);
        let local_faces = interpolate_linear(&local_mesh, &local);

        let (global_mesh, maps) = &pairs[1];
        let pair = PairView::new(&local_mesh, global_mesh, maps);
        let mut global_faces = SurfaceField::<f64>::zeros(global_mesh);
        let moved = local_faces_to_global(&pair, &local_faces, &mut global_faces).unwrap();
        assert_eq!(moved, maps.face_map.mapped_count());
        // the right half's only internal face is between cells 2 and 3
        assert_eq!(global_faces.internal(), &[5.0]);
        let proc_patch = global_mesh.patches().iter().position(|p| p.is_processor()).unwrap();
        assert_eq!(global_faces.boundary()[proc_patch], vec![3.0]);
    }

    #[test]
    fn mismatched_maps_are_rejected() {
        let (local_mesh, pairs) = fixture();
        let (global_mesh, maps) = &pairs[0];
        let mut short = maps.clone();
        short.cell_map = DecompositionMap::new(vec![0]);
        let pair = PairView::new(&local_mesh, global_mesh, &short);
        assert!(matches!(
            pair.validate(),
            Err(MeshRemapError::FieldSizeMismatch { .. })
        ));

        let mut wild = maps.clone();
        wild.cell_map = DecompositionMap::new(vec![0, 1, 99, -1]);
        let pair = PairView::new(&local_mesh, global_mesh, &wild);
        assert!(matches!(
            pair.validate(),
            Err(MeshRemapError::IndexOutOfBounds { index: 99, .. })
        ));
    }
}
