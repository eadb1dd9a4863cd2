//! Polyhedral finite-volume mesh of one subdomain.
//!
//! Faces are stored internal-first: faces `0..n_internal_faces` have both an
//! owner and a neighbour cell, the remaining faces belong to exactly one
//! boundary patch. Patches are contiguous and ordered.
//!
//! Geometry (face centres/areas, cell centres/volumes) is derived from the
//! points on construction and never persisted.

use std::ops::Range;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::bounds::BoundingBox;
use crate::geometry::primitives::{cell_centres_and_volumes, face_centre_and_area};
use crate::mesh_error::MeshRemapError;

/// Physical boundary or inter-subdomain (processor) boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchKind {
    #[default]
    Physical,
    Processor,
}

/// A contiguous run of boundary faces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryPatch {
    pub name: String,
    pub start: usize,
    pub size: usize,
    #[serde(default)]
    pub kind: PatchKind,
}

impl BoundaryPatch {
    pub fn new(name: impl Into<String>, start: usize, size: usize, kind: PatchKind) -> Self {
        Self {
            name: name.into(),
            start,
            size,
            kind,
        }
    }

    /// Mesh face indices covered by the patch.
    pub fn faces(&self) -> Range<usize> {
        self.start..self.start + self.size
    }

    pub fn is_processor(&self) -> bool {
        self.kind == PatchKind::Processor
    }
}

/// Serialized topology of a [`PolyMesh`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyMeshParts {
    pub points: Vec<Point3<f64>>,
    pub faces: Vec<Vec<usize>>,
    pub owner: Vec<usize>,
    pub neighbour: Vec<usize>,
    pub patches: Vec<BoundaryPatch>,
}

/// Validated mesh with derived geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolyMeshParts", into = "PolyMeshParts")]
pub struct PolyMesh {
    parts: PolyMeshParts,
    n_cells: usize,
    face_centres: Vec<Point3<f64>>,
    face_areas: Vec<Vector3<f64>>,
    cell_centres: Vec<Point3<f64>>,
    cell_volumes: Vec<f64>,
}

impl TryFrom<PolyMeshParts> for PolyMesh {
    type Error = MeshRemapError;

    fn try_from(parts: PolyMeshParts) -> Result<Self, Self::Error> {
        PolyMesh::from_parts(parts)
    }
}

impl From<PolyMesh> for PolyMeshParts {
    fn from(mesh: PolyMesh) -> Self {
        mesh.parts
    }
}

fn invalid(message: impl Into<String>) -> MeshRemapError {
    MeshRemapError::InvalidGeometry(message.into())
}

impl PolyMesh {
    /// Validate topology and derive geometry.
    pub fn from_parts(parts: PolyMeshParts) -> Result<Self, MeshRemapError> {
        let n_faces = parts.faces.len();
        if parts.owner.len() != n_faces {
            return Err(invalid(format!(
                "owner has {} entries for {n_faces} faces",
                parts.owner.len()
            )));
        }
        let n_internal = parts.neighbour.len();
        if n_internal > n_faces {
            return Err(invalid(format!(
                "{n_internal} neighbours for {n_faces} faces"
            )));
        }

        let mut expected_start = n_internal;
        for patch in &parts.patches {
            if patch.start != expected_start {
                return Err(invalid(format!(
                    "patch `{}` starts at {} but {expected_start} was expected",
                    patch.name, patch.start
                )));
            }
            expected_start += patch.size;
        }
        if expected_start != n_faces {
            return Err(invalid(format!(
                "patches end at face {expected_start}, mesh has {n_faces} faces"
            )));
        }

        for (face, verts) in parts.faces.iter().enumerate() {
            if verts.len() < 3 {
                return Err(invalid(format!("face {face} has {} vertices", verts.len())));
            }
            if let Some(&p) = verts.iter().find(|&&p| p >= parts.points.len()) {
                return Err(invalid(format!("face {face} references missing point {p}")));
            }
        }

        let n_cells = parts
            .owner
            .iter()
            .chain(parts.neighbour.iter())
            .max()
            .map_or(0, |&c| c + 1);
        for (face, (&own, &nei)) in parts.owner.iter().zip(&parts.neighbour).enumerate() {
            if own == nei {
                return Err(invalid(format!("internal face {face} has owner == neighbour")));
            }
        }

        let (face_centres, face_areas): (Vec<_>, Vec<_>) = parts
            .faces
            .iter()
            .map(|verts| face_centre_and_area(&parts.points, verts))
            .unzip();
        let (cell_centres, cell_volumes) = cell_centres_and_volumes(
            n_cells,
            &face_centres,
            &face_areas,
            &parts.owner,
            &parts.neighbour,
        );

        Ok(Self {
            parts,
            n_cells,
            face_centres,
            face_areas,
            cell_centres,
            cell_volumes,
        })
    }

    /// Topology as read from and written to disk.
    pub fn parts(&self) -> &PolyMeshParts {
        &self.parts
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    #[inline]
    pub fn n_faces(&self) -> usize {
        self.parts.faces.len()
    }

    #[inline]
    pub fn n_internal_faces(&self) -> usize {
        self.parts.neighbour.len()
    }

    #[inline]
    pub fn n_points(&self) -> usize {
        self.parts.points.len()
    }

    #[inline]
    pub fn is_internal_face(&self, face: usize) -> bool {
        face < self.n_internal_faces()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.parts.points
    }

    pub fn faces(&self) -> &[Vec<usize>] {
        &self.parts.faces
    }

    pub fn owner(&self) -> &[usize] {
        &self.parts.owner
    }

    pub fn neighbour(&self) -> &[usize] {
        &self.parts.neighbour
    }

    pub fn patches(&self) -> &[BoundaryPatch] {
        &self.parts.patches
    }

    pub fn face_centres(&self) -> &[Point3<f64>] {
        &self.face_centres
    }

    pub fn face_areas(&self) -> &[Vector3<f64>] {
        &self.face_areas
    }

    pub fn cell_centres(&self) -> &[Point3<f64>] {
        &self.cell_centres
    }

    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// Patch holding boundary face `face`; `None` for internal or out-of-range faces.
    pub fn which_patch(&self, face: usize) -> Option<usize> {
        if self.is_internal_face(face) || face >= self.n_faces() {
            return None;
        }
        let idx = self
            .parts
            .patches
            .partition_point(|p| p.start + p.size <= face);
        (idx < self.parts.patches.len()).then_some(idx)
    }

    /// `(patch, face within patch)` of boundary face `face`.
    pub fn patch_face(&self, face: usize) -> Option<(usize, usize)> {
        self.which_patch(face)
            .map(|patch| (patch, face - self.parts.patches[patch].start))
    }

    /// Axis-aligned bounds of all points.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.parts.points)
    }

    /// Unit face normal, `None` for a degenerate face.
    pub fn face_unit_normal(&self, face: usize) -> Option<Vector3<f64>> {
        self.face_areas
            .get(face)
            .and_then(|a| a.try_normalize(f64::MIN_POSITIVE))
    }

    /// Owner weight of the linear interpolation scheme on internal face `face`.
    ///
    /// `w = |S·(C_N − C_f)| / (|S·(C_f − C_P)| + |S·(C_N − C_f)|)`, so the
    /// face value is `w φ_P + (1 − w) φ_N`. Falls back to `0.5` when both
    /// projected distances vanish.
    pub fn linear_weight(&self, face: usize) -> f64 {
        let sf = self.face_areas[face];
        let cf = self.face_centres[face];
        let own = sf.dot(&(cf - self.cell_centres[self.parts.owner[face]])).abs();
        let nei = sf.dot(&(self.cell_centres[self.parts.neighbour[face]] - cf)).abs();
        let total = own + nei;
        if total > f64::MIN_POSITIVE {
            nei / total
        } else {
            0.5
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::{BlockSpec, block_mesh};

    #[test]
    fn block_mesh_counts() {
        let mesh = block_mesh(&BlockSpec::new([3, 2, 1])).unwrap();
        assert_eq!(mesh.n_cells(), 6);
        // internal: x-faces 2*2*1 + y-faces 3*1*1 = 7
        assert_eq!(mesh.n_internal_faces(), 7);
        assert_eq!(mesh.n_faces(), 7 + 2 * (2 + 3 + 6));
        assert!(mesh.cell_volumes().iter().all(|v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn which_patch_and_patch_face() {
        let mesh = block_mesh(&BlockSpec::new([2, 1, 1])).unwrap();
        let first = mesh.n_internal_faces();
        assert_eq!(mesh.which_patch(0), None);
        assert_eq!(mesh.patch_face(first), Some((0, 0)));
        let last = mesh.n_faces() - 1;
        let (patch, local) = mesh.patch_face(last).unwrap();
        assert_eq!(patch, mesh.patches().len() - 1);
        assert_eq!(local, mesh.patches()[patch].size - 1);
        assert_eq!(mesh.which_patch(mesh.n_faces()), None);
    }

    #[test]
    fn uniform_spacing_gives_half_weights() {
        let mesh = block_mesh(&BlockSpec::new([3, 1, 1])).unwrap();
        for face in 0..mesh.n_internal_faces() {
            assert!((mesh.linear_weight(face) - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn inconsistent_patches_are_rejected() {
        let mesh = block_mesh(&BlockSpec::new([1, 1, 1])).unwrap();
        let mut parts = mesh.parts().clone();
        parts.patches[0].start += 1;
        assert!(matches!(
            PolyMesh::from_parts(parts),
            Err(MeshRemapError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn json_round_trip_rebuilds_geometry() {
        let mesh = block_mesh(&BlockSpec::new([2, 2, 1])).unwrap();
        let text = serde_json::to_string(&mesh).unwrap();
        let back: PolyMesh = serde_json::from_str(&text).unwrap();
        assert_eq!(back, mesh);
    }
}
