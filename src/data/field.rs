//! Cell-centred and face-centred fields over a [`PolyMesh`].
//!
//! A field holds its internal values (one per cell, or one per internal
//! face) and one value list per boundary patch, in patch order.

use std::fmt::Debug;
use std::marker::PhantomData;

use nalgebra::Vector3;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data::tensor::SymmTensor;
use crate::mesh_error::MeshRemapError;
use crate::topology::poly_mesh::PolyMesh;

/// Value type a field can carry.
pub trait FieldValue: Copy + Debug + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Type part of the field class name (`volSymmTensorField`).
    const TYPE_NAME: &'static str;

    fn zero() -> Self;

    /// `w · owner + (1 − w) · neighbour`.
    fn lerp(weight: f64, owner: &Self, neighbour: &Self) -> Self;
}

impl FieldValue for f64 {
    const TYPE_NAME: &'static str = "Scalar";

    fn zero() -> Self {
        0.0
    }

    fn lerp(weight: f64, owner: &Self, neighbour: &Self) -> Self {
        weight * owner + (1.0 - weight) * neighbour
    }
}

impl FieldValue for Vector3<f64> {
    const TYPE_NAME: &'static str = "Vector";

    fn zero() -> Self {
        Vector3::zeros()
    }

    fn lerp(weight: f64, owner: &Self, neighbour: &Self) -> Self {
        owner * weight + neighbour * (1.0 - weight)
    }
}

impl FieldValue for SymmTensor {
    const TYPE_NAME: &'static str = "SymmTensor";

    fn zero() -> Self {
        SymmTensor::ZERO
    }

    fn lerp(weight: f64, owner: &Self, neighbour: &Self) -> Self {
        *owner * weight + *neighbour * (1.0 - weight)
    }
}

/// Where the internal values of a field live.
pub trait FieldLocation: Copy + Debug + Default + PartialEq + 'static {
    /// Class-name prefix (`vol`, `surface`).
    const PREFIX: &'static str;

    /// Number of internal values on `mesh`.
    fn internal_len(mesh: &PolyMesh) -> usize;
}

/// Cell centres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vol;

/// Internal face centres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Surface;

impl FieldLocation for Vol {
    const PREFIX: &'static str = "vol";

    fn internal_len(mesh: &PolyMesh) -> usize {
        mesh.n_cells()
    }
}

impl FieldLocation for Surface {
    const PREFIX: &'static str = "surface";

    fn internal_len(mesh: &PolyMesh) -> usize {
        mesh.n_internal_faces()
    }
}

/// Internal values plus per-patch boundary values.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometricField<T, L> {
    internal: Vec<T>,
    boundary: Vec<Vec<T>>,
    _location: PhantomData<L>,
}

pub type VolField<T> = GeometricField<T, Vol>;
pub type SurfaceField<T> = GeometricField<T, Surface>;

/// OpenFOAM-style class name, e.g. `volSymmTensorField`.
pub fn class_name<T: FieldValue, L: FieldLocation>() -> String {
    format!("{}{}Field", L::PREFIX, T::TYPE_NAME)
}

impl<T: FieldValue, L: FieldLocation> GeometricField<T, L> {
    pub fn new(internal: Vec<T>, boundary: Vec<Vec<T>>) -> Self {
        Self {
            internal,
            boundary,
            _location: PhantomData,
        }
    }

    /// All-zero field sized for `mesh`.
    pub fn zeros(mesh: &PolyMesh) -> Self {
        Self::uniform(mesh, T::zero())
    }

    pub fn uniform(mesh: &PolyMesh, value: T) -> Self {
        Self::new(
            vec![value; L::internal_len(mesh)],
            mesh.patches().iter().map(|p| vec![value; p.size]).collect(),
        )
    }

    pub fn class_name() -> String {
        class_name::<T, L>()
    }

    pub fn internal(&self) -> &[T] {
        &self.internal
    }

    pub fn internal_mut(&mut self) -> &mut [T] {
        &mut self.internal
    }

    pub fn boundary(&self) -> &[Vec<T>] {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut [Vec<T>] {
        &mut self.boundary
    }

    /// Apply `f` to every internal and boundary value.
    pub fn map<U: FieldValue>(&self, f: impl Fn(&T) -> U) -> GeometricField<U, L> {
        GeometricField::new(
            self.internal.iter().map(&f).collect(),
            self.boundary
                .iter()
                .map(|patch| patch.iter().map(&f).collect())
                .collect(),
        )
    }

    /// Check that the field has the shape `mesh` demands.
    pub fn check_against(&self, mesh: &PolyMesh, name: &str) -> Result<(), MeshRemapError> {
        let expected = L::internal_len(mesh);
        if self.internal.len() != expected {
            return Err(MeshRemapError::FieldSizeMismatch {
                field: name.to_string(),
                expected,
                found: self.internal.len(),
            });
        }
        if self.boundary.len() != mesh.patches().len() {
            return Err(MeshRemapError::FieldSizeMismatch {
                field: format!("{name} (patches)"),
                expected: mesh.patches().len(),
                found: self.boundary.len(),
            });
        }
        for (patch, values) in mesh.patches().iter().zip(&self.boundary) {
            if values.len() != patch.size {
                return Err(MeshRemapError::FieldSizeMismatch {
                    field: format!("{name}.{}", patch.name),
                    expected: patch.size,
                    found: values.len(),
                });
            }
        }
        Ok(())
    }

    /// Value on boundary face `face` (mesh numbering).
    pub fn boundary_value(&self, mesh: &PolyMesh, face: usize) -> Option<T> {
        let (patch, i) = mesh.patch_face(face)?;
        self.boundary.get(patch)?.get(i).copied()
    }

    /// Overwrite the value on boundary face `face`; `false` if `face` is
    /// not a boundary face.
    pub fn set_boundary_value(&mut self, mesh: &PolyMesh, face: usize, value: T) -> bool {
        match mesh
            .patch_face(face)
            .and_then(|(patch, i)| self.boundary.get_mut(patch)?.get_mut(i))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl<T: FieldValue> SurfaceField<T> {
    /// Value on any face, internal or boundary.
    pub fn face_value(&self, mesh: &PolyMesh, face: usize) -> Option<T> {
        if mesh.is_internal_face(face) {
            self.internal.get(face).copied()
        } else {
            self.boundary_value(mesh, face)
        }
    }

    /// Overwrite the value on any face; `false` if `face` is out of range.
    pub fn set_face_value(&mut self, mesh: &PolyMesh, face: usize, value: T) -> bool {
        if mesh.is_internal_face(face) {
            match self.internal.get_mut(face) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        } else {
            self.set_boundary_value(mesh, face, value)
        }
    }
}
