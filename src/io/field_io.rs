//! Field files: `<time>/<name>` stored as JSON.
//!
//! ```json
//! { "class": "volSymmTensorField", "internal": [...], "boundary": [[...], ...] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::field::{FieldLocation, FieldValue, GeometricField};
use crate::mesh_error::MeshRemapError;

#[derive(Deserialize)]
struct FieldFile<T> {
    internal: Vec<T>,
    boundary: Vec<Vec<T>>,
}

#[derive(Serialize)]
struct FieldFileRef<'a, T> {
    class: String,
    internal: &'a [T],
    boundary: &'a [Vec<T>],
}

#[derive(Deserialize)]
struct FieldHeader {
    class: String,
}

fn field_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Class name stored in a field file, e.g. `surfaceSymmTensorField`.
pub fn read_field_class(path: impl AsRef<Path>) -> Result<String, MeshRemapError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| MeshRemapError::io(path, e))?;
    let header: FieldHeader = serde_json::from_slice(&bytes)
        .map_err(|e| MeshRemapError::MeshIoParse(format!("{}: {e}", path.display())))?;
    Ok(header.class)
}

/// Read a field, checking its stored class against `T` and `L`.
pub fn read_field<T: FieldValue, L: FieldLocation>(
    path: impl AsRef<Path>,
) -> Result<GeometricField<T, L>, MeshRemapError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| MeshRemapError::io(path, e))?;
    let expected = GeometricField::<T, L>::class_name();
    let header: FieldHeader = serde_json::from_slice(&bytes)
        .map_err(|e| MeshRemapError::MeshIoParse(format!("{}: {e}", path.display())))?;
    if header.class != expected {
        return Err(MeshRemapError::UnsupportedFieldType {
            field: field_name(path),
            found: header.class,
        });
    }
    let file: FieldFile<T> = serde_json::from_slice(&bytes)
        .map_err(|e| MeshRemapError::MeshIoParse(format!("{}: {e}", path.display())))?;
    Ok(GeometricField::new(file.internal, file.boundary))
}

/// Write a field, creating the time directory if needed.
pub fn write_field<T: FieldValue, L: FieldLocation>(
    path: impl AsRef<Path>,
    field: &GeometricField<T, L>,
) -> Result<(), MeshRemapError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MeshRemapError::io(parent, e))?;
    }
    let file = FieldFileRef {
        class: GeometricField::<T, L>::class_name(),
        internal: field.internal(),
        boundary: field.boundary(),
    };
    let bytes = serde_json::to_vec_pretty(&file)
        .map_err(|e| MeshRemapError::MeshIoParse(e.to_string()))?;
    fs::write(path, bytes).map_err(|e| MeshRemapError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::field::{SurfaceField, VolField};
    use crate::data::tensor::SymmTensor;
    use crate::mesh_generation::{BlockSpec, block_mesh};

    #[test]
    fn field_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = block_mesh(&BlockSpec::new([2, 1, 1])).unwrap();
        let mut field = VolField::<SymmTensor>::zeros(&mesh);
        field.internal_mut()[1] = SymmTensor::IDENTITY;
        let path = dir.path().join("0").join("epsilonP");
        write_field(&path, &field).unwrap();

        assert_eq!(read_field_class(&path).unwrap(), "volSymmTensorField");
        let back: VolField<SymmTensor> = read_field(&path).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn wrong_class_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = block_mesh(&BlockSpec::new([2, 1, 1])).unwrap();
        let path = dir.path().join("epsilonPf");
        write_field(&path, &SurfaceField::<SymmTensor>::zeros(&mesh)).unwrap();
        let err = read_field::<SymmTensor, crate::data::field::Vol>(&path).unwrap_err();
        assert_eq!(
            err,
            MeshRemapError::UnsupportedFieldType {
                field: "epsilonPf".into(),
                found: "surfaceSymmTensorField".into()
            }
        );
    }
}
