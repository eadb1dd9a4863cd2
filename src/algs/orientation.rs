//! Rotate boundary tensor values into a frame aligned with a reference
//! direction.
//!
//! For every face of a physical patch, the tensor is rotated by the rotation
//! taking the face unit normal onto the reference direction. Faces already
//! (anti-)parallel to the reference are copied. Processor patches are
//! skipped; their values stay zero in the output.

use log::{debug, info};
use nalgebra::Vector3;

use crate::config::OrientationConfig;
use crate::data::field::{FieldLocation, GeometricField, Surface, SurfaceField, Vol, VolField};
use crate::data::tensor::SymmTensor;
use crate::geometry::rotation::rotation_tensor;
use crate::io::case::MeshCase;
use crate::mesh_error::MeshRemapError;
use crate::topology::poly_mesh::PolyMesh;

/// `|cos|` above which a face counts as aligned with the reference.
pub const ALIGNED_COS: f64 = 0.999;

/// Suffix of the written field name.
pub const ORIENTED_SUFFIX: &str = "_T";

fn align(value: &SymmTensor, normal: &Vector3<f64>, reference: &Vector3<f64>) -> SymmTensor {
    let cos = normal.dot(reference);
    if cos.abs() > ALIGNED_COS {
        *value
    } else {
        value.transform(&rotation_tensor(normal, reference))
    }
}

/// Visit `(patch, face within patch, mesh face, unit normal)` for every face
/// of every physical patch with a usable normal.
fn for_each_physical_face(
    mesh: &PolyMesh,
    mut visit: impl FnMut(usize, usize, usize, Option<Vector3<f64>>),
) {
    for (p, patch) in mesh.patches().iter().enumerate() {
        if patch.is_processor() {
            continue;
        }
        for (i, face) in patch.faces().enumerate() {
            visit(p, i, face, mesh.face_unit_normal(face));
        }
    }
}

/// Oriented copy of a face-centred field's physical boundary values.
pub fn orient_boundary_faces(
    mesh: &PolyMesh,
    field: &SurfaceField<SymmTensor>,
    reference: &Vector3<f64>,
) -> SurfaceField<SymmTensor> {
    let mut out = SurfaceField::zeros(mesh);
    for_each_physical_face(mesh, |p, i, face, normal| {
        let value = &field.boundary()[p][i];
        out.boundary_mut()[p][i] = match normal {
            Some(n) => align(value, &n, reference),
            None => {
                debug!("face {face} has no area, copied unchanged");
                *value
            }
        };
    });
    out
}

/// Oriented copy of a cell-centred field's physical boundary values.
///
/// The owner cell of each physical boundary face is rotated with that
/// face's rotation; a cell with several boundary faces keeps the value from
/// the last one.
pub fn orient_boundary_cells(
    mesh: &PolyMesh,
    field: &VolField<SymmTensor>,
    reference: &Vector3<f64>,
) -> VolField<SymmTensor> {
    let mut out = VolField::zeros(mesh);
    for_each_physical_face(mesh, |p, i, face, normal| {
        let cell = mesh.owner()[face];
        let value = &field.boundary()[p][i];
        let cell_value = &field.internal()[cell];
        let (b, c) = match normal {
            Some(n) => (align(value, &n, reference), align(cell_value, &n, reference)),
            None => {
                debug!("face {face} has no area, copied unchanged");
                (*value, *cell_value)
            }
        };
        out.boundary_mut()[p][i] = b;
        out.internal_mut()[cell] = c;
    });
    out
}

fn orient_stored<L: FieldLocation>(
    case: &MeshCase,
    mesh: &PolyMesh,
    time: &str,
    config: &OrientationConfig,
    reference: &Vector3<f64>,
    orient: impl Fn(&PolyMesh, &GeometricField<SymmTensor, L>, &Vector3<f64>) -> GeometricField<SymmTensor, L>,
) -> Result<(), MeshRemapError> {
    let field: GeometricField<SymmTensor, L> = case.read_field_checked(mesh, time, &config.field)?;
    let oriented = orient(mesh, &field, reference);
    let name = format!("{}{ORIENTED_SUFFIX}", config.field);
    case.write_field(time, &name, &oriented)?;
    info!("{time}: wrote {name}");
    Ok(())
}

/// Run the orientation utility; returns the times processed.
pub fn run_orientation(config: &OrientationConfig) -> Result<Vec<String>, MeshRemapError> {
    let reference = Vector3::from(config.reference)
        .try_normalize(f64::MIN_POSITIVE)
        .ok_or_else(|| {
            MeshRemapError::InvalidGeometry(format!(
                "reference direction {:?} has no length",
                config.reference
            ))
        })?;
    let case = MeshCase::new(&config.case);
    let mesh = case.read_mesh()?;
    let times = case.select_times(&config.times)?;

    let surface_class = SurfaceField::<SymmTensor>::class_name();
    let vol_class = VolField::<SymmTensor>::class_name();
    for time in &times {
        let class = case.field_class(time, &config.field)?;
        info!("{time}: {} is {class}", config.field);
        if class == surface_class {
            orient_stored::<Surface>(&case, &mesh, time, config, &reference, orient_boundary_faces)?;
        } else if class == vol_class {
            orient_stored::<Vol>(&case, &mesh, time, config, &reference, orient_boundary_cells)?;
        } else {
            return Err(MeshRemapError::UnsupportedFieldType {
                field: config.field.clone(),
                found: class,
            });
        }
    }
    Ok(times)
}
