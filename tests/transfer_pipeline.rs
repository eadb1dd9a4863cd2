mod util;

use mesh_remap::algs::create_maps::create_maps;
use mesh_remap::algs::distribute::processor_patch_name;
use mesh_remap::algs::init_case::run_init_case;
use mesh_remap::algs::transfer_case::run_transfer;
use mesh_remap::config::{CreateMapsConfig, InitCaseConfig, TransferConfig, TransferDirection};
use mesh_remap::data::field::{SurfaceField, VolField};
use mesh_remap::data::tensor::SymmTensor;
use mesh_remap::io::case::{DecomposedCase, MeshCase};
use mesh_remap::mesh_error::MeshRemapError;
use mesh_remap::topology::poly_mesh::PolyMesh;
use nalgebra::Vector3;
use util::{assert_tensor_close, block, diag, slab_case};

const TIME: &str = "1";

struct Cases {
    _dir: tempfile::TempDir,
    global: DecomposedCase,
    local: DecomposedCase,
}

// 8 cells along x. Global: 4 slabs of 2 cells. Local: slabs of 3, 3, 2 cells.
// Every local subdomain carries epsilonP = diag(original cell index) with
// boundary values diag(-1); every global subdomain starts from zeros.
fn setup() -> Cases {
    let dir = tempfile::tempdir().unwrap();
    let mesh = block([8, 1, 1]);
    let global = slab_case(&dir.path().join("global"), &mesh, 4);
    let local = slab_case(&dir.path().join("local"), &mesh, 3);
    create_maps(&CreateMapsConfig::new(global.root(), local.root())).unwrap();

    let mut init = InitCaseConfig::new(global.root());
    init.time = TIME.into();
    run_init_case(&init).unwrap();

    for (_, sub) in local.subdomains() {
        let mesh = sub.read_mesh().unwrap();
        let cells = sub.read_cell_addressing().unwrap();
        let mut field = VolField::uniform(&mesh, diag(-1.0));
        for (c, original) in cells.iter().enumerate() {
            field.internal_mut()[c] = diag(original as f64);
        }
        sub.write_field(TIME, "epsilonP", &field).unwrap();
    }
    Cases {
        _dir: dir,
        global,
        local,
    }
}

fn patch_value<T: Copy>(mesh: &PolyMesh, boundary: &[Vec<T>], name: &str) -> T {
    let p = mesh.patches().iter().position(|p| p.name == name).unwrap();
    boundary[p][0]
}

#[test]
fn scatter_assembles_the_global_field() {
    let cases = setup();
    let summary = run_transfer(&TransferConfig::new(cases.global.root(), cases.local.root())).unwrap();
    assert_eq!(summary.global_time.as_deref(), Some(TIME));
    assert_eq!(summary.pairs, 7);
    assert_eq!(summary.stats.cells, 8);

    for (_, sub) in cases.global.subdomains() {
        let mesh = sub.read_mesh().unwrap();
        let cells = sub.read_cell_addressing().unwrap();
        let field: VolField<SymmTensor> = sub.read_field_checked(&mesh, TIME, "epsilonP").unwrap();
        for (c, original) in cells.iter().enumerate() {
            assert_tensor_close(&field.internal()[c], &diag(original as f64));
        }
    }

    // global 0 ends at x = 2, inside local 0: interpolated from cells 1 and 2
    let g0 = cases.global.subdomain(0);
    let mesh = g0.read_mesh().unwrap();
    let field: VolField<SymmTensor> = g0.read_field(TIME, "epsilonP").unwrap();
    assert_tensor_close(
        &patch_value(&mesh, field.boundary(), &processor_patch_name(0, 1)),
        &diag(1.5),
    );
    assert_tensor_close(&patch_value(&mesh, field.boundary(), "x_min"), &diag(-1.0));

    // global 1 ends at x = 4, inside local 1
    let g1 = cases.global.subdomain(1);
    let mesh = g1.read_mesh().unwrap();
    let field: VolField<SymmTensor> = g1.read_field(TIME, "epsilonP").unwrap();
    assert_tensor_close(
        &patch_value(&mesh, field.boundary(), &processor_patch_name(1, 2)),
        &diag(3.5),
    );
}

#[test]
fn unstructured_scatter_moves_face_values() {
    let cases = setup();
    let config =
        TransferConfig::new(cases.global.root(), cases.local.root()).with_unstructured(true);
    let summary = run_transfer(&config).unwrap();
    assert!(summary.faces_moved > 0);

    let g0 = cases.global.subdomain(0);
    let mesh = g0.read_mesh().unwrap();
    let faces: SurfaceField<SymmTensor> = g0.read_field_checked(&mesh, TIME, "epsilonPf").unwrap();
    // the only internal face of global 0 sits between cells 0 and 1
    assert_tensor_close(&faces.internal()[0], &diag(0.5));
    assert_tensor_close(
        &patch_value(&mesh, faces.boundary(), &processor_patch_name(0, 1)),
        &diag(1.5),
    );
}

#[test]
fn gather_fills_local_displacement() {
    let cases = setup();
    for (_, sub) in cases.global.subdomains() {
        let mesh = sub.read_mesh().unwrap();
        let cells = sub.read_cell_addressing().unwrap();
        let mut d = VolField::uniform(&mesh, Vector3::new(-1.0, 0.0, 0.0));
        for (c, original) in cells.iter().enumerate() {
            d.internal_mut()[c] = Vector3::new(original as f64, 0.0, 0.0);
        }
        sub.write_field(TIME, "D", &d).unwrap();
    }

    let config = TransferConfig::new(cases.global.root(), cases.local.root())
        .with_direction(TransferDirection::GlobalToLocal);
    let summary = run_transfer(&config).unwrap();
    assert_eq!(summary.fields_written, cases.local.n_subdomains());

    let l0: MeshCase = cases.local.subdomain(0);
    let mesh = l0.read_mesh().unwrap();
    let d: VolField<Vector3<f64>> = l0.read_field_checked(&mesh, TIME, "D").unwrap();
    assert_eq!(
        d.internal(),
        &[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0)
        ]
    );
    // local 0 ends at x = 3, inside global 1: interpolated from cells 2 and 3
    let proc = patch_value(&mesh, d.boundary(), &processor_patch_name(0, 1));
    assert!((proc - Vector3::new(2.5, 0.0, 0.0)).norm() < 1e-10);
    assert_eq!(patch_value(&mesh, d.boundary(), "x_min"), Vector3::new(-1.0, 0.0, 0.0));
}

#[test]
fn missing_global_field_is_fatal() {
    let cases = setup();
    let config = TransferConfig::new(cases.global.root(), cases.local.root())
        .with_direction(TransferDirection::GlobalToLocal);
    assert!(matches!(run_transfer(&config), Err(MeshRemapError::MissingFile(_))));
}
