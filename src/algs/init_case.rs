//! Zero-initialise the strain fields the transfer pass reads.

use log::info;

use crate::config::InitCaseConfig;
use crate::data::field::{SurfaceField, VolField};
use crate::data::tensor::SymmTensor;
use crate::io::case::{DecomposedCase, MeshCase};
use crate::io::dictionary::DECOMPOSE_PAR_DICT;
use crate::mesh_error::MeshRemapError;

/// Write zero `epsilonP` and `epsilonPf` into one mesh case.
pub fn init_mesh_case(case: &MeshCase, config: &InitCaseConfig) -> Result<(), MeshRemapError> {
    let mesh = case.read_mesh()?;
    let names = &config.fields;
    case.write_field(
        &config.time,
        &names.strain,
        &VolField::<SymmTensor>::zeros(&mesh),
    )?;
    case.write_field(
        &config.time,
        &names.strain_faces,
        &SurfaceField::<SymmTensor>::zeros(&mesh),
    )?;
    info!(
        "{}: wrote {} and {} at {}",
        case.root().display(),
        names.strain,
        names.strain_faces,
        config.time
    );
    Ok(())
}

/// Initialise `config.case`; a decomposed case has every subdomain
/// initialised. Returns the number of mesh cases written.
pub fn run_init_case(config: &InitCaseConfig) -> Result<usize, MeshRemapError> {
    if config.case.join(DECOMPOSE_PAR_DICT).is_file() {
        let decomposed = DecomposedCase::open(&config.case)?;
        for (_, sub) in decomposed.subdomains() {
            init_mesh_case(&sub, config)?;
        }
        Ok(decomposed.n_subdomains())
    } else {
        init_mesh_case(&MeshCase::new(&config.case), config)?;
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::distribute::{distribute_mesh, partition_by_axis};
    use crate::mesh_generation::{BlockSpec, block_mesh};

    #[test]
    fn single_case_gets_both_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = block_mesh(&BlockSpec::new([2, 2, 1])).unwrap();
        let case = MeshCase::new(dir.path());
        case.write_mesh(&mesh).unwrap();

        assert_eq!(run_init_case(&InitCaseConfig::new(dir.path())).unwrap(), 1);
        let vol: VolField<SymmTensor> = case.read_field_checked(&mesh, "0", "epsilonP").unwrap();
        assert!(vol.internal().iter().all(|t| *t == SymmTensor::ZERO));
        let faces: SurfaceField<SymmTensor> =
            case.read_field_checked(&mesh, "0", "epsilonPf").unwrap();
        assert_eq!(faces.internal().len(), mesh.n_internal_faces());
    }

    #[test]
    fn decomposed_case_initialises_every_subdomain() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = block_mesh(&BlockSpec::new([4, 1, 1])).unwrap();
        let parts = partition_by_axis(&mesh, 0, 3);
        let pieces = distribute_mesh(&mesh, &parts, 3).unwrap();
        let case = DecomposedCase::create(dir.path(), &pieces).unwrap();

        let mut config = InitCaseConfig::new(dir.path());
        config.time = "0.5".into();
        assert_eq!(run_init_case(&config).unwrap(), 3);
        for (_, sub) in case.subdomains() {
            assert!(sub.has_field("0.5", "epsilonP"));
            assert!(sub.has_field("0.5", "epsilonPf"));
        }
    }

    #[test]
    fn missing_mesh_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run_init_case(&InitCaseConfig::new(dir.path())),
            Err(MeshRemapError::MissingFile(_))
        ));
    }
}
