//! Field transfer pass over two decomposed cases.
//!
//! Reads the maps written by [`create_maps`](crate::algs::create_maps) and
//! moves fields between every local subdomain and the global subdomains on
//! its membership list. All meshes of both cases stay resident. Global
//! fields are loaded on first use and kept in memory; after each local
//! subdomain the global fields it touched are written once, and in the
//! gather direction the local field is written once.
//!
//! Each local subdomain works at its latest time. The global subdomains
//! work at the latest time of the last local subdomain.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use itertools::Itertools;
use log::{debug, info};
use nalgebra::Vector3;

use crate::algs::field_transfer::{
    PairView, TransferStats, global_to_local, local_faces_to_global, local_to_global,
};
use crate::algs::interpolate::interpolate_linear;
use crate::config::{TransferConfig, TransferDirection};
use crate::data::field::{FieldLocation, FieldValue, GeometricField, SurfaceField, VolField};
use crate::data::tensor::SymmTensor;
use crate::io::case::{DecomposedCase, MeshCase};
use crate::mesh_error::MeshRemapError;
use crate::topology::poly_mesh::PolyMesh;

/// Totals of one transfer pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferSummary {
    /// Time the global fields were read and written at.
    pub global_time: Option<String>,
    /// Subdomain pairs processed.
    pub pairs: usize,
    pub stats: TransferStats,
    /// Face values moved between face-centred fields.
    pub faces_moved: usize,
    /// Field files written.
    pub fields_written: usize,
}

impl TransferSummary {
    fn add(&mut self, stats: TransferStats) {
        self.stats.cells += stats.cells;
        self.stats.boundary_faces += stats.boundary_faces;
        self.stats.interpolated_faces += stats.interpolated_faces;
    }
}

struct Subdomain {
    case: MeshCase,
    mesh: PolyMesh,
}

/// Field of type `T`, or zeros when the file does not exist.
fn read_or_zero<T: FieldValue, L: FieldLocation>(
    sub: &Subdomain,
    time: &str,
    name: &str,
) -> Result<GeometricField<T, L>, MeshRemapError> {
    if sub.case.has_field(time, name) {
        sub.case.read_field_checked(&sub.mesh, time, name)
    } else {
        debug!("{}: no {name} at {time}, starting from zero", sub.case.root().display());
        Ok(GeometricField::zeros(&sub.mesh))
    }
}

/// Resident global fields, loaded on first use.
struct GlobalFields<F> {
    name: String,
    fields: HashMap<usize, F>,
}

impl<F> GlobalFields<F> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: HashMap::new(),
        }
    }
}

impl<T: FieldValue, L: FieldLocation> GlobalFields<GeometricField<T, L>> {
    fn get_mut(
        &mut self,
        g: usize,
        sub: &Subdomain,
        time: &str,
    ) -> Result<&mut GeometricField<T, L>, MeshRemapError> {
        match self.fields.entry(g) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let field = sub.case.read_field_checked(&sub.mesh, time, &self.name)?;
                Ok(slot.insert(field))
            }
        }
    }

    fn write(&self, g: usize, sub: &Subdomain, time: &str) -> Result<bool, MeshRemapError> {
        match self.fields.get(&g) {
            Some(field) => {
                sub.case.write_field(time, &self.name, field)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn load_subdomains(case: &DecomposedCase) -> Result<Vec<Subdomain>, MeshRemapError> {
    case.subdomains()
        .map(|(_, case)| {
            let mesh = case.read_mesh()?;
            Ok(Subdomain { case, mesh })
        })
        .collect()
}

/// Global subdomains on a local membership list, each once, in order.
fn membership(local: &Subdomain, n_global: usize) -> Result<Vec<usize>, MeshRemapError> {
    local
        .case
        .read_membership()?
        .into_iter()
        .unique()
        .map(|g| {
            usize::try_from(g)
                .ok()
                .filter(|&g| g < n_global)
                .ok_or(MeshRemapError::UnknownSubdomain {
                    subdomain: g,
                    count: n_global,
                })
        })
        .collect()
}

/// Run the transfer pass described by `config`.
pub fn run_transfer(config: &TransferConfig) -> Result<TransferSummary, MeshRemapError> {
    let global_case = DecomposedCase::open(&config.global_case)?;
    let local_case = DecomposedCase::open(&config.local_case)?;
    info!(
        "global case {} ({} subdomains), local case {} ({} subdomains), {:?}{}",
        global_case.root().display(),
        global_case.n_subdomains(),
        local_case.root().display(),
        local_case.n_subdomains(),
        config.direction,
        if config.unstructured { ", unstructured" } else { "" }
    );

    let locals = load_subdomains(&local_case)?;
    let globals = load_subdomains(&global_case)?;
    let local_times = locals
        .iter()
        .map(|sub| sub.case.latest_time())
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = TransferSummary::default();
    let Some(global_time) = local_times.last().cloned() else {
        info!("local case has no subdomains, nothing to transfer");
        return Ok(summary);
    };
    info!("global time {global_time}");
    summary.global_time = Some(global_time.clone());

    let names = &config.fields;
    let mut strain = GlobalFields::<VolField<SymmTensor>>::new(&names.strain);
    let mut strain_faces = GlobalFields::<SurfaceField<SymmTensor>>::new(&names.strain_faces);
    let mut displacement: HashMap<usize, (VolField<Vector3<f64>>, SurfaceField<Vector3<f64>>)> =
        HashMap::new();

    for ((l, local), time) in locals.iter().enumerate().zip(&local_times) {
        let targets = membership(local, globals.len())?;
        if targets.is_empty() {
            debug!("local {l}: empty membership list");
        }

        match config.direction {
            TransferDirection::LocalToGlobal => {
                let local_strain: VolField<SymmTensor> = read_or_zero(local, time, &names.strain)?;
                let local_faces = interpolate_linear(&local.mesh, &local_strain);

                for &g in &targets {
                    let global = &globals[g];
                    let maps = local.case.read_pair_maps(g)?;
                    let pair = PairView::new(&local.mesh, &global.mesh, &maps);

                    let target = strain.get_mut(g, global, &global_time)?;
                    let stats = local_to_global(&pair, &local_strain, &local_faces, target)?;
                    info!(
                        "{}: local {l} ({} cells) -> global {g} ({} cells): {} cells, {} boundary faces, {} interpolated faces",
                        names.strain,
                        local.mesh.n_cells(),
                        global.mesh.n_cells(),
                        stats.cells,
                        stats.boundary_faces,
                        stats.interpolated_faces
                    );
                    summary.add(stats);

                    if config.unstructured {
                        let target = strain_faces.get_mut(g, global, &global_time)?;
                        let moved = local_faces_to_global(&pair, &local_faces, target)?;
                        info!("{}: local {l} -> global {g}: {moved} faces", names.strain_faces);
                        summary.faces_moved += moved;
                    }
                    summary.pairs += 1;
                }

                for &g in &targets {
                    if strain.write(g, &globals[g], &global_time)? {
                        summary.fields_written += 1;
                    }
                    if config.unstructured && strain_faces.write(g, &globals[g], &global_time)? {
                        summary.fields_written += 1;
                    }
                }
            }
            TransferDirection::GlobalToLocal => {
                let mut local_disp: VolField<Vector3<f64>> =
                    read_or_zero(local, time, &names.displacement)?;

                for &g in &targets {
                    let global = &globals[g];
                    let maps = local.case.read_pair_maps(g)?;
                    let pair = PairView::new(&local.mesh, &global.mesh, &maps);

                    let (field, faces) = match displacement.entry(g) {
                        Entry::Occupied(slot) => slot.into_mut(),
                        Entry::Vacant(slot) => {
                            let field: VolField<Vector3<f64>> = global.case.read_field_checked(
                                &global.mesh,
                                &global_time,
                                &names.displacement,
                            )?;
                            let faces = interpolate_linear(&global.mesh, &field);
                            slot.insert((field, faces))
                        }
                    };
                    let stats = global_to_local(&pair, field, faces, &mut local_disp)?;
                    info!(
                        "{}: global {g} ({} cells) -> local {l} ({} cells): {} cells, {} boundary faces, {} interpolated faces",
                        names.displacement,
                        global.mesh.n_cells(),
                        local.mesh.n_cells(),
                        stats.cells,
                        stats.boundary_faces,
                        stats.interpolated_faces
                    );
                    summary.add(stats);
                    summary.pairs += 1;
                }

                local.case.write_field(time, &names.displacement, &local_disp)?;
                summary.fields_written += 1;
            }
        }
    }

    info!(
        "{} pairs, {} cells, {} fields written",
        summary.pairs, summary.stats.cells, summary.fields_written
    );
    Ok(summary)
}
