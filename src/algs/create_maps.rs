//! Map-creation pass: decomposition maps for every overlapping
//! (local subdomain, global subdomain) pair.
//!
//! All global subdomains are loaded once and kept resident; local
//! subdomains are loaded one at a time. Per local subdomain the pass writes
//! `maps/processor<G>/{faceMap,cellMap}` for every global subdomain with at
//! least one correspondence, and always writes `maps/procGlobalCaseList`.

use log::{debug, info};

use crate::algs::resolve::{DecompositionAddressing, GlobalSubdomain, resolve_pair};
use crate::config::CreateMapsConfig;
use crate::io::case::DecomposedCase;
use crate::mesh_error::MeshRemapError;
use crate::overlap::filter::OverlapFilter;

/// What the pass did, per local subdomain and in total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateMapsSummary {
    /// Global subdomains listed for each local subdomain.
    pub memberships: Vec<Vec<usize>>,
    /// Pairs that passed the bounding-box screen.
    pub pairs_admitted: usize,
    /// Admitted pairs dropped because nothing corresponded.
    pub pairs_dropped: usize,
    /// Global bounding-box computations performed by the screen.
    pub box_computations: usize,
}

/// Run the map-creation pass described by `config`.
pub fn create_maps(config: &CreateMapsConfig) -> Result<CreateMapsSummary, MeshRemapError> {
    let global_case = DecomposedCase::open(&config.global_case)?;
    let local_case = DecomposedCase::open(&config.local_case)?;
    info!(
        "global case {} ({} subdomains), local case {} ({} subdomains)",
        global_case.root().display(),
        global_case.n_subdomains(),
        local_case.root().display(),
        local_case.n_subdomains()
    );

    let globals = global_case
        .subdomains()
        .map(|(_, case)| GlobalSubdomain::load(&case))
        .collect::<Result<Vec<_>, _>>()?;

    let mut filter = OverlapFilter::new(globals.len(), config.overlap_policy);
    let mut summary = CreateMapsSummary::default();

    for (l, case) in local_case.subdomains() {
        let mesh = case.read_mesh()?;
        let addressing = DecompositionAddressing::load(&case)?;
        let local_box = mesh.bounds();

        let mut membership = Vec::new();
        for (g, global) in globals.iter().enumerate() {
            if !filter.admits(g, &global.mesh, &local_box) {
                debug!("local {l} / global {g}: no overlap");
                continue;
            }
            summary.pairs_admitted += 1;
            match resolve_pair(&addressing, global)? {
                Some(maps) => {
                    info!(
                        "mapping local {l} ({} cells) -> global {g} ({} cells): {} cells, {} faces",
                        mesh.n_cells(),
                        global.mesh.n_cells(),
                        maps.cell_map.mapped_count(),
                        maps.face_map.mapped_count()
                    );
                    case.write_pair_maps(g, &maps)?;
                    membership.push(g);
                }
                None => {
                    debug!("local {l} / global {g}: boxes overlap but no entity corresponds");
                    summary.pairs_dropped += 1;
                }
            }
        }
        case.write_membership(&membership)?;
        summary.memberships.push(membership);
    }

    summary.box_computations = filter.computations();
    info!(
        "{} pairs resolved, {} dropped, {} box computations",
        summary.pairs_admitted - summary.pairs_dropped,
        summary.pairs_dropped,
        summary.box_computations
    );
    Ok(summary)
}
