mod util;

use mesh_remap::algs::distribute::distribute_mesh;
use mesh_remap::algs::resolve::{
    DecompositionAddressing, GlobalSubdomain, resolve_entities, resolve_pair,
};
use mesh_remap::overlap::filter::{OverlapFilter, OverlapPolicy};
use mesh_remap::topology::addressing::{
    Label, ProcAddressing, UNMAPPED, invert_addressing, normalize_face_signs,
};
use mesh_remap::topology::decomposition_map::{DecompositionMap, PairMaps};
use proptest::prelude::*;
use util::block;

/// Distinct original indices in random order.
fn distinct_indices() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::btree_set(0usize..200, 0..40)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// A cell partition of `n` cells into `k` parts with no empty part.
fn partition(n: usize, k: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..k, n).prop_map(move |mut parts| {
        for (cell, part) in parts.iter_mut().enumerate().take(k) {
            *part = cell;
        }
        parts
    })
}

/// Original cells of every part, ascending.
fn cell_lists(parts: &[usize], k: usize) -> Vec<ProcAddressing> {
    (0..k)
        .map(|p| {
            ProcAddressing::from_original(
                parts
                    .iter()
                    .enumerate()
                    .filter(|&(_, &q)| q == p)
                    .map(|(c, _)| c)
                    .collect(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn inverse_undoes_addressing(original in distinct_indices()) {
        let addressing = ProcAddressing::from_original(original.clone());
        let inverse = invert_addressing(&addressing).unwrap();
        let bound = original.iter().max().map_or(1, |m| m + 1);
        prop_assert_eq!(inverse.bound(), bound);
        for (local, &o) in original.iter().enumerate() {
            prop_assert_eq!(inverse.lookup(o), Some(local));
        }
        let claimed = inverse.as_slice().iter().filter(|&&v| v != UNMAPPED).count();
        prop_assert_eq!(claimed, original.len());
    }

    #[test]
    fn sign_normalization_is_idempotent(mut raw in prop::collection::vec(-1000i64..1000, 0..50)) {
        let magnitudes: Vec<Label> = raw.iter().map(|v| v.abs()).collect();
        normalize_face_signs(&mut raw);
        prop_assert_eq!(&raw, &magnitudes);
        normalize_face_signs(&mut raw);
        prop_assert_eq!(&raw, &magnitudes);
    }

    #[test]
    fn every_local_cell_lands_in_exactly_one_global_subdomain(
        (n, kg, kl, global_parts, local_parts) in (4usize..30, 1usize..5, 1usize..5)
            .prop_flat_map(|(n, kg, kl)| {
                (Just(n), Just(kg), Just(kl), partition(n, kg), partition(n, kl))
            })
    ) {
        let globals = cell_lists(&global_parts, kg);
        let locals = cell_lists(&local_parts, kl);
        for local in &locals {
            let mut hits = vec![0usize; local.len()];
            for (g, global) in globals.iter().enumerate() {
                let reconstruction = DecompositionMap::identity(global.len());
                let (map, exists) =
                    resolve_entities(local, &global.invert().unwrap(), &reconstruction).unwrap();
                prop_assert_eq!(map.len(), local.len());
                prop_assert_eq!(exists, map.mapped_count() > 0);
                for (lc, gc) in map.mapped() {
                    let o = local.get(lc).unwrap();
                    prop_assert_eq!(global_parts[o], g);
                    prop_assert_eq!(global.get(gc), Some(o));
                    hits[lc] += 1;
                }
            }
            prop_assert!(hits.iter().all(|&h| h == 1));
        }
    }

    #[test]
    fn screened_out_pairs_never_share_entities(
        (global_parts, local_parts, policy) in (partition(12, 3), partition(12, 4), any::<bool>())
    ) {
        let mesh = block([4, 3, 1]);
        let policy = if policy { OverlapPolicy::ComputeOnce } else { OverlapPolicy::Legacy };
        let globals: Vec<GlobalSubdomain> = distribute_mesh(&mesh, &global_parts, 3)
            .unwrap()
            .into_iter()
            .map(|piece| {
                let addressing = DecompositionAddressing {
                    cells: ProcAddressing::from_cells(&piece.cell_addressing).unwrap(),
                    faces: ProcAddressing::from_faces(piece.face_addressing.clone()),
                };
                let reconstruction = PairMaps {
                    cell_map: DecompositionMap::identity(piece.mesh.n_cells()),
                    face_map: DecompositionMap::identity(piece.mesh.n_faces()),
                };
                GlobalSubdomain::new(piece.mesh, &addressing, reconstruction).unwrap()
            })
            .collect();

        let mut filter = OverlapFilter::new(globals.len(), policy);
        let mut covered = vec![0usize; mesh.n_cells()];
        for piece in distribute_mesh(&mesh, &local_parts, 4).unwrap() {
            let addressing = DecompositionAddressing {
                cells: ProcAddressing::from_cells(&piece.cell_addressing).unwrap(),
                faces: ProcAddressing::from_faces(piece.face_addressing.clone()),
            };
            let local_box = piece.mesh.bounds();
            for (g, global) in globals.iter().enumerate() {
                let admitted = filter.admits(g, &global.mesh, &local_box);
                let maps = resolve_pair(&addressing, global).unwrap();
                if !admitted {
                    prop_assert!(maps.is_none());
                    continue;
                }
                if let Some(maps) = maps {
                    for (lc, _) in maps.cell_map.mapped() {
                        covered[addressing.cells.get(lc).unwrap()] += 1;
                    }
                }
            }
        }
        prop_assert!(covered.iter().all(|&c| c == 1));
    }
}
