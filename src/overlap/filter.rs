//! Bounding-box screen for (local, global) subdomain pairs.
//!
//! One cached box per global subdomain. Pairs whose boxes are disjoint never
//! reach index resolution.

use serde::{Deserialize, Serialize};

use crate::geometry::bounds::BoundingBox;
use crate::topology::poly_mesh::PolyMesh;

/// When a cached global box is rebuilt from its mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Compute on first use, then recompute whenever the cached box already
    /// overlaps the current local box. A cached box that does not overlap
    /// is never refreshed.
    #[default]
    Legacy,
    /// Compute once per global subdomain.
    ComputeOnce,
}

/// Per-global-subdomain box cache and overlap test.
#[derive(Clone, Debug)]
pub struct OverlapFilter {
    policy: OverlapPolicy,
    boxes: Vec<Option<BoundingBox>>,
    computations: usize,
}

impl OverlapFilter {
    pub fn new(n_global: usize, policy: OverlapPolicy) -> Self {
        Self {
            policy,
            boxes: vec![None; n_global],
            computations: 0,
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Whether the pair (`local_box`, `global`) should be resolved.
    ///
    /// Global subdomains without cells and indices outside the filter are
    /// never admitted.
    pub fn admits(&mut self, global: usize, mesh: &PolyMesh, local_box: &BoundingBox) -> bool {
        if mesh.n_cells() == 0 {
            return false;
        }
        let Some(slot) = self.boxes.get_mut(global) else {
            return false;
        };
        let recompute = match (self.policy, slot.as_ref()) {
            (_, None) => true,
            (OverlapPolicy::Legacy, Some(cached)) => cached.overlaps(local_box),
            (OverlapPolicy::ComputeOnce, Some(_)) => false,
        };
        if recompute {
            *slot = Some(mesh.bounds());
            self.computations += 1;
        }
        slot.as_ref().is_some_and(|bb| bb.overlaps(local_box))
    }

    /// Number of box computations so far.
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn cached_box(&self, global: usize) -> Option<&BoundingBox> {
        self.boxes.get(global).and_then(Option::as_ref)
    }
}
