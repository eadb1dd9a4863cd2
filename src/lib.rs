//! # mesh-remap
//!
//! mesh-remap reconciles two independent domain decompositions of the same
//! finite-volume mesh and moves tensor fields between them. A *global*
//! decomposition (used for a global solve) and a *local* decomposition
//! (used for a refined local solve) both record, per subdomain, which
//! original cells and faces they own. From those records the crate derives
//! per-pair cell and face maps, then scatters or gathers fields through them.
//!
//! ## Features
//! - Inversion of partition addressing and cross-decomposition index
//!   resolution ([`algs::resolve`])
//! - Bounding-box screening of subdomain pairs ([`overlap`])
//! - A map-creation pass writing per-pair maps and membership lists
//!   ([`algs::create_maps`])
//! - Field transfer in both directions, with linear interpolation for faces
//!   that are boundary on one side and interior on the other
//!   ([`algs::field_transfer`], [`algs::transfer_case`])
//! - Boundary-orientation, post-processing and case-initialisation utilities
//! - A structured block mesher and a serial decomposer for building cases
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-remap = "0.1"
//! ```
//!
//! ```rust,no_run
//! use mesh_remap::prelude::*;
//!
//! # fn main() -> Result<(), MeshRemapError> {
//! let summary = create_maps(&CreateMapsConfig::new("global", "local"))?;
//! println!("{:?}", summary.memberships);
//! run_transfer(&TransferConfig::new("global", "local"))?;
//! # Ok(())
//! # }
//! ```
//!
//! Each binary (`create-maps`, `sub2mesh`, `patch2cell`, `postprocessing`,
//! `init-case`) is a thin wrapper around one entry point here.

pub mod algs;
pub mod config;
pub mod data;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod mesh_generation;
pub mod overlap;
pub mod topology;

/// A convenient prelude to import the most-used types and entry points:
pub mod prelude {
    pub use crate::algs::create_maps::{CreateMapsSummary, create_maps};
    pub use crate::algs::distribute::{DecomposedPiece, distribute_mesh, partition_by_axis};
    pub use crate::algs::field_transfer::{PairView, global_to_local, local_to_global};
    pub use crate::algs::init_case::run_init_case;
    pub use crate::algs::interpolate::interpolate_linear;
    pub use crate::algs::orientation::run_orientation;
    pub use crate::algs::postprocess::{FieldCalculator, run_postprocess};
    pub use crate::algs::resolve::resolve_pair;
    pub use crate::algs::transfer_case::{TransferSummary, run_transfer};
    pub use crate::config::{
        CreateMapsConfig, FieldNames, InitCaseConfig, OrientationConfig, PostprocessConfig,
        TransferConfig, TransferDirection,
    };
    pub use crate::data::field::{FieldValue, SurfaceField, VolField};
    pub use crate::data::tensor::SymmTensor;
    pub use crate::geometry::bounds::BoundingBox;
    pub use crate::io::case::{DecomposedCase, MeshCase, TimeSelection};
    pub use crate::mesh_error::MeshRemapError;
    pub use crate::mesh_generation::{BlockSpec, block_mesh};
    pub use crate::overlap::filter::{OverlapFilter, OverlapPolicy};
    pub use crate::topology::addressing::{InverseAddressing, Label, invert_addressing};
    pub use crate::topology::decomposition_map::{DecompositionMap, PairMaps};
    pub use crate::topology::poly_mesh::PolyMesh;
}
