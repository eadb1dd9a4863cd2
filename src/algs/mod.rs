//! Re-export public algorithms.

pub mod create_maps;
pub mod distribute;
pub mod field_transfer;
pub mod init_case;
pub mod interpolate;
pub mod orientation;
pub mod postprocess;
pub mod resolve;
pub mod transfer_case;

pub use create_maps::{CreateMapsSummary, create_maps};
pub use distribute::{DecomposedPiece, distribute_mesh, partition_by_axis};
pub use field_transfer::{
    PairView, TransferStats, global_to_local, local_faces_to_global, local_to_global,
};
pub use init_case::run_init_case;
pub use interpolate::interpolate_linear;
pub use orientation::{orient_boundary_cells, orient_boundary_faces, run_orientation};
pub use postprocess::{FieldCalculator, run_postprocess, select_calculators};
pub use resolve::{DecompositionAddressing, GlobalSubdomain, resolve_entities, resolve_pair};
pub use transfer_case::{TransferSummary, run_transfer};
