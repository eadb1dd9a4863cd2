//! Structured mesh generators.

pub mod block;

pub use block::{
    BOUNDARY_X_MAX, BOUNDARY_X_MIN, BOUNDARY_Y_MAX, BOUNDARY_Y_MIN, BOUNDARY_Z_MAX,
    BOUNDARY_Z_MIN, BlockSpec, block_mesh,
};
