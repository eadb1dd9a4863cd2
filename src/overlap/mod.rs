//! Spatial screening of subdomain pairs before index resolution.

pub mod filter;

pub use filter::{OverlapFilter, OverlapPolicy};
