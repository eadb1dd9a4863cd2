//! On-disk formats and case layout.
//!
//! - [`foam_list`]: ASCII label lists (addressing, maps, membership)
//! - [`dictionary`]: `decomposeParDict`
//! - [`field_io`]: JSON field files
//! - [`case`]: mesh cases and decomposed cases

pub mod case;
pub mod dictionary;
pub mod field_io;
pub mod foam_list;
mod foam_text;

pub use case::{DecomposedCase, MeshCase, TimeSelection};
pub use dictionary::read_number_of_subdomains;
pub use foam_list::{parse_label_list, read_label_list, write_label_list};
