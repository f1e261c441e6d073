//! Domain building blocks for the thesaurus reference-data service.
//!
//! This crate has no I/O and no internal dependencies so both the
//! repository layer and the HTTP layer can share its types.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod types;
