//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO used by the fixture loader

pub mod thesaurus;
pub mod thesaurus_item;
pub mod thesaurus_version;
