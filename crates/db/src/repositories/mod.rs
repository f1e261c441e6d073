//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! any Postgres executor as the first argument: `&PgPool` for standalone
//! calls, `&mut *tx` when several reads must share one snapshot.

pub mod thesaurus_item_repo;
pub mod thesaurus_repo;
pub mod thesaurus_version_repo;

pub use thesaurus_item_repo::ThesaurusItemRepo;
pub use thesaurus_repo::ThesaurusRepo;
pub use thesaurus_version_repo::ThesaurusVersionRepo;
