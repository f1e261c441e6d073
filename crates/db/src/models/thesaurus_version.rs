//! Thesaurus version entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesaurus_core::types::{Date, DbId, Timestamp};
use validator::Validate;

use super::thesaurus::Thesaurus;

/// A row from the `thesaurus_version` table.
///
/// `(thesaurus_id, version)`, `(thesaurus_id, start_date)` and
/// `(thesaurus_id, slug)` are each unique.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ThesaurusVersion {
    pub id: DbId,
    pub thesaurus_id: DbId,
    pub version: String,
    /// The version is effective from this date until a later one supersedes it.
    pub start_date: Date,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A version with its owning thesaurus embedded one level deep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThesaurusVersionWithThesaurus {
    #[serde(flatten)]
    pub version: ThesaurusVersion,
    pub thesaurus: Thesaurus,
}

/// DTO for creating a new version of an existing thesaurus.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThesaurusVersion {
    pub thesaurus_id: DbId,
    #[validate(length(min = 1, max = 31))]
    pub version: String,
    pub start_date: Date,
    #[validate(length(min = 1, max = 31))]
    pub slug: String,
}
