//! Thesaurus item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesaurus_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `thesaurus_item` table.
///
/// Serialized without its version reference; items are always returned in
/// the context of the version they were looked up through.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ThesaurusItem {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub thesaurus_version_id: DbId,
    pub code: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item inside a version.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThesaurusItem {
    pub thesaurus_version_id: DbId,
    #[validate(length(min = 1, max = 31))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub value: String,
}
