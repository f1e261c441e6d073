//! Thesaurus entity model and DTOs.
//!
//! A thesaurus is a named reference vocabulary. Its content lives in dated
//! versions (see [`super::thesaurus_version`]).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesaurus_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `thesaurus` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Thesaurus {
    pub id: DbId,
    pub name: String,
    pub short_name: String,
    /// URL identifier, unique across all thesauruses.
    pub slug: String,
    pub description: String,
    /// Soft-disable flag. Informational only; lookups do not filter on it.
    pub is_actual: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new thesaurus.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThesaurus {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 31))]
    pub short_name: String,
    #[validate(length(min = 1, max = 31))]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_actual: Option<bool>,
}
