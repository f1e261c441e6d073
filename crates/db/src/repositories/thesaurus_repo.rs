//! Repository for the `thesaurus` table.

use sqlx::PgExecutor;
use thesaurus_core::types::DbId;

use crate::models::thesaurus::{CreateThesaurus, Thesaurus};

/// Column list for the `thesaurus` table.
const COLUMNS: &str = "id, name, short_name, slug, description, is_actual, created_at, updated_at";

/// Provides lookups for thesauruses.
pub struct ThesaurusRepo;

impl ThesaurusRepo {
    /// Insert a new thesaurus. `description` defaults to empty, `is_actual` to true.
    pub async fn create<'e, E>(executor: E, input: &CreateThesaurus) -> Result<Thesaurus, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO thesaurus (name, short_name, slug, description, is_actual) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thesaurus>(&query)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.is_actual)
            .fetch_one(executor)
            .await
    }

    /// Find a thesaurus by its URL slug.
    pub async fn find_by_slug<'e, E>(executor: E, slug: &str) -> Result<Option<Thesaurus>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM thesaurus WHERE slug = $1");
        sqlx::query_as::<_, Thesaurus>(&query)
            .bind(slug)
            .fetch_optional(executor)
            .await
    }

    /// Fetch every thesaurus whose id is in `ids`, ordered by name.
    pub async fn list_by_ids<'e, E>(executor: E, ids: &[DbId]) -> Result<Vec<Thesaurus>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM thesaurus WHERE id = ANY($1) ORDER BY name");
        sqlx::query_as::<_, Thesaurus>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }
}
