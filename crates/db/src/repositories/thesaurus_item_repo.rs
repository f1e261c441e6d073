//! Repository for the `thesaurus_item` table.

use sqlx::PgExecutor;
use thesaurus_core::filter::ItemFilter;
use thesaurus_core::pagination::PageRequest;
use thesaurus_core::types::DbId;

use crate::models::thesaurus_item::{CreateThesaurusItem, ThesaurusItem};

/// Column list for the `thesaurus_item` table.
const COLUMNS: &str = "id, thesaurus_version_id, code, value, created_at, updated_at";

/// Items of version `$1`, narrowed by optional exact `code` (`$2`) and
/// `value` (`$3`). A NULL bind disables that half of the filter.
const FILTER: &str = "WHERE thesaurus_version_id = $1 \
    AND ($2::TEXT IS NULL OR code = $2) \
    AND ($3::TEXT IS NULL OR value = $3)";

/// Provides lookups for the items of a thesaurus version.
pub struct ThesaurusItemRepo;

impl ThesaurusItemRepo {
    /// Insert a new item.
    pub async fn create<'e, E>(executor: E, input: &CreateThesaurusItem) -> Result<ThesaurusItem, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO thesaurus_item (thesaurus_version_id, code, value) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThesaurusItem>(&query)
            .bind(input.thesaurus_version_id)
            .bind(&input.code)
            .bind(&input.value)
            .fetch_one(executor)
            .await
    }

    /// Find one item by id, only if it belongs to `version_id`.
    pub async fn find_in_version<'e, E>(
        executor: E,
        version_id: DbId,
        id: DbId,
    ) -> Result<Option<ThesaurusItem>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM thesaurus_item WHERE thesaurus_version_id = $1 AND id = $2");
        sqlx::query_as::<_, ThesaurusItem>(&query)
            .bind(version_id)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List one page of a version's items matching `filter`, ordered by value.
    ///
    /// An empty filter selects every item of the version.
    pub async fn list_for_version<'e, E>(
        executor: E,
        version_id: DbId,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<Vec<ThesaurusItem>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM thesaurus_item {FILTER} \
             ORDER BY value, id \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, ThesaurusItem>(&query)
            .bind(version_id)
            .bind(filter.code())
            .bind(filter.value())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(executor)
            .await
    }

    /// Count a version's items matching `filter`.
    pub async fn count_for_version<'e, E>(
        executor: E,
        version_id: DbId,
        filter: &ItemFilter,
    ) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT COUNT(*)::BIGINT FROM thesaurus_item {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(version_id)
            .bind(filter.code())
            .bind(filter.value())
            .fetch_one(executor)
            .await
    }
}
