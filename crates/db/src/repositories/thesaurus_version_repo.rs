//! Repository for the `thesaurus_version` table.
//!
//! Also hosts the "as of date" resolution queries: the version of a
//! thesaurus that is actual on date `D` is the one with the greatest
//! `start_date <= D`. Both the single-thesaurus and the all-thesauruses form
//! run as one statement on the database side.

use sqlx::PgExecutor;
use thesaurus_core::pagination::PageRequest;
use thesaurus_core::types::{Date, DbId};

use crate::models::thesaurus_version::{CreateThesaurusVersion, ThesaurusVersion};

/// Column list for the `thesaurus_version` table.
const COLUMNS: &str = "id, thesaurus_id, version, start_date, slug, created_at, updated_at";

/// Column list qualified with the `v` alias (used in joined and correlated queries).
const V_COLUMNS: &str =
    "v.id, v.thesaurus_id, v.version, v.start_date, v.slug, v.created_at, v.updated_at";

/// Joins the owning thesaurus so lists can be ordered by its name.
const JOIN_THESAURUS: &str = "JOIN thesaurus t ON t.id = v.thesaurus_id";

/// Default ordering: by thesaurus name, most recent version first.
const ORDER_BY: &str = "ORDER BY t.name, v.start_date DESC, v.id";

/// Keeps only rows whose `start_date` is the latest one `<= $1` within
/// their thesaurus. `(thesaurus_id, start_date)` is unique, so at most one
/// row per thesaurus survives.
const ACTUAL_TO_FILTER: &str = "WHERE v.start_date = (\
        SELECT s.start_date FROM thesaurus_version s \
        WHERE s.thesaurus_id = v.thesaurus_id AND s.start_date <= $1 \
        ORDER BY s.start_date DESC \
        LIMIT 1\
    )";

/// Provides lookups and date resolution for thesaurus versions.
pub struct ThesaurusVersionRepo;

impl ThesaurusVersionRepo {
    /// Insert a new version.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateThesaurusVersion,
    ) -> Result<ThesaurusVersion, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO thesaurus_version (thesaurus_id, version, start_date, slug) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThesaurusVersion>(&query)
            .bind(input.thesaurus_id)
            .bind(&input.version)
            .bind(input.start_date)
            .bind(&input.slug)
            .fetch_one(executor)
            .await
    }

    /// Find a version by its slug within one thesaurus.
    pub async fn find_by_slug<'e, E>(
        executor: E,
        thesaurus_id: DbId,
        slug: &str,
    ) -> Result<Option<ThesaurusVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM thesaurus_version WHERE thesaurus_id = $1 AND slug = $2");
        sqlx::query_as::<_, ThesaurusVersion>(&query)
            .bind(thesaurus_id)
            .bind(slug)
            .fetch_optional(executor)
            .await
    }

    /// List one page of all versions of all thesauruses.
    pub async fn list<'e, E>(executor: E, page: PageRequest) -> Result<Vec<ThesaurusVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {V_COLUMNS} FROM thesaurus_version v {JOIN_THESAURUS} \
             {ORDER_BY} \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ThesaurusVersion>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(executor)
            .await
    }

    /// Total number of versions (for pagination metadata).
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM thesaurus_version")
            .fetch_one(executor)
            .await
    }

    /// The version of `thesaurus_id` that is actual on `date`, if any.
    pub async fn find_actual_to<'e, E>(
        executor: E,
        thesaurus_id: DbId,
        date: Date,
    ) -> Result<Option<ThesaurusVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM thesaurus_version \
             WHERE thesaurus_id = $1 AND start_date <= $2 \
             ORDER BY start_date DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, ThesaurusVersion>(&query)
            .bind(thesaurus_id)
            .bind(date)
            .fetch_optional(executor)
            .await
    }

    /// List one page of the versions actual on `date`, one per thesaurus.
    ///
    /// Thesauruses whose earliest version starts after `date` are absent.
    pub async fn list_actual_to<'e, E>(
        executor: E,
        date: Date,
        page: PageRequest,
    ) -> Result<Vec<ThesaurusVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {V_COLUMNS} FROM thesaurus_version v {JOIN_THESAURUS} \
             {ACTUAL_TO_FILTER} \
             {ORDER_BY} \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ThesaurusVersion>(&query)
            .bind(date)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(executor)
            .await
    }

    /// Number of thesauruses that have a version actual on `date`.
    pub async fn count_actual_to<'e, E>(executor: E, date: Date) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT COUNT(*)::BIGINT FROM thesaurus_version v {ACTUAL_TO_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(date)
            .fetch_one(executor)
            .await
    }
}
