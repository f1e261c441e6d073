//! Query facade over the thesaurus repositories.
//!
//! [`ThesaurusService`] is the only entry point the HTTP layer uses. Every
//! operation that issues more than one statement (resolve a version, then
//! read its items; read a page, then count) runs them inside a single
//! `REPEATABLE READ, READ ONLY` transaction, so concurrent administrative
//! writes can never be observed halfway.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use thesaurus_core::error::CoreError;
use thesaurus_core::filter::ItemFilter;
use thesaurus_core::pagination::{Page, PageRequest};
use thesaurus_core::types::{today, Date, DbId};

use crate::models::thesaurus::Thesaurus;
use crate::models::thesaurus_item::ThesaurusItem;
use crate::models::thesaurus_version::{ThesaurusVersion, ThesaurusVersionWithThesaurus};
use crate::repositories::{ThesaurusItemRepo, ThesaurusRepo, ThesaurusVersionRepo};

/// Errors returned by [`ThesaurusService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain-level error (not found, missing parameter).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store or connectivity failure, passed through untouched.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Stateless facade: version resolution and item filtering.
pub struct ThesaurusService;

impl ThesaurusService {
    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Find a thesaurus by slug.
    pub async fn find_thesaurus(pool: &PgPool, slug: &str) -> ServiceResult<Thesaurus> {
        ThesaurusRepo::find_by_slug(pool, slug)
            .await?
            .ok_or_else(|| CoreError::not_found("Thesaurus", format!("slug={slug}")).into())
    }

    /// Find a version of `thesaurus` by its slug.
    pub async fn find_version(
        pool: &PgPool,
        thesaurus: &Thesaurus,
        slug: &str,
    ) -> ServiceResult<ThesaurusVersion> {
        ThesaurusVersionRepo::find_by_slug(pool, thesaurus.id, slug)
            .await?
            .ok_or_else(|| {
                CoreError::not_found(
                    "ThesaurusVersion",
                    format!("slug={slug} in thesaurus {}", thesaurus.slug),
                )
                .into()
            })
    }

    // -----------------------------------------------------------------------
    // Version lists
    // -----------------------------------------------------------------------

    /// Every version of every thesaurus, newest first within a thesaurus.
    pub async fn list_all_versions(
        pool: &PgPool,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusVersionWithThesaurus>> {
        let mut tx = begin_snapshot(pool).await?;

        let versions = ThesaurusVersionRepo::list(&mut *tx, page).await?;
        let count = ThesaurusVersionRepo::count(&mut *tx).await?;
        let results = with_thesauruses(&mut tx, versions).await?;

        tx.commit().await?;
        Ok(Page::new(results, count, page))
    }

    /// For each thesaurus, the version actual on `date`.
    ///
    /// Thesauruses without a version starting on or before `date` are left
    /// out of the result.
    pub async fn list_current_versions_as_of(
        pool: &PgPool,
        date: Date,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusVersionWithThesaurus>> {
        let mut tx = begin_snapshot(pool).await?;

        let versions = ThesaurusVersionRepo::list_actual_to(&mut *tx, date, page).await?;
        let count = ThesaurusVersionRepo::count_actual_to(&mut *tx, date).await?;
        let results = with_thesauruses(&mut tx, versions).await?;

        tx.commit().await?;
        tracing::debug!(%date, count, "Resolved current versions");
        Ok(Page::new(results, count, page))
    }

    /// The version of `thesaurus` actual on `date`.
    pub async fn current_version_as_of(
        pool: &PgPool,
        thesaurus: &Thesaurus,
        date: Date,
    ) -> ServiceResult<ThesaurusVersion> {
        let mut conn = pool.acquire().await?;
        resolve_current(&mut conn, thesaurus, date).await
    }

    // -----------------------------------------------------------------------
    // Items of the current version
    // -----------------------------------------------------------------------

    /// All items of the version of `thesaurus` that is actual today.
    pub async fn get_current_version_items(
        pool: &PgPool,
        thesaurus: &Thesaurus,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusItem>> {
        Self::get_current_version_items_as_of(pool, thesaurus, today(), page).await
    }

    /// All items of the version of `thesaurus` that is actual on `date`.
    pub async fn get_current_version_items_as_of(
        pool: &PgPool,
        thesaurus: &Thesaurus,
        date: Date,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusItem>> {
        let mut tx = begin_snapshot(pool).await?;

        let version = resolve_current(&mut tx, thesaurus, date).await?;
        let items = items_page(&mut tx, version.id, &ItemFilter::default(), page).await?;

        tx.commit().await?;
        Ok(items)
    }

    /// Items of today's version of `thesaurus` matching `filter`.
    ///
    /// Fails with [`CoreError::MissingParameter`] when `filter` is empty and
    /// with [`CoreError::NotFound`] when nothing matches.
    pub async fn validate_current_version_item(
        pool: &PgPool,
        thesaurus: &Thesaurus,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusItem>> {
        Self::validate_current_version_item_as_of(pool, thesaurus, filter, today(), page).await
    }

    /// Items of the version of `thesaurus` actual on `date` matching `filter`.
    pub async fn validate_current_version_item_as_of(
        pool: &PgPool,
        thesaurus: &Thesaurus,
        filter: &ItemFilter,
        date: Date,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusItem>> {
        filter.require_any()?;
        let mut tx = begin_snapshot(pool).await?;

        let version = resolve_current(&mut tx, thesaurus, date).await?;
        let items = validated_items_page(&mut tx, version.id, filter, page).await?;

        tx.commit().await?;
        Ok(items)
    }

    /// A single item of today's version of `thesaurus`.
    pub async fn get_current_version_item(
        pool: &PgPool,
        thesaurus: &Thesaurus,
        item_id: DbId,
    ) -> ServiceResult<ThesaurusItem> {
        let mut tx = begin_snapshot(pool).await?;

        let version = resolve_current(&mut tx, thesaurus, today()).await?;
        let item = find_item(&mut tx, &version, item_id).await?;

        tx.commit().await?;
        Ok(item)
    }

    // -----------------------------------------------------------------------
    // Items of an explicit version
    // -----------------------------------------------------------------------

    /// All items of `version`.
    pub async fn get_version_items(
        pool: &PgPool,
        version: &ThesaurusVersion,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusItem>> {
        let mut tx = begin_snapshot(pool).await?;
        let items = items_page(&mut tx, version.id, &ItemFilter::default(), page).await?;
        tx.commit().await?;
        Ok(items)
    }

    /// Items of `version` matching `filter`.
    ///
    /// Fails with [`CoreError::MissingParameter`] when `filter` is empty and
    /// with [`CoreError::NotFound`] when nothing matches.
    pub async fn validate_version_item(
        pool: &PgPool,
        version: &ThesaurusVersion,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<ThesaurusItem>> {
        filter.require_any()?;
        let mut tx = begin_snapshot(pool).await?;
        let items = validated_items_page(&mut tx, version.id, filter, page).await?;
        tx.commit().await?;
        Ok(items)
    }

    /// A single item of `version`.
    pub async fn get_version_item(
        pool: &PgPool,
        version: &ThesaurusVersion,
        item_id: DbId,
    ) -> ServiceResult<ThesaurusItem> {
        let mut conn = pool.acquire().await?;
        find_item(&mut conn, version, item_id).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open a read-only transaction that sees one consistent snapshot.
async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

async fn resolve_current(
    conn: &mut PgConnection,
    thesaurus: &Thesaurus,
    date: Date,
) -> ServiceResult<ThesaurusVersion> {
    ThesaurusVersionRepo::find_actual_to(&mut *conn, thesaurus.id, date)
        .await?
        .ok_or_else(|| {
            CoreError::not_found(
                "ThesaurusVersion",
                format!("actual_to={date} in thesaurus {}", thesaurus.slug),
            )
            .into()
        })
}

async fn items_page(
    conn: &mut PgConnection,
    version_id: DbId,
    filter: &ItemFilter,
    page: PageRequest,
) -> Result<Page<ThesaurusItem>, sqlx::Error> {
    let items = ThesaurusItemRepo::list_for_version(&mut *conn, version_id, filter, page).await?;
    let count = ThesaurusItemRepo::count_for_version(&mut *conn, version_id, filter).await?;
    Ok(Page::new(items, count, page))
}

/// Like [`items_page`], but zero matches is a not-found condition.
async fn validated_items_page(
    conn: &mut PgConnection,
    version_id: DbId,
    filter: &ItemFilter,
    page: PageRequest,
) -> ServiceResult<Page<ThesaurusItem>> {
    let items = items_page(conn, version_id, filter, page).await?;
    if items.count == 0 {
        return Err(CoreError::not_found("ThesaurusItem", filter.describe()).into());
    }
    Ok(items)
}

async fn find_item(
    conn: &mut PgConnection,
    version: &ThesaurusVersion,
    item_id: DbId,
) -> ServiceResult<ThesaurusItem> {
    ThesaurusItemRepo::find_in_version(&mut *conn, version.id, item_id)
        .await?
        .ok_or_else(|| {
            CoreError::not_found(
                "ThesaurusItem",
                format!("id={item_id} in version {}", version.slug),
            )
            .into()
        })
}

/// Attach each version's thesaurus, preserving the version order.
async fn with_thesauruses(
    conn: &mut PgConnection,
    versions: Vec<ThesaurusVersion>,
) -> Result<Vec<ThesaurusVersionWithThesaurus>, sqlx::Error> {
    let mut ids: Vec<DbId> = versions.iter().map(|v| v.thesaurus_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let thesauruses: HashMap<DbId, Thesaurus> = ThesaurusRepo::list_by_ids(&mut *conn, &ids)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    // The foreign key guarantees every version's thesaurus is present.
    Ok(versions
        .into_iter()
        .filter_map(|version| {
            let thesaurus = thesauruses.get(&version.thesaurus_id)?.clone();
            Some(ThesaurusVersionWithThesaurus { version, thesaurus })
        })
        .collect())
}
