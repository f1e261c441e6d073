//! Integration tests for `ThesaurusService` against the reference fixture.
//!
//! Fixture: 6 thesauruses, 6 versions in total. `ias-smo` has two versions
//! (2022-07-20 "101" with 3 items, 2022-08-10 "102" with 2 items), `okato`
//! has one version from 2022-01-01, three others only have versions dated in
//! 2099 and `oksm` has none.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;
use thesaurus_core::error::CoreError;
use thesaurus_core::filter::ItemFilter;
use thesaurus_core::pagination::PageRequest;
use thesaurus_db::fixtures;
use thesaurus_db::service::{ServiceError, ThesaurusService};

const FIXTURE: &str = include_str!("../../../db/fixtures/thesauruses.json");

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed(pool: &PgPool) {
    let parsed = fixtures::parse(FIXTURE).unwrap();
    fixtures::load(pool, &parsed).await.unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn page() -> PageRequest {
    PageRequest::default()
}

// ---------------------------------------------------------------------------
// Version lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_all_versions(pool: PgPool) {
    seed(&pool).await;

    let result = ThesaurusService::list_all_versions(&pool, page()).await.unwrap();
    assert_eq!(result.count, 6);
    assert_eq!(result.results.len(), 6);

    // Newest version first within a thesaurus.
    let ias: Vec<_> = result
        .results
        .iter()
        .filter(|v| v.thesaurus.slug == "ias-smo")
        .map(|v| v.version.slug.as_str())
        .collect();
    assert_eq!(ias, vec!["102", "101"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_version_lists_follow_thesaurus_name(pool: PgPool) {
    seed(&pool).await;

    let all = ThesaurusService::list_all_versions(&pool, page()).await.unwrap();
    let names: Vec<_> = all.results.iter().map(|v| v.thesaurus.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(all.results[0].thesaurus.slug, "okved");

    let current = ThesaurusService::list_current_versions_as_of(&pool, date(2100, 1, 1), page())
        .await
        .unwrap();
    let slugs: Vec<_> = current.results.iter().map(|v| v.thesaurus.slug.as_str()).collect();
    assert_eq!(slugs, vec!["okved", "okato", "okopf", "oktmo", "ias-smo"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_all_versions_embeds_thesaurus(pool: PgPool) {
    seed(&pool).await;

    let result = ThesaurusService::list_all_versions(&pool, page()).await.unwrap();
    for entry in &result.results {
        assert_eq!(entry.version.thesaurus_id, entry.thesaurus.id);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_all_versions_paginates(pool: PgPool) {
    seed(&pool).await;

    let first = ThesaurusService::list_all_versions(&pool, PageRequest { limit: 4, offset: 0 })
        .await
        .unwrap();
    let second = ThesaurusService::list_all_versions(&pool, PageRequest { limit: 4, offset: 4 })
        .await
        .unwrap();

    assert_eq!(first.count, 6);
    assert_eq!(second.count, 6);
    assert_eq!(first.results.len(), 4);
    assert_eq!(second.results.len(), 2);

    let first_ids: Vec<_> = first.results.iter().map(|v| v.version.id).collect();
    assert!(second
        .results
        .iter()
        .all(|v| !first_ids.contains(&v.version.id)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_current_versions_as_of(pool: PgPool) {
    seed(&pool).await;

    let cases = [
        (thesaurus_core::types::today(), 2),
        (date(2022, 8, 15), 2),
        (date(2022, 7, 15), 1),
        (date(2020, 7, 15), 0),
    ];

    for (as_of, expected) in cases {
        let result = ThesaurusService::list_current_versions_as_of(&pool, as_of, page())
            .await
            .unwrap();
        assert_eq!(result.count, expected, "count as of {as_of}");
        assert_eq!(result.results.len() as i64, expected, "results as of {as_of}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_current_versions_picks_latest_qualifying(pool: PgPool) {
    seed(&pool).await;

    let on_switch_day = ThesaurusService::list_current_versions_as_of(&pool, date(2022, 8, 10), page())
        .await
        .unwrap();
    let ias = on_switch_day
        .results
        .iter()
        .find(|v| v.thesaurus.slug == "ias-smo")
        .expect("ias-smo should have a current version");
    assert_eq!(ias.version.slug, "102");

    let day_before = ThesaurusService::list_current_versions_as_of(&pool, date(2022, 8, 9), page())
        .await
        .unwrap();
    let ias = day_before
        .results
        .iter()
        .find(|v| v.thesaurus.slug == "ias-smo")
        .expect("ias-smo should have a current version");
    assert_eq!(ias.version.slug, "101");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_current_versions_one_per_thesaurus(pool: PgPool) {
    seed(&pool).await;

    let result = ThesaurusService::list_current_versions_as_of(&pool, date(2100, 1, 1), page())
        .await
        .unwrap();

    // Every thesaurus except `oksm` has a version by 2100.
    assert_eq!(result.count, 5);
    let mut thesaurus_ids: Vec<_> = result.results.iter().map(|v| v.thesaurus.id).collect();
    thesaurus_ids.dedup();
    assert_eq!(thesaurus_ids.len(), 5);
}

// ---------------------------------------------------------------------------
// Current version items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_current_version_items(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();

    let items = ThesaurusService::get_current_version_items(&pool, &thesaurus, page())
        .await
        .unwrap();
    assert_eq!(items.count, 2);
    assert_eq!(items.results.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_current_version_items_as_of_past_date(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();

    let items =
        ThesaurusService::get_current_version_items_as_of(&pool, &thesaurus, date(2022, 7, 25), page())
            .await
            .unwrap();
    assert_eq!(items.count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_current_version_missing_is_not_found(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "oktmo").await.unwrap();

    let err = ThesaurusService::get_current_version_items(&pool, &thesaurus, page())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::NotFound {
            entity: "ThesaurusVersion",
            ..
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_current_version_item(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();

    let filter = ItemFilter::by_code_and_value("123", "Элемент 123");
    let items = ThesaurusService::validate_current_version_item(&pool, &thesaurus, &filter, page())
        .await
        .unwrap();
    assert_eq!(items.results.len(), 1);

    // Equal to the first item (by value) of the most recent version.
    let current = ThesaurusService::current_version_as_of(&pool, &thesaurus, thesaurus_core::types::today())
        .await
        .unwrap();
    let all = ThesaurusService::get_version_items(&pool, &current, page())
        .await
        .unwrap();
    assert_eq!(items.results[0], all.results[0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_current_version_item_wrong_code(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();

    let filter = ItemFilter::by_code("1231234sdfs");
    let err = ThesaurusService::validate_current_version_item(&pool, &thesaurus, &filter, page())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::NotFound {
            entity: "ThesaurusItem",
            ..
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_current_version_item_requires_filter(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();

    let err = ThesaurusService::validate_current_version_item(
        &pool,
        &thesaurus,
        &ItemFilter::default(),
        page(),
    )
    .await
    .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::MissingParameter(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_current_version_item(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let items = ThesaurusService::get_current_version_items(&pool, &thesaurus, page())
        .await
        .unwrap();

    let item = ThesaurusService::get_current_version_item(&pool, &thesaurus, items.results[1].id)
        .await
        .unwrap();
    assert_eq!(item, items.results[1]);
}

// ---------------------------------------------------------------------------
// Explicit version items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_version_items(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let version = ThesaurusService::find_version(&pool, &thesaurus, "101").await.unwrap();

    let items = ThesaurusService::get_version_items(&pool, &version, page())
        .await
        .unwrap();
    assert_eq!(items.count, 3);
    assert!(items
        .results
        .iter()
        .all(|i| i.thesaurus_version_id == version.id));

    // Ordered by value.
    let values: Vec<_> = items.results.iter().map(|i| i.value.as_str()).collect();
    assert_eq!(values, vec!["Элемент 121", "Элемент 124", "Элемент 125"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_version_items_empty_version_is_ok(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "okopf").await.unwrap();
    let version = ThesaurusService::find_version(&pool, &thesaurus, "2099-1").await.unwrap();

    let items = ThesaurusService::get_version_items(&pool, &version, page())
        .await
        .unwrap();
    assert_eq!(items.count, 0);
    assert!(items.results.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_version_item(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let version = ThesaurusService::find_version(&pool, &thesaurus, "101").await.unwrap();

    let filter = ItemFilter::by_code_and_value("125", "Элемент 125");
    let matched = ThesaurusService::validate_version_item(&pool, &version, &filter, page())
        .await
        .unwrap();
    let all = ThesaurusService::get_version_items(&pool, &version, page())
        .await
        .unwrap();

    assert_eq!(matched.results.len(), 1);
    assert_eq!(matched.results[0], all.results[2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_version_item_requires_both_to_match(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let version = ThesaurusService::find_version(&pool, &thesaurus, "101").await.unwrap();

    // The value exists, the code does not.
    let filter = ItemFilter::by_code_and_value("999", "Элемент 125");
    let err = ThesaurusService::validate_version_item(&pool, &version, &filter, page())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::NotFound { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_version_item_by_value_only(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let version = ThesaurusService::find_version(&pool, &thesaurus, "101").await.unwrap();

    let matched =
        ThesaurusService::validate_version_item(&pool, &version, &ItemFilter::by_value("Элемент 124"), page())
            .await
            .unwrap();
    assert_eq!(matched.results.len(), 1);
    assert_eq!(matched.results[0].code, "124");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_version_item_requires_filter(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let version = ThesaurusService::find_version(&pool, &thesaurus, "101").await.unwrap();

    let err = ThesaurusService::validate_version_item(&pool, &version, &ItemFilter::default(), page())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::MissingParameter(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_version_item_from_other_version_is_not_found(pool: PgPool) {
    seed(&pool).await;
    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let old = ThesaurusService::find_version(&pool, &thesaurus, "101").await.unwrap();
    let new = ThesaurusService::find_version(&pool, &thesaurus, "102").await.unwrap();

    let new_items = ThesaurusService::get_version_items(&pool, &new, page())
        .await
        .unwrap();
    let err = ThesaurusService::get_version_item(&pool, &old, new_items.results[0].id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Lookups and idempotence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_slugs_are_not_found(pool: PgPool) {
    seed(&pool).await;

    let err = ThesaurusService::find_thesaurus(&pool, "wrong-thesaurus")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::NotFound {
            entity: "Thesaurus",
            ..
        })
    );

    let thesaurus = ThesaurusService::find_thesaurus(&pool, "ias-smo").await.unwrap();
    let err = ThesaurusService::find_version(&pool, &thesaurus, "wrong-version")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::NotFound {
            entity: "ThesaurusVersion",
            ..
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_version_slug_is_scoped_to_thesaurus(pool: PgPool) {
    seed(&pool).await;

    // `2099-1` exists in several thesauruses; each lookup returns its own.
    let oktmo = ThesaurusService::find_thesaurus(&pool, "oktmo").await.unwrap();
    let okved = ThesaurusService::find_thesaurus(&pool, "okved").await.unwrap();
    let a = ThesaurusService::find_version(&pool, &oktmo, "2099-1").await.unwrap();
    let b = ThesaurusService::find_version(&pool, &okved, "2099-1").await.unwrap();

    assert_eq!(a.thesaurus_id, oktmo.id);
    assert_eq!(b.thesaurus_id, okved.id);
    assert_ne!(a.id, b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reads_are_idempotent(pool: PgPool) {
    seed(&pool).await;

    let first = ThesaurusService::list_current_versions_as_of(&pool, date(2022, 8, 15), page())
        .await
        .unwrap();
    let second = ThesaurusService::list_current_versions_as_of(&pool, date(2022, 8, 15), page())
        .await
        .unwrap();
    assert_eq!(first, second);
}
