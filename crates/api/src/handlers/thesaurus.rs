//! Handlers for the read-only thesaurus API.
//!
//! Item endpoints serve two operations from one URL: without `code` or
//! `value` they list every item of the version, with either of them they
//! validate, and an empty match is a 404.

use axum::extract::State;
use axum::http::Method;
use axum::Json;
use thesaurus_core::pagination::Page;
use thesaurus_core::params::parse_date_param;
use thesaurus_core::types::DbId;
use thesaurus_db::models::thesaurus_item::ThesaurusItem;
use thesaurus_db::models::thesaurus_version::ThesaurusVersionWithThesaurus;
use thesaurus_db::service::ThesaurusService;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::query::{ItemQueryParams, VersionListParams};
use crate::state::AppState;

/// GET /api/v1/thesauruses
///
/// Every version of every thesaurus. With `actual_to`, only the version
/// each thesaurus had in force on that date.
pub async fn list_versions(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<VersionListParams>,
) -> AppResult<Json<Page<ThesaurusVersionWithThesaurus>>> {
    let actual_to = parse_date_param("actual_to", params.actual_to.as_deref())?;
    let page = state.config.page_request(params.limit, params.offset);

    let versions = match actual_to {
        Some(date) => {
            ThesaurusService::list_current_versions_as_of(&state.pool, date, page).await?
        }
        None => ThesaurusService::list_all_versions(&state.pool, page).await?,
    };

    Ok(Json(versions))
}

/// GET /api/v1/thesauruses/{thesaurus}/items
///
/// Items of the version of `thesaurus` that is actual today.
pub async fn list_current_items(
    State(state): State<AppState>,
    AppPath(thesaurus_slug): AppPath<String>,
    AppQuery(params): AppQuery<ItemQueryParams>,
) -> AppResult<Json<Page<ThesaurusItem>>> {
    let thesaurus = ThesaurusService::find_thesaurus(&state.pool, &thesaurus_slug).await?;
    let filter = params.filter();
    let page = state.config.page_request(params.limit, params.offset);

    let items = if filter.is_empty() {
        ThesaurusService::get_current_version_items(&state.pool, &thesaurus, page).await?
    } else {
        tracing::debug!(thesaurus = %thesaurus.slug, filter = %filter.describe(), "Validating current item");
        ThesaurusService::validate_current_version_item(&state.pool, &thesaurus, &filter, page)
            .await?
    };

    Ok(Json(items))
}

/// GET /api/v1/thesauruses/{thesaurus}/items/{id}
pub async fn get_current_item(
    State(state): State<AppState>,
    AppPath((thesaurus_slug, item_id)): AppPath<(String, DbId)>,
) -> AppResult<Json<ThesaurusItem>> {
    let thesaurus = ThesaurusService::find_thesaurus(&state.pool, &thesaurus_slug).await?;
    let item = ThesaurusService::get_current_version_item(&state.pool, &thesaurus, item_id).await?;

    Ok(Json(item))
}

/// GET /api/v1/thesauruses/{thesaurus}/versions/{version}/items
///
/// Items of an explicitly named version, regardless of its start date.
pub async fn list_version_items(
    State(state): State<AppState>,
    AppPath((thesaurus_slug, version_slug)): AppPath<(String, String)>,
    AppQuery(params): AppQuery<ItemQueryParams>,
) -> AppResult<Json<Page<ThesaurusItem>>> {
    let thesaurus = ThesaurusService::find_thesaurus(&state.pool, &thesaurus_slug).await?;
    let version = ThesaurusService::find_version(&state.pool, &thesaurus, &version_slug).await?;
    let filter = params.filter();
    let page = state.config.page_request(params.limit, params.offset);

    let items = if filter.is_empty() {
        ThesaurusService::get_version_items(&state.pool, &version, page).await?
    } else {
        tracing::debug!(
            thesaurus = %thesaurus.slug,
            version = %version.slug,
            filter = %filter.describe(),
            "Validating version item"
        );
        ThesaurusService::validate_version_item(&state.pool, &version, &filter, page).await?
    };

    Ok(Json(items))
}

/// GET /api/v1/thesauruses/{thesaurus}/versions/{version}/items/{id}
pub async fn get_version_item(
    State(state): State<AppState>,
    AppPath((thesaurus_slug, version_slug, item_id)): AppPath<(String, String, DbId)>,
) -> AppResult<Json<ThesaurusItem>> {
    let thesaurus = ThesaurusService::find_thesaurus(&state.pool, &thesaurus_slug).await?;
    let version = ThesaurusService::find_version(&state.pool, &thesaurus, &version_slug).await?;
    let item = ThesaurusService::get_version_item(&state.pool, &version, item_id).await?;

    Ok(Json(item))
}

/// Fallback for every thesaurus route: the API is read-only.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}
