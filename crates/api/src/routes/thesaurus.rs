//! Route definitions for the read-only thesaurus API.

use axum::routing::get;
use axum::Router;

use crate::handlers::thesaurus;
use crate::state::AppState;

/// Thesaurus routes mounted at `/thesauruses`.
///
/// ```text
/// GET /                                    -> list_versions
/// GET /{thesaurus}/items                   -> list_current_items
/// GET /{thesaurus}/items/{id}              -> get_current_item
/// GET /{thesaurus}/versions/{version}/items       -> list_version_items
/// GET /{thesaurus}/versions/{version}/items/{id}  -> get_version_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(thesaurus::list_versions).fallback(thesaurus::method_not_allowed),
        )
        .route(
            "/{thesaurus}/items",
            get(thesaurus::list_current_items).fallback(thesaurus::method_not_allowed),
        )
        .route(
            "/{thesaurus}/items/{id}",
            get(thesaurus::get_current_item).fallback(thesaurus::method_not_allowed),
        )
        .route(
            "/{thesaurus}/versions/{version}/items",
            get(thesaurus::list_version_items).fallback(thesaurus::method_not_allowed),
        )
        .route(
            "/{thesaurus}/versions/{version}/items/{id}",
            get(thesaurus::get_version_item).fallback(thesaurus::method_not_allowed),
        )
}
