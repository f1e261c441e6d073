pub mod health;
pub mod thesaurus;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /thesauruses                                              version list (?actual_to=)
/// /thesauruses/{thesaurus}/items                            current version items (?code=&value=)
/// /thesauruses/{thesaurus}/items/{id}                       current version item
/// /thesauruses/{thesaurus}/versions/{version}/items         version items (?code=&value=)
/// /thesauruses/{thesaurus}/versions/{version}/items/{id}    version item
/// ```
///
/// Every route answers `GET` only; other methods get a 405 JSON error.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/thesauruses", thesaurus::router())
}
