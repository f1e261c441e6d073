//! Query parameter types for the thesaurus handlers.
//!
//! `limit` and `offset` are repeated in each struct instead of flattened:
//! `serde_urlencoded` cannot parse numbers through `#[serde(flatten)]`.
//! Values are clamped against the configured bounds by
//! [`ServerConfig::page_request`](crate::config::ServerConfig::page_request).

use serde::Deserialize;
use thesaurus_core::filter::ItemFilter;

/// Query for the version list (`?actual_to=&limit=&offset=`).
///
/// `actual_to` stays a raw string; it is interpreted by
/// [`parse_date_param`](thesaurus_core::params::parse_date_param).
#[derive(Debug, Default, Deserialize)]
pub struct VersionListParams {
    pub actual_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query for item lists (`?code=&value=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ItemQueryParams {
    pub code: Option<String>,
    pub value: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ItemQueryParams {
    /// The code/value part of the query. Empty values count as absent.
    pub fn filter(&self) -> ItemFilter {
        ItemFilter::new(self.code.clone(), self.value.clone())
    }
}
