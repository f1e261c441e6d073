//! `Path` and `Query` extractors whose rejections are [`AppError`]s, so a
//! malformed id or `limit` gets the same `{error, code}` body as every other
//! failure.

use axum::extract::FromRequestParts;

use crate::error::AppError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
