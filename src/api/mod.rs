/*
 * Responsibility
 * - API バージョンの公開 (v1)
 * - どの route にも一致しない場合の fallback (Business 404 envelope)
 * - path は一致したが method が無い場合の fallback (Business 405 envelope)
 */
pub mod v1;

use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode, Uri},
};

use crate::error::AppError;

pub async fn fallback(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("route {method} {}", uri.path()))
}

/// Nested routers see the stripped path, so report the one the client sent.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::biz_with_code(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("method {method} not allowed on {}", uri.path()),
    )
}
