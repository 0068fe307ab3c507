/*
 * Responsibility
 * - /kv/{key} の GET / PUT / DELETE
 * - 未バインドなら AppState::kv() が BindingMissing(Kv) を返す
 * - 値が無いのは Business error (404)
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::kv::{PutValueRequest, ValueResponse},
        extractors::{AppJson, AppPath},
    },
    error::AppError,
    state::AppState,
};

pub async fn get_value(
    State(state): State<AppState>,
    AppPath(key): AppPath<String>,
) -> Result<Json<ValueResponse>, AppError> {
    let value = state
        .kv()?
        .get(&key)
        .await?
        .ok_or_else(|| AppError::not_found(format!("key '{key}'")))?;

    Ok(Json(ValueResponse { key, value }))
}

pub async fn put_value(
    State(state): State<AppState>,
    AppPath(key): AppPath<String>,
    AppJson(req): AppJson<PutValueRequest>,
) -> Result<Json<ValueResponse>, AppError> {
    req.validate().map_err(AppError::biz)?;

    state.kv()?.put(&key, &req.value).await?;

    Ok(Json(ValueResponse {
        key,
        value: req.value,
    }))
}

pub async fn delete_value(
    State(state): State<AppState>,
    AppPath(key): AppPath<String>,
) -> Result<StatusCode, AppError> {
    match state.kv()?.delete(&key).await? {
        0 => Err(AppError::not_found(format!("key '{key}'"))),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}
