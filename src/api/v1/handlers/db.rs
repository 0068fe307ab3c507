/*
 * Responsibility
 * - GET /db/ping: relational binding の確認
 * - 未バインドなら AppState::db() が BindingMissing(Database) を返す
 */
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{error::AppError, repos::health_repo, state::AppState};

pub async fn ping(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let db = state.db()?;
    let result = health_repo::ping(db).await?;
    Ok(Json(json!({"status": "ok", "result": result})))
}
