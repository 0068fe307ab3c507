/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /kv/{key}, /db/ping
 * - 未対応の method は 405 envelope (method_not_allowed_fallback は登録済みの route にだけ効くので最後に呼ぶ)
 */
use axum::{Router, routing::get};

use crate::{api::method_not_allowed, state::AppState};

use crate::api::v1::handlers::{
    db::ping,
    health::health,
    kv::{delete_value, get_value, put_value},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/kv/{key}",
            get(get_value).put(put_value).delete(delete_value),
        )
        .route("/db/ping", get(ping))
        .method_not_allowed_fallback(method_not_allowed)
}
