/*
 * Responsibility
 * - middleware の公開インターフェース
 * - cors::apply(...) (origin 判定), http::apply(...) (request id / trace / panic / timeout)
 */
pub mod cors;
pub mod http;
