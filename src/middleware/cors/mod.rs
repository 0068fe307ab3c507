//! CORS policy for browser clients.
//!
//! Note:
//! - CORS is enforced by browsers. Server-to-server calls are not restricted by it.
//! - This middleware is applied at the Router level (not inside handlers).
//!
//! Policy:
//! - Allowed origins come from bindings (`cors_origins` and friends) and are
//!   resolved again on every request. See [`allow_list`].
//! - The caller's origin is reflected after normalization. Never `*`.
//! - Empty allowlist → no CORS headers at all (deny).
//! - Credentials are never allowed.
//! - Allowed request headers: Authorization, Content-Type, Accept-Language.
//! - Exposed response headers: Content-Disposition (attachment downloads).

pub mod allow_list;
pub mod origin;

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, header, request::Parts};
use axum::middleware;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::bindings::Bindings;

/// Decide which origin (if any) to put in `access-control-allow-origin`.
///
/// Returns the normalized origin when it is in the resolved allowlist,
/// `None` otherwise (including when the allowlist is empty).
pub fn decide(request_origin: Option<&str>, bindings: &dyn Bindings) -> Option<String> {
    let allow_list = allow_list::resolve(bindings);
    let normalized = origin::normalize(request_origin);

    if normalized.is_empty() || allow_list.is_empty() {
        return None;
    }

    allow_list.contains(&normalized).then_some(normalized)
}

/// Apply the CORS policy to the given Router.
///
/// The request `Origin` header is normalized before the CORS layer sees it,
/// so the reflected value is exactly what [`decide`] returned.
pub fn apply(router: Router, bindings: Arc<dyn Bindings>) -> Router {
    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
        decide(origin.to_str().ok(), bindings.as_ref()).is_some()
    });

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT_LANGUAGE,
        ])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_credentials(false);

    router
        .layer(cors)
        .layer(middleware::map_request(normalize_origin_header))
}

async fn normalize_origin_header(mut req: Request) -> Request {
    let normalized = req
        .headers()
        .get(header::ORIGIN)
        .map(|raw| origin::normalize(raw.to_str().ok()));

    if let Some(normalized) = normalized {
        match HeaderValue::from_str(&normalized) {
            Ok(value) if !normalized.is_empty() => {
                req.headers_mut().insert(header::ORIGIN, value);
            }
            _ => {
                req.headers_mut().remove(header::ORIGIN);
            }
        }
    }

    req
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::StaticBindings;
    use axum::{body::Body, http::StatusCode, routing::get};
    use serde_json::json;
    use tower::ServiceExt;

    fn test_app(bindings: StaticBindings) -> Router {
        let router = Router::new().route("/test", get(|| async { "ok" }));
        apply(router, Arc::new(bindings))
    }

    fn get_with_origin(origin: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(Method::GET)
            .uri("/test")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn decide_denies_when_allow_list_is_empty() {
        let empty = StaticBindings::new();
        assert_eq!(decide(Some("https://y.com"), &empty), None);

        let blank = StaticBindings::new().with("cors_origins", " ");
        assert_eq!(decide(Some("https://y.com"), &blank), None);
        assert_eq!(decide(None, &blank), None);
    }

    #[test]
    fn decide_reflects_listed_origin() {
        let bindings = StaticBindings::new().with("cors_origins", "https://x.com,https://y.com/");
        assert_eq!(
            decide(Some("https://y.com"), &bindings).as_deref(),
            Some("https://y.com")
        );
        assert_eq!(
            decide(Some(" https://y.com/ "), &bindings).as_deref(),
            Some("https://y.com")
        );
        assert_eq!(decide(Some("https://z.com"), &bindings), None);
    }

    #[test]
    fn decide_denies_missing_origin() {
        let bindings = StaticBindings::new().with("cors_origins", "https://x.com");
        assert_eq!(decide(None, &bindings), None);
        assert_eq!(decide(Some("   "), &bindings), None);
    }

    #[test]
    fn decide_is_exact_match() {
        let bindings = StaticBindings::new().with("cors_origins", json!(["https://x.com"]));
        assert_eq!(decide(Some("https://X.com"), &bindings), None);
        assert_eq!(decide(Some("https://x.com:443"), &bindings), None);
        assert_eq!(decide(Some("http://x.com"), &bindings), None);
    }

    #[tokio::test]
    async fn allowed_origin_is_reflected_with_fixed_policy() {
        let app = test_app(
            StaticBindings::new().with("cors_origins", r#"["https://x.com","https://y.com"]"#),
        );

        let response = app.oneshot(get_with_origin("https://y.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "https://y.com"
        );
        assert_eq!(
            headers.get("access-control-expose-headers").unwrap(),
            "content-disposition"
        );
        assert!(headers.get("access-control-allow-credentials").is_none());
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_cors_headers() {
        let app = test_app(
            StaticBindings::new().with("cors_origins", r#"["https://x.com","https://y.com"]"#),
        );

        let response = app.oneshot(get_with_origin("https://z.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn reflected_origin_is_normalized() {
        let app = test_app(StaticBindings::new().with("cors_origin", "https://y.com/"));

        let response = app.oneshot(get_with_origin("https://y.com//")).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://y.com"
        );
    }

    #[tokio::test]
    async fn preflight_lists_fixed_headers() {
        let app = test_app(StaticBindings::new().with("cors_origins", "https://x.com"));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/test")
                    .header("origin", "https://x.com")
                    .header("access-control-request-method", "PUT")
                    .header("access-control-request-headers", "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "https://x.com"
        );
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap(),
            "authorization,content-type,accept-language"
        );
        assert!(headers.get("access-control-allow-credentials").is_none());
    }

    #[tokio::test]
    async fn empty_allow_list_denies_preflight() {
        let app = test_app(StaticBindings::new());

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/test")
                    .header("origin", "https://x.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
