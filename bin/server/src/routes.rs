//! Router assembly.

use crate::functions;
use crate::state::AppState;
use axum::{
    Router,
    http::{HeaderName, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Request headers browsers may send cross-origin.
const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/functions/v1/discord-auth", post(functions::discord_auth))
        .route("/functions/v1/admin-check", post(functions::admin_check))
        .route("/functions/v1/admin-update", post(functions::admin_update))
        .route("/api/site-settings", get(functions::site_settings))
        .route("/api/skills", get(functions::skills))
        .route("/api/portfolio-projects", get(functions::portfolio_projects))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Any origin, any method, the fixed header set.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(ALLOWED_HEADERS)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use crate::functions::test_support::app;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_answers_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn preflight_is_permissive() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/functions/v1/admin-update")
            .header(header::ORIGIN, "https://folio.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                "authorization, content-type, apikey",
            )
            .body(Body::empty())
            .expect("request");

        let response = app().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        let allowed = headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        for name in ["authorization", "x-client-info", "apikey", "content-type"] {
            assert!(allowed.contains(name), "{allowed}");
        }

        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn responses_carry_the_allow_origin_header() {
        let response = app()
            .oneshot(
                Request::get("/api/skills")
                    .header(header::ORIGIN, "https://elsewhere.example")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
