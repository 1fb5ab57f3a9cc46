use crate::interface_adapters::http::{health, index, meta, not_found, security_headers};
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use axum::{Router, middleware, routing::get};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/meta", get(meta))
        .route("/ws", get(ws_handler))
        .fallback(not_found)
        .layer(middleware::map_response(security_headers))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DuelTuning;
    use crate::interface_adapters::state::ServiceInfo;
    use crate::use_cases::SessionSettings;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn build_test_app() -> Router {
        app(Arc::new(AppState {
            session_settings: SessionSettings {
                command_channel_capacity: 8,
                tick_interval: Duration::from_millis(16),
                tuning: DuelTuning::default(),
                fixed_seed: Some(1),
            },
            service: ServiceInfo {
                name: "duel-server",
                version: "9.9.9-test".to_string(),
            },
        }))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("expected request to build")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        serde_json::from_slice(&body).expect("expected json body")
    }

    #[tokio::test]
    async fn when_index_is_requested_then_returns_uncached_html_page() {
        let response = build_test_app().oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<canvas"));
    }

    #[tokio::test]
    async fn when_health_is_requested_then_returns_ok_true() {
        let response = build_test_app()
            .oneshot(get_request("/api/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["ok"], true);
    }

    #[tokio::test]
    async fn when_meta_is_requested_then_returns_service_and_version() {
        let response = build_test_app()
            .oneshot(get_request("/api/meta"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["ok"], true);
        assert_eq!(payload["service"], "duel-server");
        assert_eq!(payload["version"], "9.9.9-test");
    }

    #[tokio::test]
    async fn when_api_route_does_not_exist_then_returns_json_404() {
        let response = build_test_app()
            .oneshot(get_request("/api/nope"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        let payload = json_body(response).await;
        assert_eq!(payload["ok"], false);
        assert_eq!(payload["error"], "not_found");
    }

    #[tokio::test]
    async fn when_page_does_not_exist_then_returns_html_404() {
        let response = build_test_app()
            .oneshot(get_request("/somewhere"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("href=\"/\""));
    }

    #[tokio::test]
    async fn when_health_is_posted_then_returns_405() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/health")
            .body(Body::empty())
            .expect("expected request to build");

        let response = build_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn when_ws_is_requested_without_upgrade_then_is_rejected() {
        let response = build_test_app().oneshot(get_request("/ws")).await.unwrap();

        assert!(response.status().is_client_error());
    }
}
