mod support;

use serde_json::Value;

#[tokio::test]
async fn when_page_is_requested_then_serves_the_duel_page() {
    let base_url = support::ensure_server();

    let res = reqwest::get(format!("{base_url}/"))
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    assert!(res.headers().contains_key("content-security-policy"));
    let body = res.text().await.expect("body should be text");
    assert!(body.contains("<canvas"));
}

#[tokio::test]
async fn when_health_is_requested_then_reports_ok() {
    let base_url = support::ensure_server();

    let res = reqwest::get(format!("{base_url}/api/health"))
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let payload: Value = res.json().await.expect("json body");
    assert_eq!(payload, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn when_meta_is_requested_then_names_the_service() {
    let base_url = support::ensure_server();

    let payload: Value = reqwest::get(format!("{base_url}/api/meta"))
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("json body");

    assert_eq!(payload["ok"], true);
    assert_eq!(payload["service"], "duel-server");
    assert!(payload["version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn when_unknown_api_path_is_requested_then_returns_json_404() {
    let base_url = support::ensure_server();

    let res = reqwest::get(format!("{base_url}/api/missing"))
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let payload: Value = res.json().await.expect("json body");
    assert_eq!(payload["ok"], false);
    assert_eq!(payload["error"], "not_found");
}
