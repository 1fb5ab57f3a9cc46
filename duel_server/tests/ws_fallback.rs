use duel_server::domain::DuelTuning;
use duel_server::interface_adapters::routes::app;
use duel_server::interface_adapters::state::{AppState, ServiceInfo};
use duel_server::use_cases::SessionSettings;
use futures_util::StreamExt;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Serves an app whose sessions can never be built and returns its ws URL.
async fn serve_with_broken_tuning() -> String {
    let mut tuning = DuelTuning::default();
    tuning.arena.width = 10.0;

    let state = Arc::new(AppState {
        session_settings: SessionSettings {
            command_channel_capacity: 8,
            tick_interval: Duration::from_millis(16),
            tuning,
            fixed_seed: Some(1),
        },
        service: ServiceInfo {
            name: "duel-server",
            version: "0.0.0-test".to_string(),
        },
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("server failed");
    });

    format!("ws://{addr}/ws")
}

#[tokio::test]
async fn when_session_cannot_be_built_then_client_gets_fallback_and_close() {
    let url = serve_with_broken_tuning().await;
    let (mut socket, _) = connect_async(url).await.expect("websocket should connect");

    let first = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("notice should arrive in time")
        .expect("socket should yield a message")
        .expect("message should be readable");
    let Message::Text(text) = first else {
        panic!("expected a text notice, got {first:?}");
    };
    let notice: Value = serde_json::from_str(&text).expect("notice should be json");
    assert_eq!(notice["type"], "Fallback");
    assert_eq!(notice["data"]["title"], "The duel could not start");
    assert!(
        notice["data"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("playfield"))
    );

    let closing = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("close should arrive in time");
    assert!(matches!(closing, None | Some(Ok(Message::Close(_))) | Some(Err(_))));
}
