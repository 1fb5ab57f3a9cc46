// Framework bootstrap for the duel server runtime.

use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, ServiceInfo};
use crate::use_cases::SessionSettings;

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    // Refuse to start with a tuning no duel can be built from.
    build_state()?;

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Result<Arc<AppState>> {
    let tuning = config::duel_tuning();
    tuning.validate().map_err(|e| {
        tracing::error!(error = %e, "invalid duel tuning");
        std::io::Error::other(format!("invalid duel tuning: {e}"))
    })?;

    let fixed_seed = config::fixed_seed();
    tracing::debug!(
        width = tuning.arena.width,
        height = tuning.arena.height,
        fixed_seed = ?fixed_seed,
        "duel tuning configured"
    );

    Ok(Arc::new(AppState {
        session_settings: SessionSettings {
            command_channel_capacity: config::COMMAND_CHANNEL_CAPACITY,
            tick_interval: config::TICK_INTERVAL,
            tuning,
            fixed_seed,
        },
        service: ServiceInfo {
            name: config::SERVICE_NAME,
            version: config::service_version(),
        },
    }))
}
