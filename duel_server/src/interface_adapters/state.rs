use crate::use_cases::SessionSettings;

#[derive(Debug, Clone)]
pub struct AppState {
    // Settings every new WebSocket session is built from.
    pub session_settings: SessionSettings,
    // Identity reported by /api/meta.
    pub service: ServiceInfo,
}

#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: String,
}
