use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and live session counts.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let (builders, workshops) = state.sessions.counts().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "gem-studio",
        "clipboard": format!("{:?}", state.config.clipboard_backend).to_lowercase(),
        "session_ttl_secs": state.config.session_ttl.as_secs(),
        "sessions": {
            "builders": builders,
            "workshops": workshops
        }
    }))
}
