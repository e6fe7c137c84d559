use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::llm;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "sonda",
        "aiBackend": if llm::backend_configured(&state.config) { "configured" } else { "fallback" },
    }))
}
