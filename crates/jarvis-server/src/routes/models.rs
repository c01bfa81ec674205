use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

// Connectivity check against the completion endpoint; failures are reported in the body
async fn handler(State(state): State<AppState>) -> Json<Value> {
    match state.agent.provider().models().await {
        Ok(models) => Json(models),
        Err(e) => {
            tracing::warn!("listing models failed: {}", e);
            Json(json!({ "error": e.to_string() }))
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/models", get(handler))
        .with_state(state)
}
