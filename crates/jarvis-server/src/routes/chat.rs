use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use jarvis::models::message::Message;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    history: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<Message>>,
}

// Upstream failures are reported as text in a 200 response, never as an error status
async fn handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    tracing::info!(history = request.history.len(), "chat turn");

    let turn = state
        .agent
        .handle_chat(&request.message, request.history)
        .await;

    Json(ChatResponse {
        history: turn.reply_history().map(<[Message]>::to_vec),
        response: turn.response,
    })
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handler))
        .with_state(state)
}
