use axum::{extract::State, http::StatusCode, Json};

use super::types::{ChatReply, ChatRequest, ErrorBody, StatusBody};
use super::RelayState;

/// Wraps the user's message in the fixed assistant prompt template.
fn build_prompt(user_input: &str) -> String {
    format!(
        "You are a helpful AI assistant.\n\nUser message:\n{user_input}\n\nRespond clearly and concisely."
    )
}

/// Liveness endpoint.
pub async fn handle_status() -> Json<StatusBody> {
    Json(StatusBody {
        status: "Agent running".to_string(),
    })
}

/// Handles relay requests: forwards the message to the text provider and
/// returns the reply.
///
/// # Returns
/// * `Ok(Json<ChatReply>)` - The provider's reply
/// * `Err((StatusCode, Json<ErrorBody>))` - 500 with the error message in
///   the body on any failure; no retry, single request/response lifecycle
pub async fn handle_chat(
    State(state): State<RelayState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorBody>)> {
    let prompt = build_prompt(&req.message);

    match state.llm.complete(&prompt).await {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: e.to_string(),
            }),
        )),
    }
}
