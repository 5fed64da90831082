use serde::{Deserialize, Serialize};

/// Request payload for the relay endpoint
#[derive(Deserialize)]
pub struct ChatRequest {
    /// The user's message; empty if absent from the body
    #[serde(default)]
    pub message: String,
}

/// Successful relay response
#[derive(Serialize)]
pub struct ChatReply {
    /// The provider's reply text
    pub reply: String,
}

/// Error response body returned with a 500 status
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Liveness response body
#[derive(Serialize)]
pub struct StatusBody {
    pub status: String,
}
