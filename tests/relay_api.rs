//! Relay endpoint tests, driving the router directly without a socket.

#![cfg(feature = "api")]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use autogram::api::RelayServer;
use autogram::error::BotError;
use autogram::providers::TextProvider;

/// Text provider that echoes the prompt it was given.
struct EchoLlm;

#[async_trait]
impl TextProvider for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, BotError> {
        Ok(format!("echo: {prompt}"))
    }
}

struct FailingLlm;

#[async_trait]
impl TextProvider for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, BotError> {
        Err(BotError::AuthError("Missing OpenAI API key".to_string()))
    }
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn status_endpoint_reports_agent_running() {
    let app = RelayServer::new(Arc::new(EchoLlm)).router();

    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "Agent running");
}

#[tokio::test]
async fn chat_wraps_the_message_in_the_prompt_template() {
    let app = RelayServer::new(Arc::new(EchoLlm)).router();

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"message":"hello there"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let reply = json["reply"].as_str().unwrap();
    assert!(reply.starts_with("echo: You are a helpful AI assistant."));
    assert!(reply.contains("User message:\nhello there"));
}

#[tokio::test]
async fn missing_message_field_defaults_to_empty() {
    let app = RelayServer::new(Arc::new(EchoLlm)).router();

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert!(json["reply"].as_str().unwrap().contains("User message:"));
}

#[tokio::test]
async fn provider_failures_surface_as_500_with_error_body() {
    let app = RelayServer::new(Arc::new(FailingLlm)).router();

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"message":"hello"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("Auth Error"));
}
