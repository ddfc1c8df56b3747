//! Chat relay against a local stand-in for the generative model endpoint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use univera::accounts::{Identity, UserId};
use univera::chat::{ChatError, ChatMessage, ChatService, GeminiClient};
use univera::config::ChatConfig;

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    key: Option<String>,
    body: Value,
}

async fn spawn_upstream(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();
    let app = Router::new().route(
        "/models/:call",
        post(
            move |Path(call): Path<String>,
                  Query(query): Query<HashMap<String, String>>,
                  Json(body): Json<Value>| {
                let sink = sink.clone();
                let reply = reply.clone();
                async move {
                    sink.lock().expect("capture mutex poisoned").push(Captured {
                        path: call,
                        key: query.get("key").cloned(),
                        body,
                    });
                    (status, Json(reply))
                }
            },
        ),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream serves");
    });

    (format!("http://{addr}"), captured)
}

fn config(endpoint: String) -> ChatConfig {
    ChatConfig {
        api_key: Some("test-key".to_string()),
        model: "gemini-test".to_string(),
        endpoint,
        timeout_secs: 5,
    }
}

fn student() -> Identity {
    Identity::SignedIn(UserId("student-1".to_string()))
}

#[tokio::test]
async fn relays_conversation_and_extracts_reply() {
    let (endpoint, captured) = spawn_upstream(
        StatusCode::OK,
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": "Look at NIT Surathkal."}]}}]}),
    )
    .await;
    let service = ChatService::from_config(&config(endpoint)).expect("client builds");

    let reply = service
        .reply(
            &student(),
            &[ChatMessage::user("Good colleges near Mangalore?")],
        )
        .await
        .expect("reply succeeds");

    assert_eq!(reply.reply, "Look at NIT Surathkal.");
    let calls = captured.lock().expect("capture mutex poisoned");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "gemini-test:generateContent");
    assert_eq!(calls[0].key.as_deref(), Some("test-key"));
    assert_eq!(calls[0].body["contents"].as_array().map(Vec::len), Some(3));
    assert_eq!(calls[0].body["contents"][2]["parts"][0]["text"], "Good colleges near Mangalore?");
    assert_eq!(calls[0].body["generationConfig"]["temperature"], 0.9);
}

#[tokio::test]
async fn upstream_errors_carry_status() {
    let (endpoint, _) = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "quota exceeded"}}),
    )
    .await;
    let service = ChatService::from_config(&config(endpoint)).expect("client builds");

    let error = service
        .reply(&student(), &[ChatMessage::user("hello")])
        .await
        .expect_err("upstream rejects");

    match error {
        ChatError::Upstream { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota exceeded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_key_skips_the_network() {
    let config = ChatConfig::default();
    let service = ChatService::<GeminiClient>::from_config(&config).expect("unconfigured service");
    assert!(!service.is_configured());

    let reply = service
        .reply(&student(), &[ChatMessage::user("hello")])
        .await
        .expect("hint reply");
    assert_eq!(reply.reply, univera::chat::UNCONFIGURED_REPLY);
}
