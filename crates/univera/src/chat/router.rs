use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::client::{ChatError, ChatTransport};
use super::service::{ChatRequest, ChatService};
use crate::accounts::Identity;

pub fn chat_router<T>(service: Arc<ChatService<T>>) -> Router
where
    T: ChatTransport + 'static,
{
    Router::new()
        .route("/api/v1/chat", post(chat_handler::<T>))
        .with_state(service)
}

pub(crate) async fn chat_handler<T>(
    State(service): State<Arc<ChatService<T>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<ChatRequest>,
) -> Response
where
    T: ChatTransport + 'static,
{
    let identity = Identity::from_headers(&headers);
    match service.reply(&identity, &request.history).await {
        Ok(reply) => (StatusCode::OK, axum::Json(reply)).into_response(),
        Err(error) => {
            let status = match &error {
                ChatError::Unauthenticated => StatusCode::UNAUTHORIZED,
                ChatError::EmptyHistory => StatusCode::UNPROCESSABLE_ENTITY,
                ChatError::Upstream { .. } | ChatError::Transport(_) => StatusCode::BAD_GATEWAY,
                ChatError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let payload = json!({
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}
