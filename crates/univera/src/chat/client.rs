use std::future::Future;

use tracing::debug;

use super::prompt::{GenerateContentRequest, GenerateContentResponse};
use crate::config::ChatConfig;

/// Outbound seam to the hosted model so the service can be exercised offline.
pub trait ChatTransport: Send + Sync {
    fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, ChatError>> + Send;
}

/// `generateContent` client for the Generative Language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &ChatConfig, api_key: impl Into<String>) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ChatError::Client)?;
        Ok(Self {
            http,
            url: format!("{}/models/{}:generateContent", config.endpoint, config.model),
            api_key: api_key.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatTransport for GeminiClient {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ChatError> {
        let response = self
            .http
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(ChatError::Transport)?;

        let status = response.status();
        debug!(status = status.as_u16(), "chat upstream responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(ChatError::Transport)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("sign in to use the assistant")]
    Unauthenticated,
    #[error("the history must end with a user message")]
    EmptyHistory,
    #[error("failed to build chat client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("chat request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("chat upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
}
