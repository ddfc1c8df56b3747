use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::client::{ChatError, ChatTransport, GeminiClient};
use super::prompt::{ChatMessage, GenerateContentRequest, Sender, UNCONFIGURED_REPLY};
use crate::accounts::Identity;
use crate::config::ChatConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Relays the conversation to the hosted model. Without a transport every
/// request is answered with a fixed configuration hint.
pub struct ChatService<T> {
    transport: Option<Arc<T>>,
}

impl ChatService<GeminiClient> {
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        match config.api_key.as_deref() {
            Some(api_key) => {
                let client = GeminiClient::new(config, api_key)?;
                info!(model = %config.model, "chat relay configured");
                Ok(Self::new(Arc::new(client)))
            }
            None => {
                warn!("GEMINI_API_KEY not set; chat replies are disabled");
                Ok(Self::unconfigured())
            }
        }
    }
}

impl<T> ChatService<T>
where
    T: ChatTransport + 'static,
{
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    pub fn unconfigured() -> Self {
        Self { transport: None }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn reply(
        &self,
        identity: &Identity,
        history: &[ChatMessage],
    ) -> Result<ChatReply, ChatError> {
        if identity.user_id().is_none() {
            return Err(ChatError::Unauthenticated);
        }
        match history.last() {
            Some(last) if last.sender == Sender::User && !last.message.trim().is_empty() => {}
            _ => return Err(ChatError::EmptyHistory),
        }

        let Some(transport) = &self.transport else {
            return Ok(ChatReply {
                reply: UNCONFIGURED_REPLY.to_string(),
            });
        };

        let request = GenerateContentRequest::from_history(history);
        let response = transport.generate(&request).await.map_err(|error| {
            warn!(%error, "chat upstream call failed");
            error
        })?;

        Ok(ChatReply {
            reply: response.reply_text(),
        })
    }
}
