//! Chat relay: wraps the conversation in the assistant prompt and forwards it to
//! the hosted generative model.

pub mod client;
pub mod prompt;
pub mod router;
pub mod service;

pub use client::{ChatError, ChatTransport, GeminiClient};
pub use prompt::{
    ChatMessage, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    Role, SafetySetting, Sender, EMPTY_CANDIDATE_REPLY, FALLBACK_REPLY, UNCONFIGURED_REPLY,
};
pub use router::chat_router;
pub use service::{ChatReply, ChatRequest, ChatService};
