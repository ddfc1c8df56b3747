//! Wire shapes of the `generateContent` call and the prompt scaffolding around
//! the user's conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const SYSTEM_INSTRUCTION: &str = "\
You are UniVera, a friendly and concise assistant for students in India. \
Answer questions about colleges, PGs and hostels, admissions, placements, fees, \
career guidance and motivation in a supportive, India-focused way. \
You have no live data: for cutoffs, current admissions or room availability give \
general guidance and suggest confirming on the official website. \
Frame approximate figures as typical rather than inventing specific numbers, rankings or dates. \
Keep answers to two to five sentences unless the user asks for more. \
Politely decline questions unrelated to education or careers. \
Always quote fees in INR (₹).";

pub(crate) const SEED_REPLY: &str = "Hello! I'm UniVera, your AI assistant. \
How can I help you find the perfect college or accommodation today?";

pub const EMPTY_CANDIDATE_REPLY: &str = "Sorry, I couldn't retrieve a reply.";
pub const FALLBACK_REPLY: &str =
    "I'm not sure how to respond to that. Could you try asking in a different way?";
pub const UNCONFIGURED_REPLY: &str =
    "The AI assistant is not configured yet. Set GEMINI_API_KEY to enable the chatbot.";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One bubble in the chat panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub message: String,
    pub sender: Sender,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<String>,
}

impl ChatMessage {
    pub fn user(message: impl Into<String>) -> Self {
        Self::new(Sender::User, message)
    }

    pub fn bot(message: impl Into<String>) -> Self {
        Self::new(Sender::Bot, message)
    }

    fn new(sender: Sender, message: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            message: message.into(),
            sender,
            timestamp: None,
            quick_replies: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Bot => Role::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// System instruction and seed reply first, then the conversation in order.
    pub fn from_history(history: &[ChatMessage]) -> Self {
        let mut contents = Vec::with_capacity(history.len() + 2);
        contents.push(Content::text(Role::User, SYSTEM_INSTRUCTION));
        contents.push(Content::text(Role::Model, SEED_REPLY));
        contents.extend(
            history
                .iter()
                .map(|message| Content::text(message.sender.into(), message.message.clone())),
        );

        Self {
            contents,
            generation_config: GenerationConfig::default(),
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: SAFETY_THRESHOLD.to_string(),
                })
                .collect(),
        }
    }
}

/// Response body, kept loose: only the reply text is consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Value>,
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl GenerateContentResponse {
    pub fn reply_text(&self) -> String {
        if let Some(first) = self.candidates.first() {
            if let Some(part) = first.pointer("/content/parts/0") {
                return part
                    .get("text")
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
                    .unwrap_or(EMPTY_CANDIDATE_REPLY)
                    .to_string();
            }
        }

        if let Some(text) = self.output_text.as_deref().filter(|text| !text.is_empty()) {
            return text.to_string();
        }

        match &self.result {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            _ => FALLBACK_REPLY.to_string(),
        }
    }
}
