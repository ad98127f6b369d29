//! Core library for the Ares relay: wire types, task classification, and the
//! upstream completion client.
//!
//! The relay sits between a chat client and an OpenAI-style completion API.
//! The client sends a conversation without any model information; the relay
//! classifies the last user message into a [`TaskType`](task::TaskType), picks
//! a backend model from a [`ModelMap`](router::ModelMap), asks the upstream to
//! load that model, and forwards the completion request. This crate carries
//! everything both sides of that exchange agree on.
//!
//! # Getting started
//!
//! ```ignore
//! use ares_core::{ChatRequest, Message, UpstreamClient, classify};
//!
//! let client = UpstreamClient::new("http://127.0.0.1:1234")?;
//!
//! let task = classify("write a function that reverses a string");
//! let body = ChatRequest {
//!     model: "deepseek-coder-v2-lite-instruct".to_string(),
//!     messages: vec![Message::user("write a function that reverses a string")],
//!     temperature: 0.7,
//!     max_tokens: 1024,
//!     stream: false,
//! };
//!
//! client.load_model(&body.model).await.ok();
//! let resp = client.chat(&body).await?;
//! println!("{}", resp.reply_text()?);
//! ```
//!
//! # Where to find things
//!
//! - **Task classification:** [`task::classify`], ordered keyword rules
//!   mapping message text to one of four task categories.
//! - **Model routing:** [`router::ModelMap`], the task-to-model table with
//!   general fallback.
//! - **Wire types:** [`Message`], [`CompletionRequest`] (what clients send to
//!   the relay) and [`ChatRequest`] (what the relay sends upstream).
//! - **Upstream calls:** [`UpstreamClient`] with
//!   [`load_model`](UpstreamClient::load_model) and
//!   [`chat`](UpstreamClient::chat).

pub mod router;
pub mod task;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

pub use router::ModelMap;
pub use task::{TaskType, classify};

// ── Constants ──────────────────────────────────────────────────────

/// Path of the chat-completion endpoint, on the relay and upstream alike.
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Path of the upstream model-loading endpoint.
pub const MODELS_LOAD_PATH: &str = "/v1/models/load";

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the conversation. Conversations are ordered oldest first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

// ── Request types ──────────────────────────────────────────────────

/// Completion request accepted by the relay.
///
/// Carries no model information; model selection is the relay's job. The
/// `disableSafety` flag keeps its camelCase wire name and defaults to off.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(default, rename = "disableSafety")]
    pub disable_safety: bool,
}

/// Chat-completion request forwarded to the upstream API, with the model the
/// relay resolved filled in. `stream` is always serialized so the upstream
/// never falls back to its own streaming default.
#[derive(Serialize, Clone, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

// ── Response types ─────────────────────────────────────────────────

/// Raw upstream completion response: the HTTP status and the body text,
/// exactly as received. The relay passes both through without reshaping.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Extract the assistant reply (`choices[0].message.content`).
    pub fn reply_text(&self) -> Result<String, String> {
        reply_text(&self.body)
    }
}

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Pull the assistant reply text out of an OpenAI-style completion body.
pub fn reply_text(body: &str) -> Result<String, String> {
    let parsed: RawChatResponse =
        serde_json::from_str(body).map_err(|e| format!("failed to parse response: {e}"))?;

    if let Some(err) = parsed.error {
        return Err(format!("upstream API error: {}", err.message));
    }

    parsed
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message.content)
        .ok_or_else(|| "empty completion response".to_string())
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the upstream completion service.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a new client bound to the upstream base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent("ares-relay/0.1")
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the upstream to load `model` ahead of a completion call.
    ///
    /// Transport failures and non-2xx statuses come back as `Err`; whether
    /// that is fatal is the caller's decision, not this client's.
    pub async fn load_model(&self, model: &str) -> Result<(), String> {
        let resp = self
            .client
            .post(format!("{}{MODELS_LOAD_PATH}", self.base_url))
            .json(&serde_json::json!({ "model": model }))
            .send()
            .await
            .map_err(|e| format!("model load request failed: {e}"))?;

        let status = resp.status();
        debug!("model load: {model} -> HTTP {status}");

        if status.is_success() {
            Ok(())
        } else {
            Err(format!("model load HTTP {status}"))
        }
    }

    /// Send a chat-completion request and return the raw status and body.
    ///
    /// A non-2xx upstream status is NOT an `Err`; the response is handed
    /// back as-is so the relay can pass it through. Only transport-level
    /// failures (connect, timeout, read) produce `Err`.
    pub async fn chat(&self, body: &ChatRequest) -> Result<UpstreamResponse, String> {
        debug!(
            "completion request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(format!("{}{COMPLETIONS_PATH}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;

        debug!(
            "completion response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        Ok(UpstreamResponse { status, body: text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors() {
        let sys = Message::system("hello");
        assert_eq!(sys.role, MessageRole::System);
        assert_eq!(sys.content, "hello");

        let user = Message::user("world");
        assert_eq!(user.role, MessageRole::User);

        let assist = Message::assistant("reply");
        assert_eq!(assist.role, MessageRole::Assistant);
        assert_eq!(assist.content, "reply");
    }

    #[test]
    fn message_roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn completion_request_safety_flag_defaults_off() {
        let json = r#"{"messages":[{"role":"user","content":"hi"}],"temperature":0.5,"max_tokens":100}"#;
        let req: CompletionRequest = serde_json::from_str(json).unwrap();
        assert!(!req.disable_safety);
    }

    #[test]
    fn completion_request_safety_flag_uses_wire_name() {
        let json = r#"{"messages":[],"temperature":0.5,"max_tokens":100,"disableSafety":true}"#;
        let req: CompletionRequest = serde_json::from_str(json).unwrap();
        assert!(req.disable_safety);

        let round_tripped = serde_json::to_value(&req).unwrap();
        assert_eq!(round_tripped["disableSafety"], true);
    }

    #[test]
    fn chat_request_always_serializes_stream_off() {
        let req = ChatRequest {
            model: "test-model".into(),
            messages: vec![Message::user("hi")],
            temperature: 0.5,
            max_tokens: 100,
            stream: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn reply_text_extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}]}"#;
        assert_eq!(reply_text(body).unwrap(), "hi there");
    }

    #[test]
    fn reply_text_surfaces_api_error() {
        let body = r#"{"error":{"message":"model not found"}}"#;
        let err = reply_text(body).unwrap_err();
        assert!(err.contains("model not found"));
    }

    #[test]
    fn reply_text_rejects_empty_choices() {
        assert!(reply_text(r#"{"choices":[]}"#).is_err());
        assert!(reply_text("not json").is_err());
    }

    #[test]
    fn upstream_response_success_range() {
        let ok = UpstreamResponse {
            status: 200,
            body: String::new(),
        };
        let err = UpstreamResponse {
            status: 503,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
