//! The completion relay endpoint.
//!
//! One handler implements the whole request path: validate the conversation,
//! classify the last user message, resolve the backend model, best-effort
//! prime it upstream, inject the safety-selected system prompt, forward the
//! completion call, and relay the upstream status and body verbatim.

use ares_core::{
    ChatRequest, CompletionRequest, Message, MessageRole, ModelMap, UpstreamClient,
    UpstreamResponse, classify,
};
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::ProxyConfig;
use crate::prompt::SystemPrompts;

/// Shared application state passed to the handler via axum's `State`
/// extractor. Immutable after startup; concurrent requests share it
/// read-only, so no locking is involved.
#[derive(Clone)]
pub struct AppState {
    /// Upstream client, absent when `ARES_UPSTREAM_URL` is unconfigured.
    pub upstream: Option<UpstreamClient>,
    pub models: ModelMap,
    pub prompts: SystemPrompts,
}

impl AppState {
    /// Build runtime state from configuration.
    ///
    /// Fails only if the HTTP client cannot be constructed; a missing
    /// upstream URL is carried as `None` and reported per request.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, String> {
        let upstream = match &config.upstream_url {
            Some(url) => Some(UpstreamClient::new(url)?),
            None => None,
        };
        Ok(Self {
            upstream,
            models: config.models.clone(),
            prompts: config.prompts.clone(),
        })
    }
}

/// Error body returned for requests the relay rejects itself. Upstream
/// error bodies are never rewritten into this shape.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// POST /v1/chat/completions: classify, route, and relay a completion.
///
/// Returns 400 when the conversation has no user message, 500 when the model
/// table or upstream URL is unconfigured or the upstream is unreachable, and
/// otherwise whatever status and body the upstream produced.
pub async fn chat_completions(
    State(app): State<AppState>,
    Json(req): Json<CompletionRequest>,
) -> Response {
    // The last user message decides the task type.
    let Some(last_user) = req
        .messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::User)
    else {
        return error_response(StatusCode::BAD_REQUEST, "No user message found");
    };

    let task = classify(&last_user.content);

    let Some(model) = app.models.model_for(task) else {
        error!("no model configured for task '{task}' and no general fallback");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Model mapping not configured",
        );
    };
    let model = model.to_string();

    let Some(upstream) = app.upstream.as_ref() else {
        error!("upstream URL not configured; cannot relay completion");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Upstream not configured");
    };

    info!("task: {task}, routing to model: {model}");

    // Prime the model before the real request. Best-effort: a failure here
    // costs latency on the completion call, nothing more.
    if let Err(e) = upstream.load_model(&model).await {
        warn!("model preload failed: {e}");
    }

    let outbound = ChatRequest {
        model,
        messages: with_system_prompt(app.prompts.for_request(req.disable_safety), &req.messages),
        temperature: req.temperature,
        max_tokens: req.max_tokens,
        stream: false,
    };

    match upstream.chat(&outbound).await {
        Ok(resp) => relay_response(resp),
        Err(e) => {
            error!("error relaying chat completion: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// Prepend the selected system prompt to the caller's messages.
///
/// Exactly one prompt is injected per request; system messages the caller
/// supplied are forwarded untouched behind it.
fn with_system_prompt(prompt: &str, messages: &[Message]) -> Vec<Message> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(Message::system(prompt));
    out.extend_from_slice(messages);
    out
}

/// Relay the upstream status and body without reshaping either.
fn relay_response(resp: UpstreamResponse) -> Response {
    let status =
        StatusCode::from_u16(resp.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        resp.body,
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_lands_first() {
        let caller = vec![Message::user("hi")];
        let out = with_system_prompt("persona", &caller);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Message::system("persona"));
        assert_eq!(out[1], caller[0]);
    }

    #[test]
    fn caller_system_messages_are_kept_behind_the_injected_one() {
        let caller = vec![
            Message::system("roleplay context"),
            Message::user("continue the scene"),
        ];
        let out = with_system_prompt("persona", &caller);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].content, "persona");
        assert_eq!(out[1].content, "roleplay context");
        assert_eq!(out[2].content, "continue the scene");
    }

    #[test]
    fn state_from_config_without_upstream() {
        let state = AppState::from_config(&ProxyConfig::default()).unwrap();
        assert!(state.upstream.is_none());
    }

    #[test]
    fn state_from_config_with_upstream() {
        let config = ProxyConfig {
            upstream_url: Some("http://127.0.0.1:9999/".into()),
            ..Default::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.upstream.unwrap().base_url(), "http://127.0.0.1:9999");
    }
}
