//! The chat-completion abstraction the pipeline talks through.
//!
//! Provider-specific wiring (HTTP clients, auth, model routing) lives with
//! the embedder; the pipeline only needs something that can turn a message
//! list into a [`ChatResponse`]. [`complete_with_retry`] adds the per-request
//! timeout and exponential-backoff retry budget on top of any provider.
//!
//! [`ScriptedProvider`] replays canned responses for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One tool invocation requested by the model. `arguments` is the raw JSON
/// string as received; the registry parses it leniently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Populated on assistant messages that requested tools
    pub tool_calls: Vec<ToolCall>,
    /// Populated on tool messages, echoing the call being answered
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content)
    }

    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }

    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChoice {
    /// Tools offered, the model decides
    Auto,
    /// Tools withheld; a plain text reply is required
    None,
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Tool descriptors in function-calling shape; empty when withheld
    pub tools: Vec<serde_json::Value>,
    pub tool_choice: ToolChoice,
}

/// Token accounting for a single completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn accumulate(&mut self, other: TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
    pub cost_usd: f64,
}

impl ChatResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("chat call timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider error: {0}")]
    Provider(String),
}

/// An opaque chat-completion capability. Implementations must be safe to
/// share across matches running in parallel.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TransportError>;

    /// Whether the underlying model accepts tool descriptors.
    fn supports_tools(&self) -> bool {
        true
    }
}

/// Per-call resilience knobs; the retry budget is independent of the
/// pipeline's clarification retry.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff_base: Duration::from_millis(250),
        }
    }
}

/// Run one completion under the policy's timeout, retrying transient
/// failures with exponential backoff. The last error is returned when the
/// budget is exhausted.
pub async fn complete_with_retry(
    provider: &dyn ChatProvider,
    request: ChatRequest,
    policy: RetryPolicy,
) -> Result<ChatResponse, TransportError> {
    let mut last_error = None;
    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let backoff = policy.backoff_base * 2u32.saturating_pow(attempt - 1);
            tokio::time::sleep(backoff).await;
        }
        let outcome = tokio::time::timeout(policy.timeout, provider.complete(request.clone())).await;
        match outcome {
            Ok(Ok(response)) => return Ok(response),
            Ok(Err(e)) => {
                tracing::debug!(attempt, error = %e, "chat call failed");
                last_error = Some(e);
            }
            Err(_) => {
                tracing::debug!(attempt, timeout = ?policy.timeout, "chat call timed out");
                last_error = Some(TransportError::Timeout(policy.timeout));
            }
        }
    }
    Err(last_error.unwrap_or_else(|| TransportError::Provider("no attempts made".into())))
}

/// A provider that replays a fixed script of responses, one per call.
/// Used by tests and offline runs; calling past the end is an error.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ChatResponse, TransportError>>>,
    tools: bool,
}

impl ScriptedProvider {
    pub fn new(turns: Vec<Result<ChatResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(turns.into()),
            tools: true,
        }
    }

    /// Script of plain-text replies.
    pub fn replies(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(ChatResponse::text(*t))).collect())
    }

    pub fn without_tools(mut self) -> Self {
        self.tools = false;
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, TransportError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Provider("script exhausted".into())))
    }

    fn supports_tools(&self) -> bool {
        self.tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn retry_returns_first_success() {
        let provider = ScriptedProvider::new(vec![
            Err(TransportError::Provider("flaky".into())),
            Ok(ChatResponse::text("CALL")),
        ]);
        let policy = RetryPolicy {
            timeout: Duration::from_secs(1),
            max_retries: 3,
            backoff_base: Duration::from_millis(1),
        };
        let request = ChatRequest {
            messages: vec![ChatMessage::user("act")],
            temperature: 0.7,
            tools: Vec::new(),
            tool_choice: ToolChoice::None,
        };
        let response = complete_with_retry(&provider, request, policy).await.unwrap();
        assert_eq!(response.content, "CALL");
    }

    #[tokio::test]
    async fn retry_budget_exhausts_with_last_error() {
        let provider = ScriptedProvider::new(vec![
            Err(TransportError::Provider("down".into())),
            Err(TransportError::Provider("still down".into())),
        ]);
        let policy = RetryPolicy {
            timeout: Duration::from_secs(1),
            max_retries: 1,
            backoff_base: Duration::from_millis(1),
        };
        let request = ChatRequest {
            messages: vec![ChatMessage::user("act")],
            temperature: 0.7,
            tools: Vec::new(),
            tool_choice: ToolChoice::None,
        };
        let err = complete_with_retry(&provider, request, policy).await.unwrap_err();
        assert!(matches!(err, TransportError::Provider(msg) if msg.contains("still down")));
    }
}
