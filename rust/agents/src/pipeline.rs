//! The bounded conversation loop behind one decision.
//!
//! One decision is: render the snapshot into a prompt, let the model think
//! (optionally through up to [`MAX_TOOL_ROUNDS`] rounds of tool calls), parse
//! the final text into an action, clarify once if the text did not parse, and
//! fall back to the safe default if it still does not. Transport failures
//! resolve to a fold. Whatever happens, the caller gets a legal action; a
//! decision's wall clock is bounded by `(MAX_TOOL_ROUNDS + 2)` chat calls,
//! each under the transport timeout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use arena_engine::actions::{AgentAction, LegalAmounts};
use arena_engine::snapshot::TableSnapshot;

use crate::parser;
use crate::prompts::{build_action_prompt, build_clarification_prompt, SYSTEM_PROMPT};
use crate::tools::{dispatch, tool_descriptors};
use crate::transport::{
    complete_with_retry, ChatMessage, ChatProvider, ChatRequest, ChatResponse, RetryPolicy,
    TokenUsage, ToolChoice, TransportError,
};
use crate::{DecisionOutcome, SeatAgent, ToolCallLog};

/// Hard cap on tool-call rounds within one decision. At the cap the next
/// call withholds tools so the model must answer in text.
pub const MAX_TOOL_ROUNDS: usize = 3;

/// Knobs for one agent's conversations.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub temperature: f32,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Offer tool descriptors when the provider supports them
    pub use_tools: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            use_tools: true,
        }
    }
}

/// A seat agent backed by a chat model.
pub struct LlmAgent {
    model: String,
    provider: Arc<dyn ChatProvider>,
    system_prompt: String,
    config: AgentConfig,
}

impl LlmAgent {
    pub fn new(model: impl Into<String>, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            model: model.into(),
            provider,
            system_prompt: SYSTEM_PROMPT.to_string(),
            config: AgentConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: self.config.timeout,
            max_retries: self.config.max_retries,
            ..RetryPolicy::default()
        }
    }

    async fn call(
        &self,
        messages: &[ChatMessage],
        tool_choice: ToolChoice,
    ) -> Result<ChatResponse, TransportError> {
        let offer_tools =
            self.config.use_tools && self.provider.supports_tools() && tool_choice == ToolChoice::Auto;
        let request = ChatRequest {
            messages: messages.to_vec(),
            temperature: self.config.temperature,
            tools: if offer_tools {
                tool_descriptors().to_vec()
            } else {
                Vec::new()
            },
            tool_choice: if offer_tools {
                ToolChoice::Auto
            } else {
                ToolChoice::None
            },
        };
        complete_with_retry(self.provider.as_ref(), request, self.retry_policy()).await
    }

    fn transport_fold(
        &self,
        error: TransportError,
        tokens: TokenUsage,
        cost: f64,
        tool_calls: Vec<ToolCallLog>,
        started: Instant,
    ) -> DecisionOutcome {
        tracing::warn!(model = %self.model, error = %error, "transport failure, folding");
        DecisionOutcome {
            action: AgentAction::fold(),
            raw_response: String::new(),
            tool_calls,
            tokens,
            latency_ms: started.elapsed().as_millis() as u64,
            cost_usd: cost,
            parsed_ok: false,
            clarified: false,
            default_used: true,
            error: Some(error.to_string()),
        }
    }
}

#[async_trait]
impl SeatAgent for LlmAgent {
    async fn decide(&self, snapshot: &TableSnapshot) -> DecisionOutcome {
        let started = Instant::now();
        let legal: LegalAmounts = snapshot.legal_amounts();
        let mut tokens = TokenUsage::default();
        let mut cost = 0.0f64;
        let mut tool_log: Vec<ToolCallLog> = Vec::new();

        let mut messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(build_action_prompt(snapshot)),
        ];

        let mut response = match self.call(&messages, ToolChoice::Auto).await {
            Ok(r) => r,
            Err(e) => return self.transport_fold(e, tokens, cost, tool_log, started),
        };
        tokens.accumulate(response.usage);
        cost += response.cost_usd;

        let mut rounds = 0;
        while !response.tool_calls.is_empty() && rounds < MAX_TOOL_ROUNDS {
            rounds += 1;
            let mut tool_messages = Vec::with_capacity(response.tool_calls.len());
            for call in &response.tool_calls {
                let result = dispatch(call);
                tool_log.push(ToolCallLog {
                    name: call.name.clone(),
                    arguments: serde_json::from_str(&call.arguments)
                        .unwrap_or(serde_json::Value::Null),
                    result: result.clone(),
                });
                tool_messages.push(ChatMessage::tool(call.id.clone(), result.to_string()));
            }
            messages.push(ChatMessage::assistant_with_tools(
                response.content.clone(),
                response.tool_calls.clone(),
            ));
            messages.extend(tool_messages);

            // At the cap, force a text answer
            let choice = if rounds >= MAX_TOOL_ROUNDS {
                ToolChoice::None
            } else {
                ToolChoice::Auto
            };
            response = match self.call(&messages, choice).await {
                Ok(r) => r,
                Err(e) => return self.transport_fold(e, tokens, cost, tool_log, started),
            };
            tokens.accumulate(response.usage);
            cost += response.cost_usd;
        }

        let mut reply = response.content.clone();
        let mut parsed = parser::parse(&reply, &legal);
        let mut clarified = false;

        if !parsed.parsed_ok {
            clarified = true;
            messages.push(ChatMessage::assistant(reply.clone()));
            messages.push(ChatMessage::user(build_clarification_prompt()));
            match self.call(&messages, ToolChoice::None).await {
                Ok(r) => {
                    tokens.accumulate(r.usage);
                    cost += r.cost_usd;
                    reply = r.content;
                    parsed = parser::parse(&reply, &legal);
                }
                Err(e) => return self.transport_fold(e, tokens, cost, tool_log, started),
            }
        }

        let mut default_used = false;
        if !parsed.parsed_ok {
            parsed = parser::default_action(&legal);
            default_used = true;
            tracing::warn!(
                model = %self.model,
                action = parsed.action.kind.as_str(),
                "reply did not parse, using default action"
            );
        }

        tracing::debug!(
            model = %self.model,
            action = parsed.action.kind.as_str(),
            amount = parsed.action.amount,
            clarified,
            default_used,
            tool_rounds = rounds,
            "decision made"
        );

        DecisionOutcome {
            action: parsed.action,
            raw_response: reply,
            tool_calls: tool_log,
            tokens,
            latency_ms: started.elapsed().as_millis() as u64,
            cost_usd: cost,
            parsed_ok: parsed.parsed_ok,
            clarified,
            default_used,
            error: parsed.error,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
