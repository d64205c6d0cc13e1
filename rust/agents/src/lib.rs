//! # arena-agents: Decision Agents for the Evaluation Harness
//!
//! Turns a game-state snapshot into a legal action. The centerpiece is
//! [`pipeline::LlmAgent`], which conducts the bounded tool-use conversation
//! with a chat model and guarantees a legal action comes back; the
//! [`baseline::BaselineAgent`] is a deterministic rule-based stand-in used
//! for tests and offline runs.
//!
//! ## Core Components
//!
//! - [`SeatAgent`] - Trait every decision agent implements
//! - [`DecisionOutcome`] - Action plus telemetry for one decision
//! - [`parser`] - Ordered-pattern extraction of actions from free text
//! - [`pipeline`] - The chat conversation loop (tools, clarification, defaults)
//! - [`prompts`] - System/user prompt rendering
//! - [`tools`] - Tool registry: pot odds and Monte-Carlo equity
//! - [`transport`] - The chat-completion abstraction and retry wrapper
//! - [`create_agent`] - Factory mapping a model spec to an offline agent

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use arena_engine::actions::AgentAction;
use arena_engine::snapshot::TableSnapshot;

use crate::transport::TokenUsage;

pub mod baseline;
pub mod equity;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod tools;
pub mod transport;

/// One tool invocation made during a decision, with its result, for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallLog {
    pub name: String,
    pub arguments: Value,
    pub result: Value,
}

/// The outcome of a single decision: the chosen action (always legal for the
/// snapshot it was made against) plus everything worth logging about how it
/// was reached.
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub action: AgentAction,
    pub raw_response: String,
    pub tool_calls: Vec<ToolCallLog>,
    pub tokens: TokenUsage,
    pub latency_ms: u64,
    pub cost_usd: f64,
    pub parsed_ok: bool,
    pub clarified: bool,
    pub default_used: bool,
    pub error: Option<String>,
}

impl DecisionOutcome {
    /// A bare outcome for agents that decide without a conversation.
    pub fn local(action: AgentAction) -> Self {
        Self {
            action,
            raw_response: String::new(),
            tool_calls: Vec::new(),
            tokens: TokenUsage::default(),
            latency_ms: 0,
            cost_usd: 0.0,
            parsed_ok: true,
            clarified: false,
            default_used: false,
            error: None,
        }
    }
}

/// A decision agent occupying one seat. Implementations must be shareable
/// across concurrently running matches.
#[async_trait]
pub trait SeatAgent: Send + Sync {
    /// Produce an action for the snapshot. The returned action must be a
    /// member of the snapshot's legal-action set.
    async fn decide(&self, snapshot: &TableSnapshot) -> DecisionOutcome;

    /// The model identifier this agent plays as.
    fn model(&self) -> &str;
}

/// Create an offline agent for a model spec. Without a chat provider every
/// spec resolves to the rule-based baseline, named after the spec so match
/// records still read naturally; embedders with a live provider construct
/// [`pipeline::LlmAgent`] directly instead.
pub fn create_agent(spec: &str) -> Arc<dyn SeatAgent> {
    Arc::new(baseline::BaselineAgent::named(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_agent_names_follow_the_spec() {
        let agent = create_agent("openai/gpt-4o");
        assert_eq!(agent.model(), "openai/gpt-4o");
    }

    #[test]
    fn agents_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Arc<dyn SeatAgent>>();
    }
}
