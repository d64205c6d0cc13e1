#![allow(dead_code)]

use async_trait::async_trait;

use arena_agents::{DecisionOutcome, SeatAgent};
use arena_engine::actions::AgentAction;
use arena_engine::snapshot::TableSnapshot;

/// Folds every decision, even when checking is free.
pub struct FoldAgent {
    name: String,
}

impl FoldAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl SeatAgent for FoldAgent {
    async fn decide(&self, _snapshot: &TableSnapshot) -> DecisionOutcome {
        DecisionOutcome::local(AgentAction::fold())
    }

    fn model(&self) -> &str {
        &self.name
    }
}

/// Checks when free, calls any bet otherwise.
pub struct CallAgent {
    name: String,
}

impl CallAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl SeatAgent for CallAgent {
    async fn decide(&self, snapshot: &TableSnapshot) -> DecisionOutcome {
        let legal = snapshot.legal_amounts();
        let action = match legal.call_amount {
            Some(amount) => AgentAction::call(Some(amount)),
            None => AgentAction::check(),
        };
        DecisionOutcome::local(action)
    }

    fn model(&self) -> &str {
        &self.name
    }
}
