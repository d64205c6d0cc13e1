//! The game-state snapshot handed to the decision pipeline.
//!
//! Field names here are contractual: the rendered prompt is part of the
//! external interface the models see, and downstream logs serialize these
//! records verbatim. Hole cards are only populated for the viewing seat.

use serde::{Deserialize, Serialize};

use crate::actions::{LegalAction, LegalAmounts};
use crate::history::{BettingEvent, Street};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player_index: usize,
    pub model_name: String,
    pub stack: u32,
    /// Two concatenated cards (`AsKh`) for the viewer, `None` for everyone else
    pub hole_cards: Option<String>,
    pub is_active: bool,
    pub current_bet: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegalActionView {
    pub action_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_raise: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_raise: Option<u32>,
}

impl LegalActionView {
    pub fn from_action(action: &LegalAction) -> Self {
        match *action {
            LegalAction::Fold => Self::bare("fold"),
            LegalAction::Check => Self::bare("check"),
            LegalAction::Call { amount } => Self {
                action_type: "call".into(),
                amount: Some(amount),
                min_raise: None,
                max_raise: None,
            },
            LegalAction::Raise { min_to, max_to } => Self {
                action_type: "raise".into(),
                amount: None,
                min_raise: Some(min_to),
                max_raise: Some(max_to),
            },
        }
    }

    fn bare(action_type: &str) -> Self {
        Self {
            action_type: action_type.into(),
            amount: None,
            min_raise: None,
            max_raise: None,
        }
    }
}

/// Snapshot of the table from one seat's perspective at a decision point.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub pot: u32,
    /// 0, 6, 8 or 10 chars; two per card
    pub community_cards: String,
    pub street: Street,
    pub current_player_index: usize,
    pub players: Vec<PlayerView>,
    pub betting_history: Vec<BettingEvent>,
    pub legal_actions: Vec<LegalActionView>,
    pub amount_to_call: u32,
    pub min_raise: Option<u32>,
    pub max_raise: Option<u32>,
}

impl TableSnapshot {
    /// The concrete amounts of the advertised legal actions.
    pub fn legal_amounts(&self) -> LegalAmounts {
        let mut out = LegalAmounts::default();
        for a in &self.legal_actions {
            match a.action_type.as_str() {
                "fold" => out.can_fold = true,
                "check" => out.can_check = true,
                "call" => out.call_amount = a.amount,
                "raise" => {
                    out.min_raise_to = a.min_raise;
                    out.max_raise_to = a.max_raise;
                }
                _ => {}
            }
        }
        out
    }

    /// The viewing seat's own view record.
    pub fn hero(&self) -> &PlayerView {
        &self.players[self.current_player_index]
    }

    /// Unfolded opponents of the viewing seat.
    pub fn active_opponents(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.is_active && p.player_index != self.current_player_index)
            .count()
    }
}
