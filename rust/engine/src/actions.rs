use serde::{Deserialize, Serialize};

/// An action as applied to the hand state. Raise carries the TOTAL to-amount
/// for the street, never the raise delta.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum SeatAction {
    Fold,
    Check,
    Call,
    RaiseTo(u32),
}

impl SeatAction {
    pub fn verb(&self) -> &'static str {
        match self {
            SeatAction::Fold => "fold",
            SeatAction::Check => "check",
            SeatAction::Call => "call",
            SeatAction::RaiseTo(_) => "raise",
        }
    }
}

/// A legal action for the seat to act, with concrete amounts attached.
/// Check and Call are mutually exclusive for a given state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LegalAction {
    Fold,
    Check,
    Call { amount: u32 },
    /// `min_to` is `current_bet + last_full_raise` clamped down to the
    /// all-in ceiling; `max_to` is the seat's street commitment plus its
    /// remaining stack.
    Raise { min_to: u32, max_to: u32 },
}

/// The concrete amounts of a legal-action set, in the form the parser and
/// prompt builder consume.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LegalAmounts {
    pub can_fold: bool,
    pub can_check: bool,
    pub call_amount: Option<u32>,
    pub min_raise_to: Option<u32>,
    pub max_raise_to: Option<u32>,
}

impl LegalAmounts {
    pub fn from_actions(actions: &[LegalAction]) -> Self {
        let mut out = LegalAmounts::default();
        for a in actions {
            match *a {
                LegalAction::Fold => out.can_fold = true,
                LegalAction::Check => out.can_check = true,
                LegalAction::Call { amount } => out.call_amount = Some(amount),
                LegalAction::Raise { min_to, max_to } => {
                    out.min_raise_to = Some(min_to);
                    out.max_raise_to = Some(max_to);
                }
            }
        }
        out
    }

    pub fn can_call(&self) -> bool {
        self.call_amount.is_some()
    }

    pub fn can_raise(&self) -> bool {
        self.min_raise_to.is_some()
    }
}

/// The action wire type exchanged with the decision pipeline:
/// `{"type": "raise", "amount": 50000}`. For raise, `amount` is the total
/// to-amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
}

impl AgentAction {
    pub fn fold() -> Self {
        Self {
            kind: ActionKind::Fold,
            amount: None,
        }
    }

    pub fn check() -> Self {
        Self {
            kind: ActionKind::Check,
            amount: None,
        }
    }

    pub fn call(amount: Option<u32>) -> Self {
        Self {
            kind: ActionKind::Call,
            amount,
        }
    }

    pub fn raise_to(amount: u32) -> Self {
        Self {
            kind: ActionKind::Raise,
            amount: Some(amount),
        }
    }

    /// True when this action is a member of the given legal-action set.
    /// Raise amounts must sit inside the advertised range.
    pub fn is_legal(&self, legal: &LegalAmounts) -> bool {
        match self.kind {
            ActionKind::Fold => legal.can_fold,
            ActionKind::Check => legal.can_check,
            ActionKind::Call => legal.can_call(),
            ActionKind::Raise => match (self.amount, legal.min_raise_to, legal.max_raise_to) {
                (Some(a), Some(min), Some(max)) => a >= min && a <= max,
                (None, Some(_), Some(_)) => true,
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
        }
    }
}
