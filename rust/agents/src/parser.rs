//! Extraction of a legal action from free-form model output.
//!
//! Replies arrive as prose ("Based on the pot odds, I RAISE 50,000"), so the
//! parser walks an ordered pattern list over the tokenized reply and returns
//! on the first hit. The order is contractual: amount-bearing patterns win
//! over bare verbs, and all-in phrasing resolves before numeric parsing so
//! "go all in" never lands in a raise-with-amount branch. Tests lock the
//! ordering.
//!
//! The parser never fails open: every input yields either a legal action or
//! a flagged failure carrying the safe default (check if legal, else fold).

use arena_engine::actions::{AgentAction, LegalAmounts};

/// Result of parsing one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAction {
    /// Always a member of the legal-action set presented to the parser.
    pub action: AgentAction,
    pub parsed_ok: bool,
    /// The token(s) that matched, for logging
    pub matched: Option<String>,
    pub error: Option<String>,
}

/// Clamp a requested raise-to amount into the legal window.
/// Idempotent: `clamp(clamp(n)) == clamp(n)`.
pub fn clamp_raise(amount: u32, min_to: u32, max_to: u32) -> u32 {
    amount.clamp(min_to, max_to)
}

/// Parse a reply against the current legal actions; first matching pattern
/// wins. See the module docs for the pattern order.
pub fn parse(reply: &str, legal: &LegalAmounts) -> ParsedAction {
    if reply.trim().is_empty() {
        return failure(legal, "empty response");
    }
    let tokens = tokenize(reply);

    // 1. All-in phrasing, before any numeric pattern
    if let Some(matched) = find_all_in(&tokens) {
        if let (Some(_), Some(max_to)) = (legal.min_raise_to, legal.max_raise_to) {
            return ok(AgentAction::raise_to(max_to), matched);
        }
        if let Some(amount) = legal.call_amount {
            return ok(AgentAction::call(Some(amount)), matched);
        }
        // Neither raise nor call is open; keep scanning weaker patterns
    }

    // 2. Amount-bearing raise forms: "raise to N", "raise N", "bet N"
    if let Some((amount, matched)) = find_raise_with_amount(&tokens) {
        if let Some(parsed) = resolve_raise(amount, legal, &matched) {
            return parsed;
        }
    }

    // 3. Bare verbs in fixed priority: fold, then check, then call, each
    // downgrading to its complement when illegal
    if tokens.iter().any(|t| t == "fold") {
        return ok(AgentAction::fold(), "fold".to_string());
    }
    if tokens.iter().any(|t| t == "check") {
        if legal.can_check {
            return ok(AgentAction::check(), "check".to_string());
        }
        if let Some(amount) = legal.call_amount {
            return ok(AgentAction::call(Some(amount)), "check".to_string());
        }
    }
    if tokens.iter().any(|t| t == "call") {
        if let Some(amount) = legal.call_amount {
            return ok(AgentAction::call(Some(amount)), "call".to_string());
        }
        if legal.can_check {
            return ok(AgentAction::check(), "call".to_string());
        }
    }

    // 4. Bare "raise" without an amount resolves to the minimum
    if tokens.iter().any(|t| t == "raise") {
        if let Some(parsed) = resolve_raise(None, legal, "raise") {
            return parsed;
        }
    }

    failure(legal, &format!("unrecognized action in reply: {}", truncate(reply, 200)))
}

/// The safe default when nothing parses: check if legal, else fold.
pub fn default_action(legal: &LegalAmounts) -> ParsedAction {
    let action = if legal.can_check {
        AgentAction::check()
    } else {
        AgentAction::fold()
    };
    ParsedAction {
        action,
        parsed_ok: false,
        matched: None,
        error: Some(format!("using default action: {}", action.kind.as_str())),
    }
}

fn resolve_raise(
    amount: Option<u32>,
    legal: &LegalAmounts,
    matched: &str,
) -> Option<ParsedAction> {
    match (legal.min_raise_to, legal.max_raise_to) {
        (Some(min_to), Some(max_to)) => {
            let to = match amount {
                Some(n) => clamp_raise(n, min_to, max_to),
                None => min_to,
            };
            Some(ok(AgentAction::raise_to(to), matched.to_string()))
        }
        _ => legal
            .call_amount
            .map(|amount| ok(AgentAction::call(Some(amount)), matched.to_string())),
    }
}

fn ok(action: AgentAction, matched: String) -> ParsedAction {
    ParsedAction {
        action,
        parsed_ok: true,
        matched: Some(matched),
        error: None,
    }
}

fn failure(legal: &LegalAmounts, error: &str) -> ParsedAction {
    let mut parsed = default_action(legal);
    parsed.error = Some(error.to_string());
    parsed
}

/// Lowercased tokens of alphanumerics; commas survive inside tokens so
/// thousands separators stay attached to their number.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == ','))
        .map(|t| t.trim_matches(','))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn find_all_in(tokens: &[String]) -> Option<String> {
    for (i, t) in tokens.iter().enumerate() {
        if t == "allin" {
            return Some(t.clone());
        }
        if t == "all" && tokens.get(i + 1).map(String::as_str) == Some("in") {
            return Some("all in".to_string());
        }
    }
    None
}

fn find_raise_with_amount(tokens: &[String]) -> Option<(Option<u32>, String)> {
    for (i, t) in tokens.iter().enumerate() {
        if t != "raise" && t != "bet" {
            continue;
        }
        let mut next = i + 1;
        if t == "raise" && tokens.get(next).map(String::as_str) == Some("to") {
            next += 1;
        }
        if let Some(amount) = tokens.get(next).and_then(|n| parse_amount(n)) {
            return Some((Some(amount), format!("{t} {}", tokens[next])));
        }
    }
    None
}

fn parse_amount(token: &str) -> Option<u32> {
    let digits: String = token.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
