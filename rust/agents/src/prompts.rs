//! System and user prompts rendered for the model.
//!
//! Prompt content is part of the external interface: models are told the
//! exact action vocabulary the parser understands, and the state block uses
//! the snapshot's contractual field values. Change wording here and the
//! replies (and therefore parse rates) change with it.

use std::fmt::Write as _;

use arena_engine::snapshot::TableSnapshot;

pub const SYSTEM_PROMPT: &str = r#"You are an expert poker player competing in a No-Limit Texas Hold'em tournament. Your goal is to maximize your chip stack through strategic play.

## Game Rules
- You receive 2 private hole cards
- 5 community cards are dealt: Flop (3), Turn (1), River (1)
- Make the best 5-card hand using any combination of your hole cards and community cards
- Hand rankings (highest to lowest): Royal Flush, Straight Flush, Four of a Kind, Full House, Flush, Straight, Three of a Kind, Two Pair, One Pair, High Card

## Betting Rounds
- Preflop: After receiving hole cards, before community cards
- Flop: After first 3 community cards
- Turn: After 4th community card
- River: After 5th community card

## Available Tools
You have access to two analytical tools:

1. **pot_odds_calculator**: Calculate pot odds when facing a bet
   - Input: pot_size (current pot), bet_to_call (amount to call)
   - Output: The equity percentage you need to profitably call
   - Use when: Facing a bet and need to decide if calling is profitable

2. **equity_calculator**: Estimate your winning probability
   - Input: hole_cards, community_cards, num_opponents
   - Output: Your equity (win probability) against random hands
   - Use when: Need to know how strong your hand is

## Decision Making Framework
1. Evaluate your hand strength
2. Consider position (later = more information)
3. Assess pot odds vs your equity
4. Factor in opponent tendencies from betting history
5. Choose the action that maximizes expected value

## Response Format
After your analysis, clearly state your action using EXACTLY one of:
- FOLD - Give up your hand
- CHECK - Pass action (only when no bet to call)
- CALL - Match the current bet
- RAISE <amount> - Increase the bet (specify the TOTAL amount, not the raise size)

Example responses:
- "Based on my analysis, I will FOLD"
- "The pot odds are favorable, I CALL"
- "I have a strong hand, I RAISE 50000"
- "No bet to call, I CHECK"

IMPORTANT: Your response MUST contain one of these action words. Be decisive."#;

/// Render the per-decision user prompt from a snapshot.
pub fn build_action_prompt(snapshot: &TableSnapshot) -> String {
    let hero = snapshot.hero();
    let hole_display = hero
        .hole_cards
        .as_deref()
        .map(format_cards_display)
        .unwrap_or_else(|| "Unknown".to_string());
    let community_display = if snapshot.community_cards.is_empty() {
        "None (Preflop)".to_string()
    } else {
        format_cards_display(&snapshot.community_cards)
    };

    let mut opponents = String::new();
    for p in &snapshot.players {
        if p.player_index == snapshot.current_player_index {
            continue;
        }
        let status = if p.is_active { "Active" } else { "Folded" };
        let _ = writeln!(
            opponents,
            "  Seat {} ({}): {} chips - {}",
            p.player_index, p.model_name, p.stack, status
        );
    }

    let mut actions = String::new();
    for a in &snapshot.legal_actions {
        match a.action_type.as_str() {
            "fold" => actions.push_str("- FOLD\n"),
            "check" => actions.push_str("- CHECK\n"),
            "call" => {
                let _ = writeln!(actions, "- CALL {}", a.amount.unwrap_or(0));
            }
            "raise" => {
                let _ = writeln!(
                    actions,
                    "- RAISE (min: {}, max: {})",
                    a.min_raise.unwrap_or(0),
                    a.max_raise.unwrap_or(0)
                );
            }
            _ => {}
        }
    }

    let mut history = String::new();
    let mut current_street = None;
    for event in &snapshot.betting_history {
        if current_street != Some(event.street) {
            current_street = Some(event.street);
            let _ = writeln!(history, "  [{}]", event.street.as_str().to_uppercase());
        }
        let line = match event.action.as_str() {
            "raise" => format!("  {}: RAISE to {}", event.model, event.amount),
            "call" => format!("  {}: CALL {}", event.model, event.amount),
            "check" => format!("  {}: CHECK", event.model),
            _ => format!("  {}: FOLD", event.model),
        };
        let _ = writeln!(history, "{line}");
    }
    if history.is_empty() {
        history.push_str("  No actions yet\n");
    }

    format!(
        r#"## Current Game State

**Street:** {street}
**Pot:** {pot} chips

**Your Hand:** {hole_display}
**Community Cards:** {community_display}

**Your Stack:** {stack} chips
**Amount to Call:** {to_call} chips

**Opponents:**
{opponents}
**Betting History This Hand:**
{history}
**Your Legal Actions:**
{actions}
---

Analyze the situation and decide your action. You may use the pot_odds_calculator and equity_calculator tools to help inform your decision.

What is your action?"#,
        street = snapshot.street.as_str().to_uppercase(),
        pot = snapshot.pot,
        stack = hero.stack,
        to_call = snapshot.amount_to_call,
    )
}

/// Fixed prompt sent once when the first reply did not parse.
pub fn build_clarification_prompt() -> String {
    r#"Your previous response was unclear. Please respond with EXACTLY one of these actions:

- FOLD - Give up your hand
- CHECK - Pass (if no bet to call)
- CALL - Match the current bet
- RAISE <amount> - Raise to a specific total amount (e.g., RAISE 50000)

What is your action?"#
        .to_string()
}

/// `AsKh` -> `A♠ K♥` for prompt display.
pub fn format_cards_display(cards: &str) -> String {
    let chars: Vec<char> = cards.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parts = Vec::with_capacity(chars.len() / 2);
    for pair in chars.chunks(2) {
        if pair.len() < 2 {
            break;
        }
        let suit = match pair[1].to_ascii_lowercase() {
            's' => '♠',
            'h' => '♥',
            'd' => '♦',
            'c' => '♣',
            other => other,
        };
        parts.push(format!("{}{}", pair[0].to_ascii_uppercase(), suit));
    }
    parts.join(" ")
}
