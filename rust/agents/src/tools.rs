//! The analytical tools offered to models, keyed by name.
//!
//! Descriptor names and result fields are bit-exact contract: models are
//! prompted with them and downstream analytics read them back out of
//! decision logs. Dispatch is lenient about argument shape (missing fields
//! default) but strict about names: an unknown tool yields a structured
//! error payload that goes back to the model as the tool result.

use std::sync::OnceLock;

use serde_json::{json, Value};

use crate::equity::calculate_equity;
use crate::transport::ToolCall;

pub const POT_ODDS_TOOL: &str = "pot_odds_calculator";
pub const EQUITY_TOOL: &str = "equity_calculator";

/// Tool descriptors in function-calling shape, built once.
pub fn tool_descriptors() -> &'static [Value] {
    static DESCRIPTORS: OnceLock<Vec<Value>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| {
        vec![
            json!({
                "type": "function",
                "function": {
                    "name": POT_ODDS_TOOL,
                    "description": "Calculate pot odds to determine if a call is mathematically profitable. Use this when facing a bet to understand what equity you need to call profitably. Returns pot odds as a percentage and ratio.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "pot_size": {
                                "type": "integer",
                                "description": "Current pot size in chips (before your call)"
                            },
                            "bet_to_call": {
                                "type": "integer",
                                "description": "Amount you need to call in chips"
                            }
                        },
                        "required": ["pot_size", "bet_to_call"]
                    }
                }
            }),
            json!({
                "type": "function",
                "function": {
                    "name": EQUITY_TOOL,
                    "description": "Calculate your probability of winning the hand using Monte Carlo simulation. Use this to estimate your chances of winning against opponents' random hands. Compare the result with pot odds to make optimal decisions.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "hole_cards": {
                                "type": "string",
                                "description": "Your hole cards in format 'RankSuit RankSuit', e.g., 'AsKh' for Ace of spades and King of hearts. Use s=spades, h=hearts, d=diamonds, c=clubs."
                            },
                            "community_cards": {
                                "type": "string",
                                "description": "Community cards on board in same format, e.g., 'Jc7d2s' for Jack of clubs, 7 of diamonds, 2 of spades. Use empty string '' for preflop."
                            },
                            "num_opponents": {
                                "type": "integer",
                                "description": "Number of active opponents still in the hand (1-5)"
                            }
                        },
                        "required": ["hole_cards", "community_cards", "num_opponents"]
                    }
                }
            }),
        ]
    })
}

pub fn tool_names() -> Vec<&'static str> {
    vec![POT_ODDS_TOOL, EQUITY_TOOL]
}

/// Execute one tool call. The arguments string comes straight from the
/// model; unparseable JSON degrades to an empty object.
pub fn dispatch(call: &ToolCall) -> Value {
    let args: Value = serde_json::from_str(&call.arguments).unwrap_or_else(|_| json!({}));
    match call.name.as_str() {
        POT_ODDS_TOOL => {
            let pot_size = args["pot_size"].as_u64().unwrap_or(0);
            let bet_to_call = args["bet_to_call"].as_u64().unwrap_or(0);
            calculate_pot_odds(pot_size, bet_to_call)
        }
        EQUITY_TOOL => {
            let hole = args["hole_cards"].as_str().unwrap_or("");
            let board = args["community_cards"].as_str().unwrap_or("");
            let opponents = args["num_opponents"].as_u64().unwrap_or(1) as usize;
            serde_json::to_value(calculate_equity(hole, board, opponents, 1_000))
                .unwrap_or_else(|_| json!({"error": "equity serialization failed"}))
        }
        other => json!({ "error": format!("Unknown tool: {other}") }),
    }
}

/// Pot odds: the equity needed to break even on a call.
pub fn calculate_pot_odds(pot_size: u64, bet_to_call: u64) -> Value {
    if bet_to_call == 0 {
        return json!({
            "pot_odds_percentage": 0.0,
            "pot_odds_ratio": "0:1",
            "break_even_equity": 0.0,
            "recommendation": "No bet to call - check is free, any hand has positive expected value."
        });
    }

    let pct = (bet_to_call as f64 / (pot_size + bet_to_call) as f64) * 100.0;
    let ratio = pot_size as f64 / bet_to_call as f64;
    let pct = round1(pct);

    let recommendation = if pct < 20.0 {
        format!("Excellent pot odds! You only need {pct:.1}% equity to call profitably. Consider calling with a wide range of draws and made hands.")
    } else if pct < 33.0 {
        format!("Good pot odds. You need {pct:.1}% equity to call. Most draws and medium-strength hands can call.")
    } else if pct < 40.0 {
        format!("Marginal pot odds. You need {pct:.1}% equity to call. Only call with strong draws or made hands.")
    } else {
        format!("Poor pot odds. You need {pct:.1}% equity to call. Fold weak hands and marginal draws.")
    };

    json!({
        "pot_odds_percentage": pct,
        "pot_odds_ratio": format!("{ratio:.1}:1"),
        "break_even_equity": pct,
        "recommendation": recommendation,
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
