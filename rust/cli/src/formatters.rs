//! Chip, card and table formatting for terminal output.

/// Thousands-separated chip counts: `1500000` -> `1,500,000`.
pub fn format_chips(amount: impl Into<i64>) -> String {
    let amount = amount.into();
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

/// Signed chip delta: `+5,000` / `-5,000` / `+0`.
pub fn format_profit(amount: i64) -> String {
    if amount < 0 {
        format_chips(amount)
    } else {
        format!("+{}", format_chips(amount))
    }
}

/// Render a concatenated card string (`AsKh`) with suit symbols.
pub fn format_board(cards: &str) -> String {
    if cards.is_empty() {
        return "(no board)".to_string();
    }
    arena_agents::prompts::format_cards_display(cards)
}

/// Shorten `provider/model-name` to the model name for table columns.
pub fn short_model(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}
