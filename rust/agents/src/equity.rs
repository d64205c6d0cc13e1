//! Monte-Carlo equity estimation against random opponent hands.
//!
//! The simulation owns its RNG per call and touches no shared state, so
//! concurrent tool executions cannot interfere with each other or with the
//! hand engine's decks.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use arena_engine::cards::{full_deck, parse_cards, Card};
use arena_engine::eval::rank_seven;

const MIN_OPPONENTS: usize = 1;
const MAX_OPPONENTS: usize = 5;
const MIN_SAMPLES: usize = 100;
const MAX_SAMPLES: usize = 5_000;

#[derive(Debug, Clone, Serialize)]
pub struct EquityEstimate {
    pub equity_percentage: f64,
    pub win_probability: f64,
    pub opponents: usize,
    pub sample_size: usize,
    pub confidence: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Normalize a model-supplied card string to the canonical `AsKh` form.
/// Handles common formatting mistakes: separators, `suited`/`offsuit`
/// words, range notation (`AKs`/`AKo`), and bare ranks (`AK`).
pub fn normalize_card_string(cards: &str) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let mut s: String = cards
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '-')
        .collect();
    let lower = s.to_lowercase();
    if lower.contains("suited") {
        s = lower.replace("suited", "s");
    } else if lower.contains("offsuit") {
        s = lower.replace("offsuit", "o");
    }

    let chars: Vec<char> = s.chars().collect();
    let is_rank = |c: char| "AKQJT98765432".contains(c.to_ascii_uppercase());

    // Bare ranks: "AK" becomes spade/heart so the cards differ
    if chars.len() == 2 && is_rank(chars[0]) && is_rank(chars[1]) {
        return format!(
            "{}s{}h",
            chars[0].to_ascii_uppercase(),
            chars[1].to_ascii_uppercase()
        );
    }

    // Range notation: "AKs" suited, "AKo" offsuit
    if chars.len() == 3 && is_rank(chars[0]) && is_rank(chars[1]) {
        let marker = chars[2].to_ascii_lowercase();
        if marker == 's' {
            return format!(
                "{}s{}s",
                chars[0].to_ascii_uppercase(),
                chars[1].to_ascii_uppercase()
            );
        }
        if marker == 'o' {
            return format!(
                "{}s{}h",
                chars[0].to_ascii_uppercase(),
                chars[1].to_ascii_uppercase()
            );
        }
    }

    // Concrete card pairs: fix casing per position
    if chars.len() % 2 == 0 {
        let mut out = String::with_capacity(chars.len());
        for pair in chars.chunks(2) {
            out.push(pair[0].to_ascii_uppercase());
            out.push(pair[1].to_ascii_lowercase());
        }
        return out;
    }

    s
}

/// Estimate hero equity by dealing random opponent hands and board run-outs.
/// Opponent count and sample count are clamped to sane ranges; unparseable
/// cards produce the 50% fallback payload rather than an error.
pub fn calculate_equity(
    hole_cards: &str,
    community_cards: &str,
    num_opponents: usize,
    sample_count: usize,
) -> EquityEstimate {
    let opponents = num_opponents.clamp(MIN_OPPONENTS, MAX_OPPONENTS);
    let samples = sample_count.clamp(MIN_SAMPLES, MAX_SAMPLES);

    let hole = normalize_card_string(hole_cards);
    let board = normalize_card_string(community_cards);

    let parsed = parse_cards(&hole).and_then(|h| parse_cards(&board).map(|b| (h, b)));
    let (hole, board) = match parsed {
        Ok((h, b)) if h.len() == 2 && b.len() <= 5 => (h, b),
        Ok(_) => return fallback(opponents, "wrong number of cards".to_string()),
        Err(e) => return fallback(opponents, e.to_string()),
    };

    let mut rng = ChaCha20Rng::seed_from_u64(rand::random());
    let equity = simulate(
        [hole[0], hole[1]],
        &board,
        opponents,
        samples,
        &mut rng,
    );
    let equity = (equity * 10.0).round() / 10.0;

    let recommendation = if equity >= 70.0 {
        format!("Very strong hand! With {equity:.1}% equity, you should bet for value and consider raising.")
    } else if equity >= 50.0 {
        format!("Solid equity at {equity:.1}%. You're ahead of random hands. Consider betting or calling.")
    } else if equity >= 35.0 {
        format!("Marginal equity at {equity:.1}%. Proceed with caution, consider pot odds before calling.")
    } else if equity >= 20.0 {
        format!("Weak equity at {equity:.1}%. Only continue with good pot odds or as a semi-bluff.")
    } else {
        format!("Very weak equity at {equity:.1}%. Consider folding unless you have great pot odds.")
    };

    EquityEstimate {
        equity_percentage: equity,
        win_probability: equity,
        opponents,
        sample_size: samples,
        confidence: if samples >= 1_000 { "high" } else { "medium" }.to_string(),
        recommendation,
        error: None,
    }
}

/// Core simulation loop: deal opponents and the board completion from the
/// remaining deck, rank everyone, and credit wins (ties split).
fn simulate(
    hole: [Card; 2],
    board: &[Card],
    opponents: usize,
    samples: usize,
    rng: &mut ChaCha20Rng,
) -> f64 {
    let known: Vec<Card> = hole.iter().copied().chain(board.iter().copied()).collect();
    let mut stub: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !known.contains(c))
        .collect();
    let need_board = 5 - board.len();

    let mut score = 0.0f64;
    for _ in 0..samples {
        stub.shuffle(rng);
        let mut next = 0;
        let mut full_board = board.to_vec();
        full_board.extend_from_slice(&stub[next..next + need_board]);
        next += need_board;

        let hero = seven(hole, &full_board);
        let hero_rank = rank_seven(&hero);

        let mut beaten = false;
        let mut tied = 0usize;
        for _ in 0..opponents {
            let opp_hole = [stub[next], stub[next + 1]];
            next += 2;
            let opp_rank = rank_seven(&seven(opp_hole, &full_board));
            if opp_rank > hero_rank {
                beaten = true;
                break;
            }
            if opp_rank == hero_rank {
                tied += 1;
            }
        }
        if !beaten {
            score += 1.0 / (tied as f64 + 1.0);
        }
    }
    score / samples as f64 * 100.0
}

fn seven(hole: [Card; 2], board: &[Card]) -> [Card; 7] {
    let mut cards = [hole[0]; 7];
    cards[1] = hole[1];
    cards[2..].copy_from_slice(board);
    cards
}

fn fallback(opponents: usize, error: String) -> EquityEstimate {
    EquityEstimate {
        equity_percentage: 50.0,
        win_probability: 50.0,
        opponents,
        sample_size: 0,
        confidence: "error".to_string(),
        recommendation: format!("Could not calculate equity: {error}. Assuming 50% as baseline."),
        error: Some(error),
    }
}
