//! Deterministic rule-based agent.
//!
//! Serves as the offline stand-in where no chat provider is wired up, and as
//! a reproducible opponent in tests and benchmarks. The strategy is plain:
//! a preflop strength chart, made-hand detection postflop, and pot-odds
//! gating for calls. No randomness, so seeded matches replay exactly.

use async_trait::async_trait;

use arena_engine::actions::{AgentAction, LegalAmounts};
use arena_engine::cards::{parse_cards, Card};
use arena_engine::eval::{rank_with_board, Category};
use arena_engine::snapshot::TableSnapshot;

use crate::{DecisionOutcome, SeatAgent};

pub struct BaselineAgent {
    name: String,
}

impl BaselineAgent {
    pub fn new() -> Self {
        Self::named("baseline")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Preflop strength on a 0-10 scale: premium pairs and big suited
    /// broadways at the top, ragged offsuit hands at the bottom.
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let r1 = hole[0].rank.value();
        let r2 = hole[1].rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;

        if r1 == r2 {
            return match high {
                14 | 13 => 10,
                12 | 11 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        let base = match (high, low) {
            (14, 13) => 8,
            (14, 12) => 7,
            (14, 11) => 6,
            (14, 10) => 5,
            (14, _) => 4,
            (13, 12) => 6,
            (13, 11) => 5,
            (13, 10) => 4,
            (12, 11) => 5,
            (12, 10) => 4,
            _ => {
                if high - low <= 2 && high >= 9 {
                    3
                } else if high >= 11 && low >= 9 {
                    3
                } else {
                    1
                }
            }
        };
        if suited {
            base + 1
        } else {
            base
        }
    }

    /// Postflop strength from the made hand against the current board.
    /// Partial boards are padded conservatively by category only.
    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> u8 {
        let category = if board.len() == 5 {
            rank_with_board(hole, board).category
        } else {
            // On flop/turn, rank what is visible: count matches by hand
            made_category(hole, board)
        };
        match category {
            Category::StraightFlush | Category::FourOfAKind => 10,
            Category::FullHouse => 9,
            Category::Flush | Category::Straight => 8,
            Category::ThreeOfAKind => 7,
            Category::TwoPair => 6,
            Category::OnePair => 4,
            Category::HighCard => 1,
        }
    }

    fn act(&self, snapshot: &TableSnapshot, legal: &LegalAmounts) -> AgentAction {
        let hero = snapshot.hero();
        let hole = hero
            .hole_cards
            .as_deref()
            .and_then(|h| parse_cards(h).ok())
            .filter(|h| h.len() == 2);
        let hole = match hole {
            Some(h) => [h[0], h[1]],
            None => {
                return if legal.can_check {
                    AgentAction::check()
                } else {
                    AgentAction::fold()
                }
            }
        };
        let board = parse_cards(&snapshot.community_cards).unwrap_or_default();

        let strength = if board.is_empty() {
            Self::preflop_strength(hole)
        } else {
            Self::postflop_strength(hole, &board)
        };

        match legal.call_amount {
            None => {
                // Nothing to call: value-bet strong hands, otherwise check
                if strength >= 7 {
                    if let Some(min_to) = legal.min_raise_to {
                        return AgentAction::raise_to(min_to);
                    }
                }
                AgentAction::check()
            }
            Some(call_amount) => {
                if strength >= 9 {
                    if let Some(min_to) = legal.min_raise_to {
                        return AgentAction::raise_to(min_to);
                    }
                }
                // Price the call: required equity vs a strength proxy
                let required = call_amount as f64 / (snapshot.pot + call_amount) as f64 * 100.0;
                let estimated = strength as f64 * 8.0;
                if estimated >= required && strength >= 3 {
                    AgentAction::call(Some(call_amount))
                } else {
                    AgentAction::fold()
                }
            }
        }
    }
}

impl Default for BaselineAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Category of the made hand using only the visible cards.
fn made_category(hole: [Card; 2], board: &[Card]) -> Category {
    let mut counts = [0u8; 15];
    for c in hole.iter().chain(board.iter()) {
        counts[c.rank.value() as usize] += 1;
    }
    let pairs = counts.iter().filter(|&&n| n == 2).count();
    let trips = counts.iter().any(|&n| n == 3);
    let quads = counts.iter().any(|&n| n >= 4);

    // Only count multiples the hole cards participate in as "made"
    let hole_plays = counts[hole[0].rank.value() as usize] >= 2
        || counts[hole[1].rank.value() as usize] >= 2
        || hole[0].rank == hole[1].rank;

    if quads {
        Category::FourOfAKind
    } else if trips && pairs >= 1 {
        Category::FullHouse
    } else if trips {
        Category::ThreeOfAKind
    } else if pairs >= 2 && hole_plays {
        Category::TwoPair
    } else if pairs >= 1 && hole_plays {
        Category::OnePair
    } else {
        Category::HighCard
    }
}

#[async_trait]
impl SeatAgent for BaselineAgent {
    async fn decide(&self, snapshot: &TableSnapshot) -> DecisionOutcome {
        let legal = snapshot.legal_amounts();
        let action = self.act(snapshot, &legal);
        // The rules above only emit members of the legal set; guard anyway
        let action = if action.is_legal(&legal) {
            action
        } else if legal.can_check {
            AgentAction::check()
        } else {
            AgentAction::fold()
        };
        DecisionOutcome::local(action)
    }

    fn model(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::hand::{HandConfig, HandState};
    use arena_engine::seat::Seat;

    fn snapshot_for_seed(seed: u64) -> TableSnapshot {
        let seats = vec![Seat::new(0, "model/a", 1_000), Seat::new(1, "model/b", 1_000)];
        let config = HandConfig {
            small_blind: 5,
            big_blind: 10,
            ante: 0,
            button: 0,
        };
        let hand = HandState::new(seats, config, seed).unwrap();
        hand.snapshot_for(hand.actor().unwrap())
    }

    #[test]
    fn premium_pairs_score_top() {
        let aces = [
            "As".parse().unwrap(),
            "Ah".parse().unwrap(),
        ];
        assert_eq!(BaselineAgent::preflop_strength(aces), 10);
        let seven_two = ["7s".parse().unwrap(), "2h".parse().unwrap()];
        assert!(BaselineAgent::preflop_strength(seven_two) <= 2);
    }

    #[tokio::test]
    async fn decisions_are_always_legal_and_deterministic() {
        let agent = BaselineAgent::new();
        for seed in 0..25u64 {
            let snap = snapshot_for_seed(seed);
            let legal = snap.legal_amounts();
            let first = agent.decide(&snap).await;
            let second = agent.decide(&snap).await;
            assert!(first.action.is_legal(&legal), "seed {seed}");
            assert_eq!(first.action, second.action, "deterministic for seed {seed}");
            assert!(first.parsed_ok);
            assert!(!first.default_used);
        }
    }

    #[tokio::test]
    async fn checks_when_cards_are_hidden() {
        let mut snap = snapshot_for_seed(1);
        snap.players[snap.current_player_index].hole_cards = None;
        let agent = BaselineAgent::new();
        let outcome = agent.decide(&snap).await;
        let legal = snap.legal_amounts();
        assert!(outcome.action.is_legal(&legal));
    }
}
