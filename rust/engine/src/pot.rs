//! Pot layering and settlement.
//!
//! Commitments from every seat (blinds, antes and bets, including dead money
//! from folded seats) are layered into a main pot and side pots keyed by
//! all-in ceilings. Each layer is contested only by unfolded seats committed
//! up to that layer's cap.

use crate::eval::HandRank;

/// One pot layer: the chips in it and the seats eligible to win it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

/// Layer total commitments into pots.
///
/// `committed[i]` is seat i's full commitment for the hand; `contesting[i]`
/// is false for folded seats (their chips stay in the layers but they cannot
/// win). Layers are cut at each distinct commitment level of a contesting
/// seat, lowest first.
pub fn build_pots(committed: &[u32], contesting: &[bool]) -> Vec<Pot> {
    let mut caps: Vec<u32> = committed
        .iter()
        .zip(contesting)
        .filter(|(&c, &live)| live && c > 0)
        .map(|(&c, _)| c)
        .collect();
    caps.sort_unstable();
    caps.dedup();

    let mut pots = Vec::with_capacity(caps.len());
    let mut floor = 0u32;
    for &cap in &caps {
        let mut amount = 0u32;
        let mut eligible = Vec::new();
        for (seat, (&c, &live)) in committed.iter().zip(contesting).enumerate() {
            amount += c.clamp(floor, cap) - floor;
            if live && c >= cap {
                eligible.push(seat);
            }
        }
        if amount > 0 {
            pots.push(Pot { amount, eligible });
        }
        floor = cap;
    }

    // Chips above the highest contesting cap can only come from one seat
    // (an uncalled bet); return them to that seat as a degenerate layer.
    let overflow: u32 = committed.iter().map(|&c| c.saturating_sub(floor)).sum();
    if overflow > 0 {
        if let Some(seat) = committed.iter().position(|&c| c > floor) {
            pots.push(Pot {
                amount: overflow,
                eligible: vec![seat],
            });
        }
    }

    pots
}

/// Settle every pot layer against the seats' hand ranks.
///
/// Returns per-seat payouts. Ties split a layer evenly; odd chips go to the
/// tied winners in table order starting left of the button.
pub fn settle(
    pots: &[Pot],
    ranks: &[Option<HandRank>],
    seats: usize,
    button: usize,
) -> Vec<u32> {
    let mut payouts = vec![0u32; seats];
    for pot in pots {
        let best = pot
            .eligible
            .iter()
            .filter_map(|&s| ranks[s].as_ref())
            .max()
            .cloned();
        let winners: Vec<usize> = match &best {
            Some(best) => pot
                .eligible
                .iter()
                .copied()
                .filter(|&s| ranks[s].as_ref() == Some(best))
                .collect(),
            // No ranked contender (uncalled-bet layer): refund the sole seat
            None => pot.eligible.clone(),
        };
        if winners.is_empty() {
            continue;
        }
        let share = pot.amount / winners.len() as u32;
        let mut odd = pot.amount - share * winners.len() as u32;
        for w in order_from(button, seats)
            .into_iter()
            .filter(|s| winners.contains(s))
        {
            payouts[w] += share;
            if odd > 0 {
                payouts[w] += 1;
                odd -= 1;
            }
        }
    }
    payouts
}

/// Seats in table order starting one seat left of the button.
pub fn order_from(button: usize, seats: usize) -> Vec<usize> {
    (1..=seats).map(|i| (button + i) % seats).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::eval::rank_seven;

    fn rank(s: &str) -> Option<HandRank> {
        let cards = parse_cards(s).unwrap().try_into().unwrap();
        Some(rank_seven(&cards))
    }

    #[test]
    fn single_layer_when_commitments_match() {
        let pots = build_pots(&[100, 100, 100], &[true, true, true]);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 300);
        assert_eq!(pots[0].eligible, vec![0, 1, 2]);
    }

    #[test]
    fn short_all_in_creates_side_pot() {
        // Seat 0 all-in for 50, seats 1 and 2 committed 200 each
        let pots = build_pots(&[50, 200, 200], &[true, true, true]);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible, vec![0, 1, 2]);
        assert_eq!(pots[1].amount, 300);
        assert_eq!(pots[1].eligible, vec![1, 2]);
    }

    #[test]
    fn folded_chips_stay_in_pot_but_cannot_win() {
        let pots = build_pots(&[75, 200, 200], &[false, true, true]);
        let total: u32 = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 475);
        for p in &pots {
            assert!(!p.eligible.contains(&0));
        }
    }

    #[test]
    fn uncalled_bet_returns_to_bettor() {
        // Seat 1 bet 300, seat 0 called all-in for 120 only
        let pots = build_pots(&[120, 300], &[true, true]);
        let last = pots.last().unwrap();
        assert_eq!(last.amount, 180);
        assert_eq!(last.eligible, vec![1]);
    }

    #[test]
    fn odd_chip_goes_left_of_button() {
        let pots = vec![Pot {
            amount: 101,
            eligible: vec![0, 1],
        }];
        let ranks = vec![rank("AhKdQc7s2d5h9c"), rank("AsKsQd7h2c5d9s")];
        let payouts = settle(&pots, &ranks, 2, 0);
        // Seat 1 sits left of the button and takes the odd chip
        assert_eq!(payouts, vec![50, 51]);
    }
}
