//! The hand state machine: one complete hand of No-Limit Hold'em.
//!
//! The machine is pure and deterministic: every card dealt comes from a deck
//! seeded at construction, and the only inputs after that are the seat
//! actions applied through [`HandState::apply`]. Dealing, blind and ante
//! posting, street transitions, legal-action generation, run-outs and pot
//! settlement all happen inside this module; deciding *which* action a seat
//! takes is the caller's business.
//!
//! Betting rules enforced here:
//! - preflop action starts left of the big blind, postflop left of the
//!   button; the big blind keeps the option in an unraised pot;
//! - a full raise reopens action for everyone; an incomplete all-in raise
//!   obliges a call but does not restore raise rights for seats that have
//!   already acted (the engine tracks the last *full* raise size separately);
//! - fold is always available; check and call are mutually exclusive;
//! - chips are conserved to the chip, checked when the pot is awarded.

use crate::actions::{LegalAction, LegalAmounts, SeatAction};
use crate::cards::{cards_to_string, Card};
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::eval::rank_with_board;
use crate::history::{BettingEvent, Street};
use crate::pot::{build_pots, order_from, settle};
use crate::seat::{Seat, SeatStatus};
use crate::snapshot::{LegalActionView, PlayerView, TableSnapshot};

/// Stakes and button position for one hand.
#[derive(Debug, Clone, Copy)]
pub struct HandConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub ante: u32,
    pub button: usize,
}

/// Terminal result of a hand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandOutcome {
    /// Chips awarded per seat
    pub payouts: Vec<u32>,
    /// Stacks after settlement
    pub final_stacks: Vec<u32>,
    /// Final stack minus starting stack, per seat
    pub profits: Vec<i64>,
    pub pot: u32,
    pub reached_showdown: bool,
    /// Reveal order at showdown: river aggressor first, else first unfolded
    /// seat left of the button. Empty for uncontested pots.
    pub showdown_order: Vec<usize>,
}

#[derive(Debug)]
pub struct HandState {
    seats: Vec<Seat>,
    stacks: Vec<u32>,
    hole: Vec<[Card; 2]>,
    board: Vec<Card>,
    street: Street,
    complete: bool,
    pot: u32,
    street_bets: Vec<u32>,
    committed: Vec<u32>,
    status: Vec<SeatStatus>,
    pending: Vec<bool>,
    acted: Vec<bool>,
    no_reraise: Vec<bool>,
    current_bet: u32,
    last_full_raise: u32,
    actor: Option<usize>,
    street_aggressor: Option<usize>,
    config: HandConfig,
    deck: Deck,
    history: Vec<BettingEvent>,
    outcome: Option<HandOutcome>,
}

impl HandState {
    /// Deal a new hand: shuffle, deal hole cards, post antes and blinds, and
    /// open preflop action. If the blinds put every seat all-in the board is
    /// run out and the hand settles immediately.
    pub fn new(seats: Vec<Seat>, config: HandConfig, seed: u64) -> Result<Self, EngineError> {
        let n = seats.len();
        if !(2..=10).contains(&n) {
            return Err(EngineError::BadSeatCount(n));
        }
        if config.button >= n {
            return Err(EngineError::BadButton {
                button: config.button,
                seats: n,
            });
        }
        if let Some(empty) = seats.iter().position(|s| s.starting_stack == 0) {
            return Err(EngineError::EmptySeat(empty));
        }

        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();

        // One card at a time, starting left of the button
        let deal_order = order_from(config.button, n);
        let mut dealt: Vec<Vec<Card>> = vec![Vec::with_capacity(2); n];
        for _ in 0..2 {
            for &s in &deal_order {
                dealt[s].push(deck.deal_card().ok_or(EngineError::DeckExhausted)?);
            }
        }
        let hole: Vec<[Card; 2]> = dealt.into_iter().map(|c| [c[0], c[1]]).collect();

        let stacks: Vec<u32> = seats.iter().map(|s| s.starting_stack).collect();
        let mut state = Self {
            stacks,
            hole,
            board: Vec::with_capacity(5),
            street: Street::Preflop,
            complete: false,
            pot: 0,
            street_bets: vec![0; n],
            committed: vec![0; n],
            status: vec![SeatStatus::Live; n],
            pending: vec![false; n],
            acted: vec![false; n],
            no_reraise: vec![false; n],
            current_bet: 0,
            last_full_raise: config.big_blind,
            actor: None,
            street_aggressor: None,
            config,
            deck,
            history: Vec::new(),
            outcome: None,
            seats,
        };

        if state.config.ante > 0 {
            for s in order_from(state.config.button, n) {
                state.commit_chips(s, state.config.ante, false);
            }
        }

        let (sb_seat, bb_seat) = state.blind_seats();
        state.commit_chips(sb_seat, state.config.small_blind, true);
        state.commit_chips(bb_seat, state.config.big_blind, true);
        state.current_bet = *state.street_bets.iter().max().unwrap_or(&0);

        state.open_street_pending();
        if state.pending.iter().any(|&p| p) {
            state.actor = state.next_pending_from((bb_seat + 1) % n);
        } else {
            state.run_out_and_settle()?;
        }
        Ok(state)
    }

    /// Small-blind and big-blind seats for the configured button.
    /// Heads-up, the button posts the small blind.
    pub fn blind_seats(&self) -> (usize, usize) {
        let n = self.seats.len();
        let sb = if n == 2 {
            self.config.button
        } else {
            (self.config.button + 1) % n
        };
        (sb, (sb + 1) % n)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn actor(&self) -> Option<usize> {
        self.actor
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn stacks(&self) -> &[u32] {
        &self.stacks
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn history(&self) -> &[BettingEvent] {
        &self.history
    }

    pub fn hole_cards(&self, seat: usize) -> [Card; 2] {
        self.hole[seat]
    }

    pub fn outcome(&self) -> Option<&HandOutcome> {
        self.outcome.as_ref()
    }

    /// Legal actions for the seat to act.
    pub fn legal_actions(&self) -> Result<Vec<LegalAction>, EngineError> {
        let seat = self.actor.ok_or(EngineError::NoActor)?;
        let to_call = self.current_bet.saturating_sub(self.street_bets[seat]);
        let mut actions = vec![LegalAction::Fold];
        if to_call == 0 {
            actions.push(LegalAction::Check);
        } else {
            actions.push(LegalAction::Call {
                amount: to_call.min(self.stacks[seat]),
            });
        }

        let max_to = self.street_bets[seat] + self.stacks[seat];
        let has_responder = (0..self.seats.len())
            .any(|j| j != seat && self.status[j] == SeatStatus::Live);
        if !self.no_reraise[seat] && has_responder && max_to > self.current_bet {
            let min_to = (self.current_bet + self.last_full_raise).min(max_to);
            actions.push(LegalAction::Raise { min_to, max_to });
        }
        Ok(actions)
    }

    pub fn legal_amounts(&self) -> Result<LegalAmounts, EngineError> {
        Ok(LegalAmounts::from_actions(&self.legal_actions()?))
    }

    /// Apply one action for the seat to act and advance the machine: move to
    /// the next actor, close the street, run out the board, or settle.
    pub fn apply(&mut self, seat: usize, action: SeatAction) -> Result<(), EngineError> {
        if self.complete {
            return Err(EngineError::HandComplete);
        }
        let expected = self.actor.ok_or(EngineError::NoActor)?;
        if expected != seat {
            return Err(EngineError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let legal = self.legal_amounts()?;
        let to_call = self.current_bet.saturating_sub(self.street_bets[seat]);
        let record_amount;
        match action {
            SeatAction::Fold => {
                self.status[seat] = SeatStatus::Folded;
                self.pending[seat] = false;
                record_amount = 0;
            }
            SeatAction::Check => {
                if !legal.can_check {
                    return Err(EngineError::IllegalAction { action: "check" });
                }
                self.pending[seat] = false;
                record_amount = 0;
            }
            SeatAction::Call => {
                if !legal.can_call() {
                    return Err(EngineError::IllegalAction { action: "call" });
                }
                let pay = to_call.min(self.stacks[seat]);
                self.move_chips(seat, pay);
                self.pending[seat] = false;
                record_amount = pay;
            }
            SeatAction::RaiseTo(amount) => {
                let (min_to, max_to) = match (legal.min_raise_to, legal.max_raise_to) {
                    (Some(min), Some(max)) => (min, max),
                    _ => return Err(EngineError::IllegalAction { action: "raise" }),
                };
                if amount < min_to || amount > max_to {
                    return Err(EngineError::RaiseOutOfRange {
                        amount,
                        min_to,
                        max_to,
                    });
                }
                let pay = amount - self.street_bets[seat];
                let raise_size = amount - self.current_bet;
                self.move_chips(seat, pay);
                let full_raise = raise_size >= self.last_full_raise;
                for j in 0..self.seats.len() {
                    if j == seat || self.status[j] != SeatStatus::Live {
                        continue;
                    }
                    if full_raise {
                        self.pending[j] = true;
                        self.no_reraise[j] = false;
                    } else if self.street_bets[j] < amount {
                        // Incomplete all-in raise: seats that already acted
                        // owe a call but cannot re-raise
                        self.pending[j] = true;
                        if self.acted[j] {
                            self.no_reraise[j] = true;
                        }
                    }
                }
                if full_raise {
                    self.last_full_raise = raise_size;
                }
                self.current_bet = amount;
                self.pending[seat] = false;
                self.street_aggressor = Some(seat);
                record_amount = amount;
            }
        }
        self.acted[seat] = true;
        self.history.push(BettingEvent {
            player: seat,
            model: self.seats[seat].model.clone(),
            action: action.verb().to_string(),
            amount: record_amount,
            street: self.street,
        });

        if self.pot != self.committed.iter().sum::<u32>() {
            return Err(EngineError::InvariantViolation(format!(
                "pot {} != committed {}",
                self.pot,
                self.committed.iter().sum::<u32>()
            )));
        }

        if self.in_hand_count() == 1 {
            return self.settle_uncontested();
        }
        if self.pending.iter().any(|&p| p) {
            self.actor = self.next_pending_from((seat + 1) % self.seats.len());
            Ok(())
        } else {
            self.close_street()
        }
    }

    /// Snapshot from one seat's perspective. Hole cards are concealed for
    /// every other seat; legal actions are only attached for the seat to act.
    pub fn snapshot_for(&self, viewer: usize) -> TableSnapshot {
        let players = self
            .seats
            .iter()
            .map(|s| PlayerView {
                player_index: s.index,
                model_name: s.model.clone(),
                stack: self.stacks[s.index],
                hole_cards: if s.index == viewer {
                    Some(cards_to_string(&self.hole[s.index]))
                } else {
                    None
                },
                is_active: self.status[s.index].in_hand(),
                current_bet: self.street_bets[s.index],
            })
            .collect();

        let is_actor = self.actor == Some(viewer);
        let (legal_views, amounts) = if is_actor {
            let actions = self.legal_actions().unwrap_or_default();
            let amounts = LegalAmounts::from_actions(&actions);
            (
                actions.iter().map(LegalActionView::from_action).collect(),
                amounts,
            )
        } else {
            (Vec::new(), LegalAmounts::default())
        };

        TableSnapshot {
            pot: self.pot,
            community_cards: cards_to_string(&self.board),
            street: self.street,
            current_player_index: viewer,
            players,
            betting_history: self.history.clone(),
            legal_actions: legal_views,
            amount_to_call: amounts.call_amount.unwrap_or(0),
            min_raise: amounts.min_raise_to,
            max_raise: amounts.max_raise_to,
        }
    }

    fn in_hand_count(&self) -> usize {
        self.status.iter().filter(|s| s.in_hand()).count()
    }

    /// Post chips for a seat: antes go straight to the pot, blinds also count
    /// toward the street bet. Short stacks post all-in.
    fn commit_chips(&mut self, seat: usize, amount: u32, street_bet: bool) {
        let pay = amount.min(self.stacks[seat]);
        self.stacks[seat] -= pay;
        self.committed[seat] += pay;
        self.pot += pay;
        if street_bet {
            self.street_bets[seat] += pay;
        }
        if self.stacks[seat] == 0 {
            self.status[seat] = SeatStatus::AllIn;
        }
    }

    fn move_chips(&mut self, seat: usize, pay: u32) {
        self.stacks[seat] -= pay;
        self.street_bets[seat] += pay;
        self.committed[seat] += pay;
        self.pot += pay;
        if self.stacks[seat] == 0 {
            self.status[seat] = SeatStatus::AllIn;
        }
    }

    /// Mark the seats that owe action on a freshly opened street. With fewer
    /// than two seats able to respond there is no betting unless a lone live
    /// seat still owes a call (possible preflop against an all-in blind).
    fn open_street_pending(&mut self) {
        let n = self.seats.len();
        let responders: Vec<usize> = (0..n)
            .filter(|&i| self.status[i] == SeatStatus::Live)
            .collect();
        for p in self.pending.iter_mut() {
            *p = false;
        }
        if responders.len() >= 2 {
            for i in responders {
                self.pending[i] = true;
            }
        } else if let Some(&lone) = responders.first() {
            if self.street_bets[lone] < self.current_bet {
                self.pending[lone] = true;
            }
        }
    }

    fn next_pending_from(&self, start: usize) -> Option<usize> {
        let n = self.seats.len();
        (0..n).map(|i| (start + i) % n).find(|&i| self.pending[i])
    }

    /// Close the current street: deal the next one and reopen betting, or go
    /// to showdown after the river. Streets with no possible betting cascade
    /// until the board is complete.
    fn close_street(&mut self) -> Result<(), EngineError> {
        loop {
            match self.street.next() {
                None => return self.showdown(),
                Some(next) => {
                    self.street = next;
                    self.deal_board_for(next)?;
                    for b in self.street_bets.iter_mut() {
                        *b = 0;
                    }
                    self.current_bet = 0;
                    self.last_full_raise = self.config.big_blind;
                    self.street_aggressor = None;
                    for a in self.acted.iter_mut() {
                        *a = false;
                    }
                    for r in self.no_reraise.iter_mut() {
                        *r = false;
                    }
                    self.open_street_pending();
                    if self.pending.iter().any(|&p| p) {
                        let start = (self.config.button + 1) % self.seats.len();
                        self.actor = self.next_pending_from(start);
                        return Ok(());
                    }
                    // Nobody can bet: run the next street out
                }
            }
        }
    }

    fn deal_board_for(&mut self, street: Street) -> Result<(), EngineError> {
        let count = match street {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        };
        if count == 0 {
            return Ok(());
        }
        self.deck.burn_card();
        for _ in 0..count {
            let c = self.deck.deal_card().ok_or(EngineError::DeckExhausted)?;
            self.board.push(c);
        }
        Ok(())
    }

    /// Settle with no further betting possible; used when posting leaves no
    /// seat with an action.
    fn run_out_and_settle(&mut self) -> Result<(), EngineError> {
        self.actor = None;
        self.showdown()
    }

    fn settle_uncontested(&mut self) -> Result<(), EngineError> {
        let winner = self
            .status
            .iter()
            .position(|s| s.in_hand())
            .expect("one seat left in hand");
        let mut payouts = vec![0u32; self.seats.len()];
        payouts[winner] = self.pot;
        self.finish(payouts, false, Vec::new())
    }

    fn showdown(&mut self) -> Result<(), EngineError> {
        // Run out any board still missing (all-in before the river)
        while self.board.len() < 5 {
            let next = match self.board.len() {
                0 => Street::Flop,
                3 => Street::Turn,
                _ => Street::River,
            };
            self.deal_board_for(next)?;
            self.street = next;
        }

        let contesting: Vec<bool> = self.status.iter().map(|s| s.in_hand()).collect();
        let ranks: Vec<_> = (0..self.seats.len())
            .map(|i| {
                if contesting[i] {
                    Some(rank_with_board(self.hole[i], &self.board))
                } else {
                    None
                }
            })
            .collect();
        let pots = build_pots(&self.committed, &contesting);
        let payouts = settle(&pots, &ranks, self.seats.len(), self.config.button);
        let order = self.showdown_order();
        self.finish(payouts, true, order)
    }

    /// River aggressor shows first; with no river bet, the first unfolded
    /// seat left of the button does.
    fn showdown_order(&self) -> Vec<usize> {
        let n = self.seats.len();
        let start = self
            .street_aggressor
            .filter(|_| self.street == Street::River)
            .or_else(|| {
                order_from(self.config.button, n)
                    .into_iter()
                    .find(|&i| self.status[i].in_hand())
            });
        match start {
            Some(first) => (0..n)
                .map(|i| (first + i) % n)
                .filter(|&i| self.status[i].in_hand())
                .collect(),
            None => Vec::new(),
        }
    }

    fn finish(
        &mut self,
        payouts: Vec<u32>,
        reached_showdown: bool,
        showdown_order: Vec<usize>,
    ) -> Result<(), EngineError> {
        for (stack, pay) in self.stacks.iter_mut().zip(&payouts) {
            *stack += pay;
        }
        let starting: u64 = self.seats.iter().map(|s| s.starting_stack as u64).sum();
        let ending: u64 = self.stacks.iter().map(|&s| s as u64).sum();
        if starting != ending {
            return Err(EngineError::InvariantViolation(format!(
                "chips not conserved: started {starting}, ended {ending}"
            )));
        }
        let profits = self
            .stacks
            .iter()
            .zip(&self.seats)
            .map(|(&now, seat)| now as i64 - seat.starting_stack as i64)
            .collect();
        self.outcome = Some(HandOutcome {
            final_stacks: self.stacks.clone(),
            profits,
            pot: self.pot,
            reached_showdown,
            showdown_order,
            payouts,
        });
        self.complete = true;
        self.actor = None;
        Ok(())
    }
}
