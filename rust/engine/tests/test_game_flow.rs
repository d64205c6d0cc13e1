use arena_engine::actions::SeatAction;
use arena_engine::hand::{HandConfig, HandState};
use arena_engine::history::Street;
use arena_engine::seat::Seat;

fn heads_up(button: usize, seed: u64) -> HandState {
    let seats = vec![Seat::new(0, "model/a", 1_000), Seat::new(1, "model/b", 1_000)];
    let config = HandConfig {
        small_blind: 5,
        big_blind: 10,
        ante: 0,
        button,
    };
    HandState::new(seats, config, seed).unwrap()
}

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let hand = heads_up(0, 42);
    assert_eq!(hand.blind_seats(), (0, 1));
    assert_eq!(hand.actor(), Some(0));
    assert_eq!(hand.pot(), 15);
    assert_eq!(hand.stacks(), &[995, 990]);
}

#[test]
fn fold_to_blind_awards_pot_uncontested() {
    let mut hand = heads_up(0, 42);
    hand.apply(0, SeatAction::Fold).unwrap();
    assert!(hand.is_complete());
    let outcome = hand.outcome().unwrap();
    assert!(!outcome.reached_showdown);
    assert_eq!(outcome.final_stacks, vec![995, 1005]);
    assert_eq!(outcome.profits, vec![-5, 5]);
}

#[test]
fn four_folded_hands_with_alternating_button_break_even() {
    // Both seats fold to any bet: the big blind collects the small blind
    // every hand, and button alternation returns the chips.
    let mut stacks = [1_000u32, 1_000u32];
    for hand_no in 0..4u64 {
        let button = (hand_no % 2) as usize;
        let seats = vec![
            Seat::new(0, "model/a", stacks[0]),
            Seat::new(1, "model/b", stacks[1]),
        ];
        let config = HandConfig {
            small_blind: 5,
            big_blind: 10,
            ante: 0,
            button,
        };
        let mut hand = HandState::new(seats, config, 42 + hand_no).unwrap();
        let actor = hand.actor().unwrap();
        assert_eq!(actor, button, "small blind acts first preflop");
        hand.apply(actor, SeatAction::Fold).unwrap();
        let outcome = hand.outcome().unwrap();
        stacks = [outcome.final_stacks[0], outcome.final_stacks[1]];
        assert_eq!(stacks[0] + stacks[1], 2_000, "chips conserved");
    }
    assert_eq!(stacks, [1_000, 1_000]);
}

#[test]
fn checked_down_hand_reaches_showdown_with_full_board() {
    let mut hand = heads_up(0, 7);
    hand.apply(0, SeatAction::Call).unwrap();
    hand.apply(1, SeatAction::Check).unwrap();
    assert_eq!(hand.street(), Street::Flop);
    assert_eq!(hand.board().len(), 3);
    // Postflop the non-button seat acts first
    assert_eq!(hand.actor(), Some(1));
    for _ in 0..3 {
        hand.apply(1, SeatAction::Check).unwrap();
        hand.apply(0, SeatAction::Check).unwrap();
    }
    assert!(hand.is_complete());
    let outcome = hand.outcome().unwrap();
    assert!(outcome.reached_showdown);
    assert_eq!(hand.board().len(), 5);
    assert_eq!(
        outcome.final_stacks.iter().sum::<u32>(),
        2_000,
        "chips conserved through showdown"
    );
}

#[test]
fn big_blind_keeps_the_option_in_a_limped_pot() {
    let mut hand = heads_up(0, 9);
    hand.apply(0, SeatAction::Call).unwrap();
    // The limp does not close preflop; the big blind still owns an action
    assert_eq!(hand.street(), Street::Preflop);
    assert_eq!(hand.actor(), Some(1));
    hand.apply(1, SeatAction::RaiseTo(30)).unwrap();
    assert_eq!(hand.actor(), Some(0), "raise reopens the button");
}

#[test]
fn three_handed_action_order_and_blinds() {
    let seats = vec![
        Seat::new(0, "model/a", 500),
        Seat::new(1, "model/b", 500),
        Seat::new(2, "model/c", 500),
    ];
    let config = HandConfig {
        small_blind: 5,
        big_blind: 10,
        ante: 0,
        button: 0,
    };
    let mut hand = HandState::new(seats, config, 3).unwrap();
    assert_eq!(hand.blind_seats(), (1, 2));
    // Preflop opens left of the big blind: the button
    assert_eq!(hand.actor(), Some(0));
    hand.apply(0, SeatAction::Call).unwrap();
    hand.apply(1, SeatAction::Call).unwrap();
    hand.apply(2, SeatAction::Check).unwrap();
    // Postflop opens left of the button
    assert_eq!(hand.street(), Street::Flop);
    assert_eq!(hand.actor(), Some(1));
}

#[test]
fn seeded_hands_replay_identically() {
    let run = |seed: u64| {
        let mut hand = heads_up(0, seed);
        hand.apply(0, SeatAction::Call).unwrap();
        hand.apply(1, SeatAction::Check).unwrap();
        for _ in 0..3 {
            hand.apply(1, SeatAction::Check).unwrap();
            hand.apply(0, SeatAction::Check).unwrap();
        }
        (
            hand.board().to_vec(),
            hand.hole_cards(0),
            hand.hole_cards(1),
            hand.outcome().unwrap().final_stacks.clone(),
        )
    };
    assert_eq!(run(1234), run(1234));
    assert_ne!(run(1234).0, run(1235).0);
}

#[test]
fn rejects_bad_tables() {
    let config = HandConfig {
        small_blind: 5,
        big_blind: 10,
        ante: 0,
        button: 0,
    };
    let one_seat = vec![Seat::new(0, "m", 100)];
    assert!(HandState::new(one_seat, config, 1).is_err());

    let with_empty = vec![Seat::new(0, "m", 100), Seat::new(1, "n", 0)];
    assert!(HandState::new(with_empty, config, 1).is_err());

    let bad_button = HandConfig {
        small_blind: 5,
        big_blind: 10,
        ante: 0,
        button: 5,
    };
    let seats = vec![Seat::new(0, "m", 100), Seat::new(1, "n", 100)];
    assert!(HandState::new(seats, bad_button, 1).is_err());
}

#[test]
fn out_of_turn_actions_are_rejected() {
    let mut hand = heads_up(0, 11);
    let err = hand.apply(1, SeatAction::Fold).unwrap_err();
    assert!(matches!(
        err,
        arena_engine::errors::EngineError::OutOfTurn { expected: 0, actual: 1 }
    ));
}

#[test]
fn betting_history_orders_actions_by_street() {
    let mut hand = heads_up(0, 21);
    hand.apply(0, SeatAction::RaiseTo(30)).unwrap();
    hand.apply(1, SeatAction::Call).unwrap();
    hand.apply(1, SeatAction::Check).unwrap();
    hand.apply(0, SeatAction::Check).unwrap();
    let history = hand.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].action, "raise");
    assert_eq!(history[0].amount, 30);
    assert_eq!(history[0].street, Street::Preflop);
    assert_eq!(history[2].street, Street::Flop);
    assert!(history.windows(2).all(|w| w[0].street <= w[1].street));
}
