//! Properties of the evaluator and simulator checked through the public API.

use approx::assert_relative_eq;
use holdem_equity::core::{
    Card, ErrorKind, Hand, HandCategory, PokerError, Score, Suit, Value, evaluate, parse_cards,
    score_to_category,
};
use holdem_equity::holdem::{
    Board, EquityConfig, EquitySimulator, TiePolicy, simulate_equity, simulate_equity_str,
};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

#[test]
fn evaluate_ignores_card_order() {
    for hand in ["AsKsQsJsTs", "2c2d9h9sKd", "7h8h2c3dJs", "5c5d5h5sAc", "Ad2c3h4s5d"] {
        let mut hand = cards(hand);
        let expected = evaluate(&hand).unwrap();
        for _ in 0..hand.len() {
            hand.rotate_left(1);
            assert_eq!(expected, evaluate(&hand).unwrap());
            hand.swap(0, 3);
            assert_eq!(expected, evaluate(&hand).unwrap());
        }
        hand.reverse();
        assert_eq!(expected, evaluate(&hand).unwrap());
    }
}

#[test]
fn every_natural_quads_is_labelled_four_of_a_kind() {
    for value in Value::values() {
        let quads: Vec<Card> = Suit::suits()
            .into_iter()
            .map(|suit| Card::new(value, suit))
            .collect();
        for kicker in Card::all().into_iter().filter(|c| c.value != value) {
            let mut hand = quads.clone();
            hand.push(kicker);
            let score = evaluate(&hand).unwrap();
            assert!(score.value() <= 166, "{hand:?} scored {score}");
            assert!(score.value() <= 322);
            assert_eq!(HandCategory::FourOfAKind, score_to_category(score));
            assert_eq!("Four of a Kind", score.category().label());
        }
    }
}

#[test]
fn royal_flush_beats_every_lower_straight_flush() {
    for suit in Suit::suits() {
        let royal: Vec<Card> = [Value::Ace, Value::King, Value::Queen, Value::Jack, Value::Ten]
            .into_iter()
            .map(|v| Card::new(v, suit))
            .collect();
        let royal = evaluate(&royal).unwrap();
        assert_eq!(Score::ROYAL_FLUSH, royal);

        // Straight flushes topped by five (the wheel) up to king.
        for top in 3..12u8 {
            let straight_flush: Vec<Card> = (0..5)
                .map(|i| {
                    let v = if top == 3 && i == 4 {
                        Value::Ace
                    } else {
                        Value::from_u8(top - i)
                    };
                    Card::new(v, suit)
                })
                .collect();
            let score = evaluate(&straight_flush).unwrap();
            assert_eq!(HandCategory::StraightFlush, score.category());
            assert!(royal < score);
            assert!(royal.beats(score));
        }
    }
}

#[test]
fn unbeatable_hand_wins_every_trial() {
    // Four aces on the river. Nobody can match it.
    let result = simulate_equity(&cards("AhAd"), &cards("AcAsKd7c2h"), 1, Some(5_000)).unwrap();
    assert!(result.win_probability_percent >= 99.0);
    assert_eq!("Four of a Kind", result.current_hand_label());
}

#[test]
fn swapping_hero_and_opponent_sums_to_one_hundred() {
    let board = Board::new_from_str("9h8h2c").unwrap();
    let a = Hand::new_from_str("JhTh").unwrap();
    let b = Hand::new_from_str("9c9d").unwrap();
    let config = EquityConfig::new().with_trials(4_000).with_seed(2024);

    let a_result = EquitySimulator::new_with_opponents(a, board.clone(), vec![b], config.clone())
        .unwrap()
        .run()
        .unwrap();
    let b_result = EquitySimulator::new_with_opponents(b, board, vec![a], config)
        .unwrap()
        .run()
        .unwrap();

    assert_relative_eq!(
        100.0,
        a_result.outright_win_percent() + b_result.outright_win_percent() + a_result.tie_percent(),
        epsilon = 1e-9
    );
    assert_relative_eq!(
        100.0,
        a_result.win_probability_percent + b_result.win_probability_percent,
        epsilon = 1e-9
    );
}

#[test]
fn hero_card_on_board_is_rejected() {
    let err = simulate_equity(&cards("AhKd"), &cards("Ah7c2s"), 1, None).unwrap_err();
    assert_eq!(
        PokerError::DuplicateCard(Card::new(Value::Ace, Suit::Heart)),
        err
    );
    assert_eq!(ErrorKind::DuplicateCard, err.kind());
}

#[test]
fn aces_full_on_the_flop() {
    let result = simulate_equity(&cards("AhAd"), &cards("AcKhKd"), 1, Some(5_000)).unwrap();
    assert_eq!("Full House", result.current_hand_label());
    assert!(result.win_probability_percent > 95.0);
}

#[test]
fn seven_deuce_against_a_full_table() {
    let result = simulate_equity(&cards("2c7d"), &[], 8, Some(3_000)).unwrap();
    assert_eq!("N/A", result.current_hand_label());
    assert!(result.win_probability_percent < 15.0);
}

#[test]
fn string_entry_point_parses_loose_input() {
    let result = simulate_equity_str("ah 10h", "Jh, Qh, 2c", 2, Some(500)).unwrap();
    assert_eq!(500, result.trials());
    assert_eq!("High Card", result.current_hand_label());

    let err = simulate_equity_str("AhKx", "", 1, None).unwrap_err();
    assert_eq!(ErrorKind::Parse, err.kind());
}

#[test]
fn heads_up_tie_policies_agree() {
    let hero = Hand::new_from_str("AcKc").unwrap();
    let board = Board::new_from_str("QdJd2s").unwrap();
    let run = |policy| {
        EquitySimulator::new(
            hero,
            board.clone(),
            EquityConfig::new()
                .with_trials(2_000)
                .with_seed(5)
                .with_tie_policy(policy),
        )
        .unwrap()
        .run()
        .unwrap()
    };
    assert_eq!(
        run(TiePolicy::SplitAmongTied),
        run(TiePolicy::EvenSeatShare)
    );
}

#[test]
fn seeded_runs_repeat_and_report_their_seed() {
    let config = EquityConfig::new()
        .with_opponents(4)
        .with_trials(1_000)
        .with_seed(99);
    let a = holdem_equity::holdem::simulate_equity_with_config(&cards("QsQd"), &[], config.clone())
        .unwrap();
    let b = holdem_equity::holdem::simulate_equity_with_config(&cards("QsQd"), &[], config)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(99, a.seed);
}
