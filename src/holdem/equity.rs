use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicBool};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument, trace, warn};

use crate::core::{
    Card, CardBitSet, Deck, Hand, HandCategory, PokerError, Rankable, Score, hand_category_of,
    parse_cards,
};

use super::board::Board;
use super::config::{DEFAULT_TRIALS, EquityConfig, MAX_OPPONENTS};
use super::tally::Tally;

/// What a finished simulation found.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EquityResult {
    /// Chance the hero wins, counting ties as their share of the pot, 0 to
    /// 100.
    pub win_probability_percent: f64,
    /// What the hero holds with the cards known right now. None before there
    /// are five cards to make a hand from.
    pub current_hand: Option<HandCategory>,
    /// Raw counts behind the percentage.
    pub tally: Tally,
    /// Seed the run used. Feeding it back in reproduces the result.
    pub seed: u64,
}

impl EquityResult {
    /// Label for the current hand, or `"N/A"` when there isn't one yet.
    pub fn current_hand_label(&self) -> &'static str {
        self.current_hand.map_or("N/A", HandCategory::label)
    }

    pub fn trials(&self) -> u64 {
        self.tally.trials()
    }

    /// Percentage of trials the hero won outright.
    pub fn outright_win_percent(&self) -> f64 {
        self.percent_of(self.tally.wins())
    }

    /// Percentage of trials that ended in any kind of tie.
    pub fn tie_percent(&self) -> f64 {
        self.percent_of(self.tally.ties())
    }

    pub fn loss_percent(&self) -> f64 {
        self.percent_of(self.tally.losses())
    }

    /// One standard error of `win_probability_percent`, in percentage points.
    pub fn standard_error_percent(&self) -> f64 {
        let p = self.win_probability_percent / 100.0;
        (p * (1.0 - p) / self.trials() as f64).sqrt() * 100.0
    }

    fn percent_of(&self, count: u64) -> f64 {
        count as f64 / self.trials() as f64 * 100.0
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutcome {
    /// Every requested trial ran.
    Completed(EquityResult),
    /// Stopped early. No equity is reported for a partial run.
    Cancelled {
        trials_run: u64,
        trials_requested: usize,
    },
}

impl SimulationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The result, if the run finished.
    pub fn completed(self) -> Option<EquityResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Cancelled { .. } => None,
        }
    }
}

/// Monte carlo equity of one hero hand against some opponents.
///
/// All the input checking happens in the constructor, so once a simulator
/// exists every trial it runs is valid. Each run is a pure function of the
/// cards, the config, and the seed.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::Hand;
/// use holdem_equity::holdem::{Board, EquityConfig, EquitySimulator};
///
/// let hero = Hand::new_from_str("AhAd").unwrap();
/// let board = Board::new_from_str("AcKhKd").unwrap();
/// let config = EquityConfig::new().with_trials(2_000).with_seed(42);
///
/// let sim = EquitySimulator::new(hero, board, config).unwrap();
/// let result = sim.run().unwrap();
/// assert_eq!("Full House", result.current_hand_label());
/// assert!(result.win_probability_percent > 90.0);
/// ```
#[derive(Debug, Clone)]
pub struct EquitySimulator {
    hero: Hand,
    board: Board,
    /// Opponents whose hole cards are known. They take the first seats.
    known_opponents: Vec<Hand>,
    config: EquityConfig,
    /// 52 cards minus every known card. Copied fresh for each trial.
    deck: Deck,
    hero_cards: CardBitSet,
    board_cards: CardBitSet,
    current_hand: Option<HandCategory>,
}

impl EquitySimulator {
    /// Set up a simulation where every opponent is dealt random cards.
    pub fn new(hero: Hand, board: Board, config: EquityConfig) -> Result<Self, PokerError> {
        Self::new_with_opponents(hero, board, Vec::new(), config)
    }

    /// Set up a simulation where some opponents' hole cards are known.
    ///
    /// `config.num_opponents` is the total number of opponents. The known
    /// hands take the first seats and the rest are dealt at random.
    pub fn new_with_opponents(
        hero: Hand,
        board: Board,
        known_opponents: Vec<Hand>,
        config: EquityConfig,
    ) -> Result<Self, PokerError> {
        config.validate()?;
        if known_opponents.len() > config.num_opponents {
            return Err(PokerError::TooManyKnownOpponents {
                known: known_opponents.len(),
                seats: config.num_opponents,
            });
        }

        let mut deck = Deck::new();
        deck.remove_known(&hero.cards())?;
        deck.remove_known(board.cards())?;
        for opponent in &known_opponents {
            deck.remove_known(&opponent.cards())?;
        }

        let random_seats = config.num_opponents - known_opponents.len();
        let needed = random_seats * 2 + board.remaining();
        if needed > deck.len() {
            return Err(PokerError::InsufficientCards {
                requested: needed,
                remaining: deck.len(),
            });
        }

        let known: Vec<Card> = hero.iter().chain(board.cards().iter().copied()).collect();
        let current_hand = hand_category_of(&known)?;

        Ok(Self {
            hero_cards: hero.into(),
            board_cards: board.to_bit_set(),
            hero,
            board,
            known_opponents,
            config,
            deck,
            current_hand,
        })
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    pub fn hero(&self) -> Hand {
        self.hero
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The hero's hand category from the known cards alone.
    pub fn current_hand(&self) -> Option<HandCategory> {
        self.current_hand
    }

    /// Run every trial.
    pub fn run(&self) -> Result<EquityResult, PokerError> {
        let seed = self.pick_seed();
        let (tally, _) = self.run_batches(seed, None)?;
        Ok(self.finish(tally, seed))
    }

    /// Run every trial unless `cancel` gets set.
    ///
    /// The flag is checked before each batch of `config.batch_size` trials.
    /// Once it's seen the run stops and reports `Cancelled` with however many
    /// trials had finished.
    #[instrument(
        level = "debug",
        skip(self, cancel),
        fields(hero = %self.hero, board = %self.board, opponents = self.config.num_opponents)
    )]
    pub fn run_until(&self, cancel: &AtomicBool) -> Result<SimulationOutcome, PokerError> {
        let seed = self.pick_seed();
        let (tally, cancelled) = self.run_batches(seed, Some(cancel))?;
        if cancelled {
            warn!(
                trials_run = tally.trials(),
                trials_requested = self.config.trials,
                "Equity simulation cancelled"
            );
            return Ok(SimulationOutcome::Cancelled {
                trials_run: tally.trials(),
                trials_requested: self.config.trials,
            });
        }
        Ok(SimulationOutcome::Completed(self.finish(tally, seed)))
    }

    fn pick_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(rand::random::<u64>)
    }

    fn finish(&self, tally: Tally, seed: u64) -> EquityResult {
        let win_probability_percent = tally.equity_percent();
        debug!(
            hero = %self.hero,
            board = %self.board,
            trials = tally.trials(),
            wins = tally.wins(),
            ties = tally.ties(),
            equity = win_probability_percent,
            "Equity simulation finished"
        );
        EquityResult {
            win_probability_percent,
            current_hand: self.current_hand,
            tally,
            seed,
        }
    }

    /// Run the batches, stopping early if `cancel` is set. Returns the
    /// combined tally and whether the run was cut short.
    fn run_batches(
        &self,
        seed: u64,
        cancel: Option<&AtomicBool>,
    ) -> Result<(Tally, bool), PokerError> {
        debug!(
            hero = %self.hero,
            board = %self.board,
            opponents = self.config.num_opponents,
            trials = self.config.trials,
            seed,
            "Starting equity simulation"
        );

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return self.run_batches_parallel(seed, cancel);
            }
        }

        let mut tally = Tally::new();
        for idx in 0..self.config.num_batches() {
            if is_cancelled(cancel) {
                return Ok((tally, true));
            }
            tally += self.run_batch(idx, seed)?;
            trace!(batch = idx, trials_run = tally.trials(), "Finished batch");
        }
        Ok((tally, false))
    }

    /// Map every batch onto the rayon pool and reduce the tallies.
    ///
    /// Batches that start after `cancel` is set are skipped, so a cancelled
    /// run can have finished any subset of them.
    #[cfg(feature = "parallel")]
    fn run_batches_parallel(
        &self,
        seed: u64,
        cancel: Option<&AtomicBool>,
    ) -> Result<(Tally, bool), PokerError> {
        use rayon::prelude::*;

        let batches: Vec<Option<Tally>> = (0..self.config.num_batches())
            .into_par_iter()
            .map(|idx| {
                if is_cancelled(cancel) {
                    Ok(None)
                } else {
                    self.run_batch(idx, seed).map(Some)
                }
            })
            .collect::<Result<_, PokerError>>()?;
        let cancelled = batches.iter().any(Option::is_none);
        Ok((batches.into_iter().flatten().sum(), cancelled))
    }

    /// Every batch has its own rng seeded from the run seed and its index, so
    /// the result doesn't depend on which thread ran it or in what order.
    fn run_batch(&self, idx: usize, seed: u64) -> Result<Tally, PokerError> {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(idx as u64));
        let mut tally = Tally::new();
        for _ in 0..self.config.batch_trials(idx) {
            self.run_trial(&mut rng, &mut tally)?;
        }
        Ok(tally)
    }

    /// Deal out one hand to showdown and record how the hero did.
    fn run_trial<R: Rng>(&self, rng: &mut R, tally: &mut Tally) -> Result<(), PokerError> {
        let mut deck = self.deck;
        let num_opponents = self.config.num_opponents;

        let mut opponents = [CardBitSet::new(); MAX_OPPONENTS];
        for (seat, hole) in opponents.iter_mut().take(num_opponents).enumerate() {
            *hole = match self.known_opponents.get(seat) {
                Some(known) => (*known).into(),
                None => deck.draw_random(rng, 2)?.into_iter().collect(),
            };
        }

        let runout: CardBitSet = deck
            .draw_random(rng, self.board.remaining())?
            .into_iter()
            .collect();
        let full_board = self.board_cards | runout;

        let hero_score = Score::from((self.hero_cards | full_board).rank());

        let mut best_opponent = Score::WORST;
        let mut at_best = 0;
        for hole in &opponents[..num_opponents] {
            let score = Score::from((*hole | full_board).rank());
            match score.cmp(&best_opponent) {
                Ordering::Less => {
                    best_opponent = score;
                    at_best = 1;
                }
                Ordering::Equal => at_best += 1,
                Ordering::Greater => {}
            }
        }

        match hero_score.cmp(&best_opponent) {
            Ordering::Less => tally.record_win(),
            Ordering::Equal => tally.record_tie(
                self.config
                    .tie_policy
                    .split_ways(at_best, num_opponents),
            ),
            Ordering::Greater => tally.record_loss(),
        }
        Ok(())
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(atomic::Ordering::Relaxed))
}

/// Estimate the hero's equity against `num_opponents` random hands.
///
/// `trials` defaults to 1500. Every input problem is reported before any
/// trial runs: a hero that isn't two cards, more than five board cards, the
/// same card twice anywhere, or opponents outside `1..=9`.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::parse_cards;
/// use holdem_equity::holdem::simulate_equity;
///
/// let hero = parse_cards("AhAd").unwrap();
/// let board = parse_cards("AcKhKd").unwrap();
/// let result = simulate_equity(&hero, &board, 1, Some(1_000)).unwrap();
/// assert_eq!("Full House", result.current_hand_label());
///
/// // A hole card can't also be on the board.
/// let board = parse_cards("AhKhKd").unwrap();
/// assert!(simulate_equity(&hero, &board, 1, None).is_err());
/// ```
pub fn simulate_equity(
    hero_hole: &[Card],
    known_board: &[Card],
    num_opponents: usize,
    trials: Option<usize>,
) -> Result<EquityResult, PokerError> {
    let config = EquityConfig::new()
        .with_opponents(num_opponents)
        .with_trials(trials.unwrap_or(DEFAULT_TRIALS));
    simulate_equity_with_config(hero_hole, known_board, config)
}

/// `simulate_equity` with full control over the config.
pub fn simulate_equity_with_config(
    hero_hole: &[Card],
    known_board: &[Card],
    config: EquityConfig,
) -> Result<EquityResult, PokerError> {
    let hero = Hand::from_slice(hero_hole)?;
    let board = Board::from_cards(known_board)?;
    EquitySimulator::new(hero, board, config)?.run()
}

/// Parse card strings such as `"AhKd"` and `"Ac Kh Kd"`, then simulate.
///
/// A card that doesn't parse fails the whole call before anything runs.
pub fn simulate_equity_str(
    hero_hole: &str,
    known_board: &str,
    num_opponents: usize,
    trials: Option<usize>,
) -> Result<EquityResult, PokerError> {
    let hero = parse_cards(hero_hole)?;
    let board = parse_cards(known_board)?;
    simulate_equity(&hero, &board, num_opponents, trials)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::{ErrorKind, Suit, Value};
    use crate::holdem::TiePolicy;

    fn seeded(opponents: usize, trials: usize, seed: u64) -> EquityConfig {
        EquityConfig::new()
            .with_opponents(opponents)
            .with_trials(trials)
            .with_seed(seed)
    }

    fn sim(hero: &str, board: &str, config: EquityConfig) -> EquitySimulator {
        EquitySimulator::new(
            Hand::new_from_str(hero).unwrap(),
            Board::new_from_str(board).unwrap(),
            config,
        )
        .unwrap()
    }

    #[test_log::test]
    fn test_aces_full_on_flop() {
        let result = sim("AhAd", "AcKhKd", seeded(1, 5_000, 42)).run().unwrap();
        assert_eq!(Some(HandCategory::FullHouse), result.current_hand);
        assert_eq!("Full House", result.current_hand_label());
        assert!(result.win_probability_percent > 95.0);
        assert_eq!(5_000, result.trials());
    }

    #[test]
    fn test_unbeatable_river() {
        // Quad aces on a board with no straight flush possible.
        let result = sim("AhAd", "AcAsKd7c2h", seeded(1, 5_000, 3)).run().unwrap();
        assert_eq!(Some(HandCategory::FourOfAKind), result.current_hand);
        assert!(result.win_probability_percent >= 99.0);
    }

    #[test]
    fn test_seven_deuce_against_a_full_table() {
        let result = sim("2c7d", "", seeded(8, 3_000, 11)).run().unwrap();
        assert_eq!(None, result.current_hand);
        assert_eq!("N/A", result.current_hand_label());
        assert!(result.win_probability_percent < 15.0);
        assert!(result.win_probability_percent > 0.0);
    }

    #[test]
    fn test_board_plays_is_always_a_tie() {
        // Royal flush on the board, nobody can do better.
        let result = sim("2c3d", "AsKsQsJsTs", seeded(3, 500, 5)).run().unwrap();
        assert_eq!(Some(HandCategory::RoyalFlush), result.current_hand);
        assert_eq!(500, result.tally.ties());
        // Four way split every time.
        assert_relative_eq!(25.0, result.win_probability_percent, epsilon = 1e-9);
    }

    #[test]
    fn test_tie_policies_differ_on_partial_splits() {
        // Hero and the known opponent both make broadway. The random
        // opponent only joins in when dealt one of the last two aces.
        let hero = Hand::new_from_str("Ah2c").unwrap();
        let board = Board::new_from_str("KdQdJsTc3h").unwrap();
        let tied = Hand::new_from_str("Ac4c").unwrap();
        let config = seeded(2, 200, 9);

        let split = EquitySimulator::new_with_opponents(
            hero,
            board.clone(),
            vec![tied],
            config.clone(),
        )
        .unwrap()
        .run()
        .unwrap();
        let even = EquitySimulator::new_with_opponents(
            hero,
            board,
            vec![tied],
            config.with_tie_policy(TiePolicy::EvenSeatShare),
        )
        .unwrap()
        .run()
        .unwrap();

        assert_eq!(split.tally.ties(), even.tally.ties());
        assert!(split.tally.ties() > 0);
        assert!(split.win_probability_percent > even.win_probability_percent);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = sim("QsJs", "Ts9d2c", seeded(3, 1_200, 77)).run().unwrap();
        let b = sim("QsJs", "Ts9d2c", seeded(3, 1_200, 77)).run().unwrap();
        assert_eq!(a, b);
        assert_eq!(77, a.seed);
    }

    #[test]
    fn test_batch_size_changes_nothing_but_the_checkpoints() {
        let big = sim("8h8d", "", seeded(2, 1_000, 5).with_batch_size(1_000))
            .run()
            .unwrap();
        let small = sim("8h8d", "", seeded(2, 1_000, 5).with_batch_size(100))
            .run()
            .unwrap();
        assert_eq!(big.trials(), small.trials());
        // Different rng streams, same distribution.
        assert!((big.win_probability_percent - small.win_probability_percent).abs() < 10.0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = seeded(4, 2_000, 1234).with_batch_size(100);
        let sequential = sim("KsKc", "7h", config.clone()).run();
        let parallel = sim("KsKc", "7h", config.with_parallel(true)).run();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_heads_up_swap_sums_to_one_hundred() {
        let a = Hand::new_from_str("AhKh").unwrap();
        let b = Hand::new_from_str("QsQd").unwrap();
        let config = seeded(1, 3_000, 21);

        let a_result =
            EquitySimulator::new_with_opponents(a, Board::new(), vec![b], config.clone())
                .unwrap()
                .run()
                .unwrap();
        let b_result = EquitySimulator::new_with_opponents(b, Board::new(), vec![a], config)
            .unwrap()
            .run()
            .unwrap();

        // The same seed deals the same run outs, so this is exact.
        assert_eq!(a_result.tally.wins(), b_result.tally.losses());
        assert_eq!(a_result.tally.ties(), b_result.tally.ties());
        assert_relative_eq!(
            100.0,
            a_result.outright_win_percent()
                + b_result.outright_win_percent()
                + a_result.tie_percent(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            100.0,
            a_result.win_probability_percent + b_result.win_probability_percent,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_cancel_before_start() {
        let cancel = AtomicBool::new(true);
        let outcome = sim("AhKh", "", seeded(2, 1_000, 1))
            .run_until(&cancel)
            .unwrap();
        assert_eq!(
            SimulationOutcome::Cancelled {
                trials_run: 0,
                trials_requested: 1_000
            },
            outcome
        );
        assert!(!outcome.is_completed());
        assert_eq!(None, outcome.completed());
    }

    #[test]
    fn test_run_until_completes() {
        let cancel = AtomicBool::new(false);
        let outcome = sim("AhKh", "", seeded(2, 1_000, 1))
            .run_until(&cancel)
            .unwrap();
        assert!(outcome.is_completed());
        let result = outcome.completed().unwrap();
        assert_eq!(1_000, result.trials());
        assert_eq!(
            sim("AhKh", "", seeded(2, 1_000, 1)).run().unwrap(),
            result
        );
    }

    #[test]
    fn test_hero_card_on_board() {
        let err = simulate_equity_str("AhKd", "Ah7c2s", 1, Some(10)).unwrap_err();
        assert_eq!(
            PokerError::DuplicateCard(Card::new(Value::Ace, Suit::Heart)),
            err
        );
        assert_eq!(ErrorKind::DuplicateCard, err.kind());
    }

    #[test]
    fn test_known_opponent_overlapping_hero() {
        let err = EquitySimulator::new_with_opponents(
            Hand::new_from_str("AhKd").unwrap(),
            Board::new(),
            vec![Hand::new_from_str("Kd2c").unwrap()],
            seeded(1, 10, 1),
        )
        .unwrap_err();
        assert_eq!(ErrorKind::DuplicateCard, err.kind());
    }

    #[test]
    fn test_input_errors() {
        assert_eq!(
            ErrorKind::Parse,
            simulate_equity_str("AhKx", "", 1, None).unwrap_err().kind()
        );
        assert_eq!(
            Err(PokerError::NoOpponents),
            simulate_equity_str("AhKd", "", 0, None)
        );
        assert_eq!(
            Err(PokerError::TooManyOpponents(12)),
            simulate_equity_str("AhKd", "", 12, None)
        );
        assert_eq!(
            Err(PokerError::ZeroTrials),
            simulate_equity_str("AhKd", "", 1, Some(0))
        );
        assert_eq!(
            Err(PokerError::BoardTooLarge(6)),
            simulate_equity_str("AhKd", "2c3c4c5c6c7c", 1, None)
        );
        assert_eq!(
            ErrorKind::InvalidArgument,
            simulate_equity_str("AhKdQs", "", 1, None).unwrap_err().kind()
        );
        assert_eq!(
            Err(PokerError::TooManyKnownOpponents { known: 2, seats: 1 }),
            EquitySimulator::new_with_opponents(
                Hand::new_from_str("AhKd").unwrap(),
                Board::new(),
                vec![
                    Hand::new_from_str("2c2d").unwrap(),
                    Hand::new_from_str("3c3d").unwrap()
                ],
                seeded(1, 10, 1),
            )
            .map(|_| ())
        );
    }

    #[test]
    fn test_default_trials() {
        let hero = parse_cards("9c9d").unwrap();
        let result = simulate_equity(&hero, &[], 1, None).unwrap();
        assert_eq!(DEFAULT_TRIALS as u64, result.trials());
    }

    #[test]
    fn test_percentages_add_up() {
        let result = sim("Td9d", "8d7c2h", seeded(3, 2_000, 8)).run().unwrap();
        assert_relative_eq!(
            100.0,
            result.outright_win_percent() + result.tie_percent() + result.loss_percent(),
            epsilon = 1e-9
        );
        assert!(result.win_probability_percent >= result.outright_win_percent());
        let se = result.standard_error_percent();
        assert!(se > 0.0 && se < 1.5, "{se}");
    }
}
