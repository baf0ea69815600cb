//! This is the core module. It exports the non-holdem
//! related code.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// Errors for everything in the crate.
mod error;
/// Export the error and its coarse kind.
pub use self::error::{ErrorKind, PokerError};

/// A 52 bit set of cards.
mod card_bit_set;
/// Export `CardBitSet`
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Hole cards and card string parsing.
mod hand;
/// Export `Hand` and the token parser.
pub use self::hand::{Hand, parse_cards};

/// Bit twiddling best hand ranking code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{Rank, Rankable};

/// Scores, categories, and the public evaluator.
mod score;
/// Export the score and the category label functions.
pub use self::score::{
    DISTINCT_SCORES, HandCategory, Score, evaluate, hand_category_of, score_to_category,
};
