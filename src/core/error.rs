use thiserror::Error;

use super::card::Card;

/// Coarse buckets for `PokerError`.
///
/// Callers that only care about what went wrong in broad strokes (bad card
/// text, a card used twice, not enough cards, or a bad argument) can match on
/// this instead of every variant.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ErrorKind {
    Parse,
    DuplicateCard,
    InsufficientCards,
    InvalidArgument,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum PokerError {
    #[error("Unable to parse value: {0:?}")]
    UnexpectedValueChar(char),
    #[error("Unable to parse suit: {0:?}")]
    UnexpectedSuitChar(char),
    #[error("Card tokens must be a value char followed by a suit char, got {0:?}")]
    InvalidCardToken(String),

    #[error("Card {0} is used more than once")]
    DuplicateCard(Card),

    #[error("Asked to draw {requested} cards but only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },

    #[error("Expected {expected} cards, got {got}")]
    WrongCardCount { expected: &'static str, got: usize },
    #[error("A board holds at most 5 cards, got {0}")]
    BoardTooLarge(usize),
    #[error("At least one opponent is required")]
    NoOpponents,
    #[error("At most 9 opponents are supported, got {0}")]
    TooManyOpponents(usize),
    #[error("{known} opponent hands were given for {seats} opponent seats")]
    TooManyKnownOpponents { known: usize, seats: usize },
    #[error("At least one trial is required")]
    ZeroTrials,
    #[error("Batch size must be greater than 0")]
    ZeroBatchSize,
}

impl PokerError {
    /// Which bucket this error falls in.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedValueChar(_)
            | Self::UnexpectedSuitChar(_)
            | Self::InvalidCardToken(_) => ErrorKind::Parse,
            Self::DuplicateCard(_) => ErrorKind::DuplicateCard,
            Self::InsufficientCards { .. } => ErrorKind::InsufficientCards,
            Self::WrongCardCount { .. }
            | Self::BoardTooLarge(_)
            | Self::NoOpponents
            | Self::TooManyOpponents(_)
            | Self::TooManyKnownOpponents { .. }
            | Self::ZeroTrials
            | Self::ZeroBatchSize => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Suit, Value};

    #[test]
    fn test_kinds() {
        assert_eq!(ErrorKind::Parse, PokerError::UnexpectedSuitChar('x').kind());
        assert_eq!(
            ErrorKind::DuplicateCard,
            PokerError::DuplicateCard(Card::new(Value::Ace, Suit::Spade)).kind()
        );
        assert_eq!(
            ErrorKind::InsufficientCards,
            PokerError::InsufficientCards {
                requested: 3,
                remaining: 1
            }
            .kind()
        );
        assert_eq!(ErrorKind::InvalidArgument, PokerError::NoOpponents.kind());
        assert_eq!(ErrorKind::InvalidArgument, PokerError::BoardTooLarge(6).kind());
    }

    #[test]
    fn test_display_names_card() {
        let err = PokerError::DuplicateCard(Card::new(Value::King, Suit::Diamond));
        assert_eq!("Card Kd is used more than once", err.to_string());
    }
}
