use std::fmt;

use super::card::Card;
use super::card_bit_set::CardBitSet;
use super::error::PokerError;

/// Two hole cards held by one player.
///
/// The pair is ordered the way it was dealt or typed; nothing about ranking
/// depends on that order. Both cards are always distinct.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand {
    cards: [Card; 2],
}

impl Hand {
    /// Create a hand from two cards.
    ///
    /// Fails with `DuplicateCard` if both are the same card.
    pub fn new(first: Card, second: Card) -> Result<Self, PokerError> {
        if first == second {
            return Err(PokerError::DuplicateCard(first));
        }
        Ok(Self {
            cards: [first, second],
        })
    }

    /// Build a hand from a slice that must hold exactly two cards.
    pub fn from_slice(cards: &[Card]) -> Result<Self, PokerError> {
        match cards {
            [first, second] => Self::new(*first, *second),
            _ => Err(PokerError::WrongCardCount {
                expected: "exactly 2 hole",
                got: cards.len(),
            }),
        }
    }

    /// From a str create a new hand.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Hand;
    /// let hand = Hand::new_from_str("AdKd").unwrap();
    /// ```
    ///
    /// Anything that can't be parsed, or anything other than two cards,
    /// will return an Error.
    ///
    /// ```
    /// use holdem_equity::core::Hand;
    /// assert!(Hand::new_from_str("AdKdQd").is_err());
    /// assert!(Hand::new_from_str("AdAd").is_err());
    /// ```
    pub fn new_from_str(hand_string: &str) -> Result<Self, PokerError> {
        Self::from_slice(&parse_cards(hand_string)?)
    }

    pub fn cards(&self) -> [Card; 2] {
        self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> {
        self.cards.into_iter()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.cards[0], self.cards[1])
    }
}

impl From<Hand> for CardBitSet {
    fn from(hand: Hand) -> Self {
        hand.iter().collect()
    }
}

/// Parse a run of card tokens.
///
/// Tokens are a value char then a suit char, in any case. Whitespace and
/// commas between tokens are ignored and `10` is read as `T`, so
/// `"AhKd"`, `"ah kd"`, and `"Ah,Kd"` all give the same two cards.
///
/// This doesn't check for repeats; that's left to whatever consumes the
/// cards.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::{Card, Suit, Value, parse_cards};
///
/// let cards = parse_cards("10h Jh").unwrap();
/// assert_eq!(
///     vec![
///         Card::new(Value::Ten, Suit::Heart),
///         Card::new(Value::Jack, Suit::Heart)
///     ],
///     cards
/// );
/// assert!(parse_cards("AhK").is_err());
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, PokerError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect::<String>()
        .replace("10", "T");
    let chars: Vec<char> = cleaned.chars().collect();
    chars
        .chunks(2)
        .map(|token| Card::try_from(token.iter().collect::<String>().as_str()))
        .collect()
}
