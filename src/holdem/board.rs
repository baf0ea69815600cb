use std::fmt;

use crate::core::{Card, CardBitSet, PokerError, parse_cards};

/// Most community cards a holdem board can hold.
pub const MAX_BOARD_CARDS: usize = 5;

/// How far into the hand we are, judged by the community cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// The street a board of `num_cards` is on.
    ///
    /// One or two cards isn't a real street, so that's None.
    pub fn from_board_size(num_cards: usize) -> Option<Self> {
        match num_cards {
            0 => Some(Self::Preflop),
            3 => Some(Self::Flop),
            4 => Some(Self::Turn),
            5 => Some(Self::River),
            _ => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Preflop => "Pre-flop",
            Self::Flop => "Flop",
            Self::Turn => "Turn",
            Self::River => "River",
        })
    }
}

/// The community cards, dealt in order and never taken back.
///
/// Holds at most five distinct cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from already dealt cards.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::parse_cards;
    /// use holdem_equity::holdem::{Board, Street};
    ///
    /// let board = Board::from_cards(&parse_cards("AcKhKd").unwrap()).unwrap();
    /// assert_eq!(Some(Street::Flop), board.street());
    /// assert_eq!(2, board.remaining());
    /// ```
    pub fn from_cards(cards: &[Card]) -> Result<Self, PokerError> {
        if cards.len() > MAX_BOARD_CARDS {
            return Err(PokerError::BoardTooLarge(cards.len()));
        }
        let mut board = Self::new();
        for &card in cards {
            board.push(card)?;
        }
        Ok(board)
    }

    pub fn new_from_str(board_string: &str) -> Result<Self, PokerError> {
        Self::from_cards(&parse_cards(board_string)?)
    }

    /// Deal one more card onto the board.
    pub fn push(&mut self, card: Card) -> Result<(), PokerError> {
        if self.cards.len() >= MAX_BOARD_CARDS {
            return Err(PokerError::BoardTooLarge(self.cards.len() + 1));
        }
        if self.cards.contains(&card) {
            return Err(PokerError::DuplicateCard(card));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == MAX_BOARD_CARDS
    }

    /// How many cards are still to come.
    pub fn remaining(&self) -> usize {
        MAX_BOARD_CARDS - self.cards.len()
    }

    pub fn street(&self) -> Option<Street> {
        Street::from_board_size(self.cards.len())
    }

    pub fn to_bit_set(&self) -> CardBitSet {
        self.cards.iter().copied().collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cards {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
