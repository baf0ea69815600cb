use rand::Rng;

use super::card::Card;
use super::card_bit_set::CardBitSet;
use super::error::PokerError;

/// Deck struct that can tell quickly if a card is in the deck
///
/// Backed by a `CardBitSet`, so checking if a card is still available,
/// removing it, and copying the whole deck are all constant time. A `Deck`
/// is `Copy`; the simulator prepares one deck with the known cards removed
/// and copies it at the start of each trial.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::{Card, Deck, Suit, Value};
///
/// let mut deck = Deck::new();
/// let ace = Card::new(Value::Ace, Suit::Spade);
/// deck.remove_known(&[ace]).unwrap();
/// assert!(!deck.contains(ace));
/// assert_eq!(51, deck.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deck {
    cards: CardBitSet,
}

impl Deck {
    /// A full 52 card deck.
    pub fn new() -> Self {
        Self {
            cards: CardBitSet::default(),
        }
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(card)
    }

    /// Given a card remove it from the deck if it is present.
    pub fn remove(&mut self, card: Card) -> bool {
        self.cards.remove(card)
    }

    /// Remove every card in `cards`.
    ///
    /// Fails with `DuplicateCard` on the first card that isn't in the deck.
    /// That catches a card that was already dealt as well as the same card
    /// listed twice. On failure the deck is left untouched.
    pub fn remove_known(&mut self, cards: &[Card]) -> Result<(), PokerError> {
        let mut remaining = self.cards;
        for &card in cards {
            if !remaining.remove(card) {
                return Err(PokerError::DuplicateCard(card));
            }
        }
        self.cards = remaining;
        Ok(())
    }

    /// Remove one card chosen uniformly at random.
    ///
    /// Returns None once the deck is empty.
    pub fn draw_one<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let card = self.cards.nth(rng.random_range(0..len))?;
        self.cards.remove(card);
        Some(card)
    }

    /// Remove and return `n` cards chosen uniformly at random without
    /// replacement.
    ///
    /// Fails with `InsufficientCards` if fewer than `n` cards remain, in
    /// which case nothing is drawn.
    pub fn draw_random<R: Rng>(
        &mut self,
        rng: &mut R,
        n: usize,
    ) -> Result<Vec<Card>, PokerError> {
        let remaining = self.len();
        if n > remaining {
            return Err(PokerError::InsufficientCards {
                requested: n,
                remaining,
            });
        }
        Ok((0..n).filter_map(|_| self.draw_one(rng)).collect())
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.cards.count()
    }

    /// Have all cards been dealt?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards still available.
    pub fn cards(&self) -> CardBitSet {
        self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl From<CardBitSet> for Deck {
    fn from(cards: CardBitSet) -> Self {
        Self { cards }
    }
}

impl From<Deck> for CardBitSet {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}
