use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::card::Card;

/// Mask with a bit set for every one of the 52 cards.
const FULL_DECK: u64 = (1 << 52) - 1;

/// A set of cards stored as a single `u64`.
///
/// Each card maps to bit `Card::index()`. That makes membership, insertion,
/// and removal O(1) and copying a whole deck a single word copy.
///
/// `CardBitSet::new()` is empty while `CardBitSet::default()` holds all 52
/// cards, since a full deck is by far the most common starting point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    cards: u64,
}

impl CardBitSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { cards: 0 }
    }

    /// Add a card. Returns true if the card was not already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.index();
        let added = self.cards & bit == 0;
        self.cards |= bit;
        added
    }

    /// Remove a card. Returns true if the card was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.index();
        let removed = self.cards & bit != 0;
        self.cards &= !bit;
        removed
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards & (1u64 << card.index()) != 0
    }

    /// How many cards are in the set.
    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    /// Get the `n`th card in index order, if there are that many.
    pub fn nth(&self, n: usize) -> Option<Card> {
        if n >= self.count() {
            return None;
        }
        let mut remaining = self.cards;
        // Drop the lowest n set bits then the answer is the lowest one left.
        for _ in 0..n {
            remaining &= remaining - 1;
        }
        Card::from_index(remaining.trailing_zeros() as u8)
    }

    pub fn iter(&self) -> CardBitSetIter {
        CardBitSetIter { cards: self.cards }
    }
}

impl Default for CardBitSet {
    /// A set holding every card in the deck.
    fn default() -> Self {
        Self { cards: FULL_DECK }
    }
}

impl fmt::Debug for CardBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|c| c.to_string())).finish()
    }
}

impl fmt::Display for CardBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.iter() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl BitOr for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            cards: self.cards | rhs.cards,
        }
    }
}

impl BitOrAssign for CardBitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.cards |= rhs.cards;
    }
}

impl BitAnd for CardBitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            cards: self.cards & rhs.cards,
        }
    }
}

impl BitAndAssign for CardBitSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.cards &= rhs.cards;
    }
}

impl BitXor for CardBitSet {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self {
            cards: self.cards ^ rhs.cards,
        }
    }
}

impl BitXorAssign for CardBitSet {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.cards ^= rhs.cards;
    }
}

impl Not for CardBitSet {
    type Output = Self;

    /// Every card not in this set. Bits past the 52nd stay clear.
    fn not(self) -> Self {
        Self {
            cards: !self.cards & FULL_DECK,
        }
    }
}

impl From<Card> for CardBitSet {
    fn from(card: Card) -> Self {
        let mut set = Self::new();
        set.insert(card);
        set
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = Self::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// Iterates cards of a `CardBitSet` from the lowest index up.
#[derive(Debug, Clone)]
pub struct CardBitSetIter {
    cards: u64,
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.cards == 0 {
            return None;
        }
        let idx = self.cards.trailing_zeros();
        self.cards &= self.cards - 1;
        Card::from_index(idx as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cards.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CardBitSetIter {}

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> CardBitSetIter {
        self.iter()
    }
}

impl IntoIterator for &CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> CardBitSetIter {
        self.iter()
    }
}
