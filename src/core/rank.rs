use super::card::Card;
use super::card_bit_set::CardBitSet;

/// The category of a hand plus everything needed to break ties inside it.
///
/// Higher is stronger. The u32 payload packs the deciding values as bit sets
/// over `Value` (bit 0 is a two, bit 12 an ace). Where a hand has a major and
/// a minor part, like the trips and the pair of a full house, the major part
/// is shifted up 13 bits so it always dominates the comparison. Straights
/// carry the index of their top card, 0 being the wheel.
///
/// `Score` converts this to the compact lower-is-stronger form used
/// everywhere outside of this module.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum Rank {
    /// Nothing matches.
    HighCard(u32),
    /// One card matches another.
    OnePair(u32),
    /// Two different pairs.
    TwoPair(u32),
    /// Three of the same value.
    ThreeOfAKind(u32),
    /// Five cards in a sequence.
    Straight(u32),
    /// Five cards of the same suit.
    Flush(u32),
    /// Three of one value and two of another.
    FullHouse(u32),
    /// Four of the same value.
    FourOfAKind(u32),
    /// Five cards in a sequence all of the same suit. `StraightFlush(9)` is
    /// the royal flush.
    StraightFlush(u32),
}

/// Bit mask for the wheel (Ace, two, three, four, five)
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Given a bit set of values find the highest straight in it.
///
/// Returns the index of the straight's top card minus three, so the wheel
/// (topped by the five) is 0 and broadway is 9, or None if there's no
/// straight.
fn rank_straight(value_set: u32) -> Option<u32> {
    // And the set with itself shifted 1..=4 places. Only bits that start a
    // run of five survive. For example:
    //
    //       0000111111100
    //       0001111111000
    //       0011111110000
    //       0111111100000
    //       1111111000000
    //       -------------
    //       0000111000000
    let runs =
        value_set & (value_set << 1) & (value_set << 2) & (value_set << 3) & (value_set << 4);
    let idx = runs.leading_zeros();
    if idx < 32 {
        Some(32 - 4 - idx)
    } else if value_set & WHEEL == WHEEL {
        Some(0)
    } else {
        None
    }
}

/// Keep only the most significant bit.
fn keep_highest(values: u32) -> u32 {
    1 << (32 - values.leading_zeros() - 1)
}

/// Keep the N most significant bits by clearing the lowest ones.
fn keep_n(values: u32, to_keep: u32) -> u32 {
    let mut result = values;
    while result.count_ones() > to_keep {
        result &= result - 1;
    }
    result
}

/// Value bit sets gathered from a group of cards in a single pass.
#[derive(Debug, Default)]
struct ValueCounts {
    /// Every value present.
    value_set: u32,
    /// `count_to_value[n]` is the set of values seen exactly n times.
    count_to_value: [u32; 5],
    /// Values present per suit.
    suit_value_sets: [u32; 4],
}

impl ValueCounts {
    fn from_cards(cards: impl Iterator<Item = Card>) -> Self {
        let mut value_to_count = [0u8; 13];
        let mut counts = Self::default();

        for c in cards {
            let v = c.value as u32;
            counts.value_set |= 1 << v;
            counts.suit_value_sets[c.suit as usize] |= 1 << v;
            value_to_count[v as usize] += 1;
        }

        // Rotate value => count into count => values.
        for (value, &count) in value_to_count.iter().enumerate() {
            counts.count_to_value[count as usize] |= 1 << value;
        }
        counts
    }

    /// The suited values of a suit holding five or more cards.
    fn flush_values(&self) -> Option<u32> {
        self.suit_value_sets
            .iter()
            .copied()
            .find(|sv| sv.count_ones() >= 5)
    }
}

/// Anything that can hand over its cards can be ranked.
///
/// There are implementations for card slices, `Vec<Card>`, and `CardBitSet`.
pub trait Rankable {
    /// The cards to rank.
    fn cards(&self) -> impl Iterator<Item = Card>;

    /// Find the best five card hand.
    ///
    /// This works on five or more cards (specifically on seven card holdem
    /// hands) without trying every subset: the best hand of each category is
    /// read straight off the value bit sets.
    ///
    /// # Examples
    /// ```
    /// use holdem_equity::core::{Rank, Rankable, parse_cards};
    ///
    /// let rank = parse_cards("2h2d8d8sKd6sTh").unwrap().rank();
    /// assert!(Rank::TwoPair(0) <= rank);
    /// assert!(Rank::TwoPair(u32::MAX) >= rank);
    /// ```
    fn rank(&self) -> Rank {
        let counts = ValueCounts::from_cards(self.cards());
        let value_set = counts.value_set;
        let [_, _, pairs, sets, quads] = counts.count_to_value;

        if let Some(suited) = counts.flush_values() {
            // With seven cards a flush can't share the table with quads or a
            // full house, so checking it first is safe.
            match rank_straight(suited) {
                Some(top) => Rank::StraightFlush(top),
                None => Rank::Flush(keep_n(suited, 5)),
            }
        } else if quads != 0 {
            let kicker = keep_highest(value_set ^ quads);
            Rank::FourOfAKind((quads << 13) | kicker)
        } else if sets.count_ones() == 2 {
            // Two sets. The lower one plays as the pair.
            let set = keep_highest(sets);
            Rank::FullHouse((set << 13) | (sets ^ set))
        } else if sets != 0 && pairs != 0 {
            Rank::FullHouse((sets << 13) | keep_highest(pairs))
        } else if let Some(top) = rank_straight(value_set) {
            Rank::Straight(top)
        } else if sets != 0 {
            Rank::ThreeOfAKind((sets << 13) | keep_n(value_set ^ sets, 2))
        } else if pairs.count_ones() >= 2 {
            // Three pairs is possible with seven cards. The third pair can
            // still be the kicker.
            let top_pairs = keep_n(pairs, 2);
            Rank::TwoPair((top_pairs << 13) | keep_highest(value_set ^ top_pairs))
        } else if pairs != 0 {
            Rank::OnePair((pairs << 13) | keep_n(value_set ^ pairs, 3))
        } else {
            Rank::HighCard(keep_n(value_set, 5))
        }
    }

    /// Rank exactly five cards.
    ///
    /// Faster than `rank` when the hand is known to be five cards since the
    /// number of distinct values alone narrows down the category.
    fn rank_five(&self) -> Rank {
        let counts = ValueCounts::from_cards(self.cards());
        let value_set = counts.value_set;
        let [_, _, pairs, sets, quads] = counts.count_to_value;

        match value_set.count_ones() {
            5 => {
                let is_flush = counts.flush_values().is_some();
                match (rank_straight(value_set), is_flush) {
                    (None, false) => Rank::HighCard(value_set),
                    (Some(top), false) => Rank::Straight(top),
                    (None, true) => Rank::Flush(value_set),
                    (Some(top), true) => Rank::StraightFlush(top),
                }
            }
            4 => Rank::OnePair((pairs << 13) | (value_set ^ pairs)),
            3 if sets != 0 => Rank::ThreeOfAKind((sets << 13) | (value_set ^ sets)),
            3 => Rank::TwoPair((pairs << 13) | (value_set ^ pairs)),
            2 if sets != 0 => Rank::FullHouse((sets << 13) | (value_set ^ sets)),
            2 => Rank::FourOfAKind((quads << 13) | (value_set ^ quads)),
            _ => unreachable!("rank_five needs five cards"),
        }
    }
}

impl Rankable for Vec<Card> {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for [Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for &[Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for CardBitSet {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter()
    }
}
