use std::fmt;
use std::sync::OnceLock;

use super::card::{Card, Suit, Value};
use super::card_bit_set::CardBitSet;
use super::error::PokerError;
use super::rank::{Rank, Rankable};

/// How many distinct five card hands there are once suits stop mattering.
pub const DISTINCT_SCORES: usize = 7462;

/// Strength of a five card hand as a single number.
///
/// Scores run from 1, the royal flush, to 7462, seven high with no pair.
/// Lower is stronger, and that is also how `Ord` works: `a < b` means `a`
/// beats `b`. Two hands tie exactly when their scores are equal, so no other
/// comparison is ever needed.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::{HandCategory, evaluate, parse_cards};
///
/// let quads = evaluate(&parse_cards("9s9h9d9cKh").unwrap()).unwrap();
/// let boat = evaluate(&parse_cards("KsKhKd9c9h").unwrap()).unwrap();
/// assert!(quads < boat);
/// assert_eq!(HandCategory::FourOfAKind, quads.category());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u16);

impl Score {
    /// The best possible score.
    pub const ROYAL_FLUSH: Score = Score(1);
    /// The worst possible score.
    pub const WORST: Score = Score(DISTINCT_SCORES as u16);

    /// Wrap a raw score, if it's in `1..=7462`.
    pub fn new(score: u16) -> Option<Self> {
        if score >= 1 && score as usize <= DISTINCT_SCORES {
            Some(Self(score))
        } else {
            None
        }
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Does this hand beat `other` outright?
    pub fn beats(self, other: Score) -> bool {
        self < other
    }

    pub fn category(self) -> HandCategory {
        score_to_category(self)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every distinct `Rank` of a five card hand, strongest first.
fn rank_table() -> &'static [Rank] {
    static TABLE: OnceLock<Vec<Rank>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut ranks = Vec::with_capacity(DISTINCT_SCORES);
        let mut counts = [0u8; 13];
        collect_ranks(0, 5, &mut counts, &mut ranks);
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        ranks.dedup();
        ranks
    })
}

/// Walk every multiset of five values (no value more than four times) and
/// rank a hand built from it. Sets of five different values are ranked twice,
/// once all in one suit and once not.
fn collect_ranks(value: usize, remaining: u8, counts: &mut [u8; 13], out: &mut Vec<Rank>) {
    if remaining == 0 {
        let mut cards: Vec<Card> = Vec::with_capacity(5);
        for (v, &count) in counts.iter().enumerate() {
            for s in 0..count {
                cards.push(Card::new(Value::from_u8(v as u8), Suit::from_u8(s)));
            }
        }
        if counts.iter().all(|&c| c <= 1) {
            // Every card is a spade at this point.
            out.push(cards.rank_five());
            cards[0].suit = Suit::Heart;
        }
        out.push(cards.rank_five());
        return;
    }
    if value == counts.len() {
        return;
    }
    for count in 0..=remaining.min(4) {
        counts[value] = count;
        collect_ranks(value + 1, remaining - count, counts, out);
    }
    counts[value] = 0;
}

impl From<Rank> for Score {
    /// Position of the rank among all distinct five card hands.
    ///
    /// Every rank produced from five to seven real cards is in the table. A
    /// rank built by hand that isn't lands on the next weaker class.
    fn from(rank: Rank) -> Self {
        let table = rank_table();
        let idx = table
            .binary_search_by(|probe| rank.cmp(probe))
            .unwrap_or_else(|insert_at| insert_at.min(table.len() - 1));
        Score(idx as u16 + 1)
    }
}

/// The ten hand categories, weakest first.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// Highest score (weakest hand) in each category, strongest category first.
const CATEGORY_BOUNDS: [(u16, HandCategory); 10] = [
    (1, HandCategory::RoyalFlush),
    (10, HandCategory::StraightFlush),
    (166, HandCategory::FourOfAKind),
    (322, HandCategory::FullHouse),
    (1599, HandCategory::Flush),
    (1609, HandCategory::Straight),
    (2467, HandCategory::ThreeOfAKind),
    (3325, HandCategory::TwoPair),
    (6185, HandCategory::Pair),
    (DISTINCT_SCORES as u16, HandCategory::HighCard),
];

impl HandCategory {
    /// All categories, weakest first.
    pub const fn all() -> [Self; 10] {
        [
            Self::HighCard,
            Self::Pair,
            Self::TwoPair,
            Self::ThreeOfAKind,
            Self::Straight,
            Self::Flush,
            Self::FullHouse,
            Self::FourOfAKind,
            Self::StraightFlush,
            Self::RoyalFlush,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HighCard => "High Card",
            Self::Pair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
            Self::RoyalFlush => "Royal Flush",
        }
    }

    /// The range of scores belonging to this category.
    pub fn score_range(self) -> std::ops::RangeInclusive<u16> {
        let pos = CATEGORY_BOUNDS
            .iter()
            .position(|(_, c)| *c == self)
            .unwrap_or(CATEGORY_BOUNDS.len() - 1);
        let low = if pos == 0 {
            1
        } else {
            CATEGORY_BOUNDS[pos - 1].0 + 1
        };
        low..=CATEGORY_BOUNDS[pos].0
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Rank> for HandCategory {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::HighCard(_) => Self::HighCard,
            Rank::OnePair(_) => Self::Pair,
            Rank::TwoPair(_) => Self::TwoPair,
            Rank::ThreeOfAKind(_) => Self::ThreeOfAKind,
            Rank::Straight(_) => Self::Straight,
            Rank::Flush(_) => Self::Flush,
            Rank::FullHouse(_) => Self::FullHouse,
            Rank::FourOfAKind(_) => Self::FourOfAKind,
            Rank::StraightFlush(9) => Self::RoyalFlush,
            Rank::StraightFlush(_) => Self::StraightFlush,
        }
    }
}

/// Map a score onto its category.
pub fn score_to_category(score: Score) -> HandCategory {
    CATEGORY_BOUNDS
        .iter()
        .find(|(bound, _)| score.0 <= *bound)
        .map(|(_, category)| *category)
        .unwrap_or(HandCategory::HighCard)
}

/// Score the best five card hand out of five, six, or seven cards.
///
/// # Errors
///
/// `WrongCardCount` for fewer than five or more than seven cards and
/// `DuplicateCard` if any card shows up twice.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::{HandCategory, evaluate, parse_cards};
///
/// let score = evaluate(&parse_cards("AhAdAcKhKd2s3c").unwrap()).unwrap();
/// assert_eq!(HandCategory::FullHouse, score.category());
/// assert!(evaluate(&parse_cards("AhAd").unwrap()).is_err());
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Score, PokerError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(PokerError::WrongCardCount {
            expected: "5 to 7",
            got: cards.len(),
        });
    }
    let mut set = CardBitSet::new();
    for &card in cards {
        if !set.insert(card) {
            return Err(PokerError::DuplicateCard(card));
        }
    }
    Ok(Score::from(set.rank()))
}

/// Category of the best hand the given cards make so far.
///
/// With fewer than five cards there is no hand yet and this is `Ok(None)`.
pub fn hand_category_of(cards: &[Card]) -> Result<Option<HandCategory>, PokerError> {
    if cards.len() < 5 {
        return Ok(None);
    }
    evaluate(cards).map(|score| Some(score.category()))
}
