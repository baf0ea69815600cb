use std::fmt;
use std::str::FromStr;

use super::error::PokerError;

/// Card rank or value.
/// This is basically the face value - 2
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u32 and convert it to a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Value;
    /// assert_eq!(Value::Four, Value::from_u8(2));
    /// ```
    pub fn from_u8(v: u8) -> Self {
        VALUES[(v % 13) as usize]
    }

    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck, or
    /// generating all possible starting hands.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as long as the char is in the ascii range (It should
    /// be). @returns None if there's no value there.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(Some(Value::Ace), Value::from_char('A'));
    /// assert_eq!(Some(Value::Ten), Value::from_char('t'));
    /// assert_eq!(None, Value::from_char('1'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Convert this Value to a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Translate a value into the suit.
    pub fn from_u8(s: u8) -> Self {
        SUITS[(s % 4) as usize]
    }

    /// Given a character that represents a suit try and parse that char.
    /// If the char can represent a suit return it.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Suit;
    ///
    /// assert_eq!(Some(Suit::Spade), Suit::from_char('s'));
    /// assert_eq!(Some(Suit::Heart), Suit::from_char('H'));
    /// assert_eq!(None, Suit::from_char('x'));
    /// ```
    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            'd' => Some(Self::Diamond),
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    /// This Suit to a character.
    pub fn to_char(self) -> char {
        match self {
            Self::Diamond => 'd',
            Self::Spade => 's',
            Self::Heart => 'h',
            Self::Club => 'c',
        }
    }
}

impl From<u8> for Suit {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    /// Create a new card.
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// The position of this card in a 52 card bit set.
    ///
    /// Cards are grouped by value so all four twos come first and the aces
    /// come last.
    pub fn index(self) -> u8 {
        (self.value as u8) * 4 + self.suit as u8
    }

    /// The inverse of `index`.
    ///
    /// Returns None for anything outside of `0..52`.
    pub fn from_index(idx: u8) -> Option<Self> {
        if idx < 52 {
            Some(Self::new(Value::from_u8(idx / 4), Suit::from_u8(idx % 4)))
        } else {
            None
        }
    }

    /// All 52 cards in index order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..52).filter_map(Card::from_index)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl TryFrom<&str> for Card {
    type Error = PokerError;

    /// Parse a two character token such as `"Ah"` or `"tc"`.
    fn try_from(token: &str) -> Result<Self, Self::Error> {
        let mut chars = token.chars();
        let (Some(v), Some(s), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PokerError::InvalidCardToken(token.to_string()));
        };
        let value = Value::from_char(v).ok_or(PokerError::UnexpectedValueChar(v))?;
        let suit = Suit::from_char(s).ok_or(PokerError::UnexpectedSuitChar(s))?;
        Ok(Self::new(value, suit))
    }
}

impl FromStr for Card {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::try_from(s)
    }
}
