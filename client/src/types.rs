// Datatypes shared by the codec, the view model and the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Number of seats at the table.
pub const PLAYER_COUNT: usize = 4;

// A seat at the table. Invariant: in [0, PLAYER_COUNT).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerIndex(u8);

#[derive(Debug, Error, PartialEq)]
#[error("player index {0} is not a seat")]
pub struct InvalidPlayerIndex(pub usize);

impl PlayerIndex {
    pub fn new(index: usize) -> Option<Self> {
        (index < PLAYER_COUNT).then(|| PlayerIndex(index as u8))
    }

    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    // The seat `offset` places after this one, going round the table.
    pub fn wrapping_add(self, offset: usize) -> Self {
        PlayerIndex(((self.to_usize() + offset % PLAYER_COUNT) % PLAYER_COUNT) as u8)
    }

    // All seats in ascending order.
    pub fn values() -> impl Iterator<Item = PlayerIndex> {
        (0..PLAYER_COUNT).map(|i| PlayerIndex(i as u8))
    }
}

impl TryFrom<usize> for PlayerIndex {
    type Error = InvalidPlayerIndex;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        PlayerIndex::new(index).ok_or(InvalidPlayerIndex(index))
    }
}

impl From<PlayerIndex> for usize {
    fn from(epi: PlayerIndex) -> usize {
        epi.to_usize()
    }
}

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Suit {
    Acorns,
    Leaves,
    Hearts,
    Bells,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Rank {
    Ace,
    Ten,
    King,
    Ober,
    Unter,
    Nine,
    Eight,
    Seven,
}

// One of the 32 cards of the German-suited deck. The client never orders or
// compares cards beyond equality.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown card code {0:?}")]
pub struct InvalidCard(pub String);

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }
}

impl std::str::FromStr for Card {
    type Err = InvalidCard;

    // Cards travel as two-character codes, e.g. "H7" or "GZ".
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidCard(code.to_string());
        let mut chars = code.chars();
        let (Some(suit), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let suit = match suit {
            'E' => Suit::Acorns,
            'G' => Suit::Leaves,
            'H' => Suit::Hearts,
            'S' => Suit::Bells,
            _ => return Err(invalid()),
        };
        let rank = match rank {
            'A' => Rank::Ace,
            'Z' => Rank::Ten,
            'K' => Rank::King,
            'O' => Rank::Ober,
            'U' => Rank::Unter,
            '9' => Rank::Nine,
            '8' => Rank::Eight,
            '7' => Rank::Seven,
            _ => return Err(invalid()),
        };

        Ok(Card { suit, rank })
    }
}

impl TryFrom<String> for Card {
    type Error = InvalidCard;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let suit = match self.suit {
            Suit::Acorns => 'E',
            Suit::Leaves => 'G',
            Suit::Hearts => 'H',
            Suit::Bells => 'S',
        };
        let rank = match self.rank {
            Rank::Ace => 'A',
            Rank::Ten => 'Z',
            Rank::King => 'K',
            Rank::Ober => 'O',
            Rank::Unter => 'U',
            Rank::Nine => '9',
            Rank::Eight => '8',
            Rank::Seven => '7',
        };
        write!(f, "{}{}", suit, rank)
    }
}

// An absolute seat -> value mapping. Seats without a value are absent rather
// than holding a placeholder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeatMap<T> {
    seats: [Option<T>; PLAYER_COUNT],
}

impl<T> SeatMap<T> {
    pub fn new() -> Self {
        SeatMap {
            seats: std::array::from_fn(|_| None),
        }
    }

    pub fn get(&self, epi: PlayerIndex) -> Option<&T> {
        self.seats[epi.to_usize()].as_ref()
    }

    pub fn insert(&mut self, epi: PlayerIndex, value: T) {
        self.seats[epi.to_usize()] = Some(value);
    }

    // Number of occupied seats.
    pub fn len(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Occupied seats in ascending seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerIndex, &T)> + '_ {
        PlayerIndex::values().filter_map(move |epi| self.get(epi).map(|t| (epi, t)))
    }
}

impl<T> Default for SeatMap<T> {
    fn default() -> Self {
        SeatMap::new()
    }
}
