use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::Serialize;

/// What a single card contributes to a hand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardValue {
    Fixed(u8),
    /// An ace counts as either value; the hand decides which later.
    Dual { high: u8, low: u8 },
}

impl CardValue {
    pub const ACE: CardValue = CardValue::Dual { high: 11, low: 1 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn value(self) -> CardValue {
        if self.rank.is_ace() {
            CardValue::ACE
        } else {
            CardValue::Fixed(self.rank.pip_value())
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
