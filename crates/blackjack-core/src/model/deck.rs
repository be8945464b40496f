use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

/// A single 52-card deck. The top of the deck is the end of `cards`.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: StdRng,
    shuffles: u32,
}

impl Deck {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Builds a deck that deals `top_first` in order before falling back to
    /// a seeded reshuffle once those cards run out.
    pub fn stacked(top_first: Vec<Card>, seed: u64) -> Self {
        let mut cards = top_first;
        cards.reverse();
        Self {
            cards,
            rng: StdRng::seed_from_u64(seed),
            shuffles: 0,
        }
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng,
            shuffles: 0,
        };
        deck.shuffle();
        deck
    }

    pub fn standard_order() -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }

    /// Replaces whatever is left with a fresh, shuffled set of 52 cards.
    pub fn shuffle(&mut self) {
        self.cards = Self::standard_order();
        self.cards.shuffle(&mut self.rng);
        self.shuffles += 1;
        debug!(shuffles = self.shuffles, "deck shuffled");
    }

    pub fn deal_card(&mut self) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                debug!(card = %card, remaining = self.cards.len(), "card dealt");
                return card;
            }
            self.shuffle();
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of shuffles performed so far, including the initial one.
    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
