use crate::model::card::{Card, CardValue};
use crate::model::deck::Deck;
use std::collections::BTreeSet;

pub const BLACKJACK: u8 = 21;

#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    stayed: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            stayed: false,
        }
    }

    pub fn deal_initial(&mut self, deck: &mut Deck) {
        self.add_card(deck.deal_card());
        self.add_card(deck.deal_card());
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
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

    /// Every distinct total not above 21, ascending. Empty means bust.
    ///
    /// Each ace splits every partial sum in two, so all combinations of
    /// high/low aces are covered before anything is discarded.
    pub fn possible_totals(&self) -> Vec<u8> {
        let mut sums = BTreeSet::from([0u16]);
        for card in &self.cards {
            sums = match card.value() {
                CardValue::Fixed(value) => sums.iter().map(|sum| sum + u16::from(value)).collect(),
                CardValue::Dual { high, low } => sums
                    .iter()
                    .flat_map(|sum| [sum + u16::from(high), sum + u16::from(low)])
                    .collect(),
            };
        }
        sums.into_iter()
            .filter(|sum| *sum <= u16::from(BLACKJACK))
            .map(|sum| sum as u8)
            .collect()
    }

    pub fn best_total(&self) -> Option<u8> {
        self.possible_totals().last().copied()
    }

    pub fn is_bust(&self) -> bool {
        self.possible_totals().is_empty()
    }

    pub fn has_blackjack(&self) -> bool {
        self.possible_totals().contains(&BLACKJACK)
    }

    /// A hand that can reach 21 is finished, not hittable.
    pub fn is_viable(&self) -> bool {
        let totals = self.possible_totals();
        !totals.contains(&BLACKJACK) && totals.iter().any(|total| *total < BLACKJACK)
    }

    pub fn is_done_for_round(&self) -> bool {
        self.stayed || !self.is_viable()
    }

    pub fn can_still_act_or_has_stayed(&self) -> bool {
        self.is_viable() || self.stayed
    }

    pub fn has_stayed(&self) -> bool {
        self.stayed
    }

    pub fn mark_stay(&mut self) {
        self.stayed = true;
    }
}
