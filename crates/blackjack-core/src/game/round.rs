use crate::console::{Console, ConsoleError};
use crate::game::outcome::{Outcome, Participant};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::{BLACKJACK, Hand};
use serde::Serialize;
use tracing::{debug, info, warn};

pub const DEALER_STANDS_AT: u8 = 17;
pub const HIDDEN_CARD: &str = "???";
pub const HIT_OR_STAY_PROMPT: &str = "Do you want to (h)it or (s)tay?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolved(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stay,
}

impl Decision {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "h" => Some(Decision::Hit),
            "s" => Some(Decision::Stay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_total: Option<u8>,
    pub dealer_total: Option<u8>,
    pub outcome: Outcome,
    pub winner: Option<Participant>,
}

/// One hand of blackjack between the player and the dealer.
///
/// The player and dealer turns alternate: every cycle gives the player one
/// decision (if they still have one to make) and then lets the dealer draw at
/// most one card. Cycling stops once neither side has anything left to do.
pub struct Round<'a, C: Console + ?Sized> {
    deck: &'a mut Deck,
    console: &'a mut C,
    player: Hand,
    dealer: Hand,
    phase: RoundPhase,
    shuffles_announced: u32,
}

impl<'a, C: Console + ?Sized> Round<'a, C> {
    pub fn new(deck: &'a mut Deck, console: &'a mut C) -> Self {
        Self {
            deck,
            console,
            player: Hand::new(),
            dealer: Hand::new(),
            phase: RoundPhase::Dealing,
            shuffles_announced: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    /// Plays the round to completion.
    pub fn play(mut self) -> Result<RoundSummary, ConsoleError> {
        loop {
            if let RoundPhase::Resolved(outcome) = self.step()? {
                return Ok(self.summary(outcome));
            }
        }
    }

    /// Advances the state machine by one phase and returns the new phase.
    pub fn step(&mut self) -> Result<RoundPhase, ConsoleError> {
        self.phase = match self.phase {
            RoundPhase::Dealing => {
                self.deal()?;
                self.next_cycle()?
            }
            RoundPhase::PlayerTurn => {
                self.player_turn()?;
                RoundPhase::DealerTurn
            }
            RoundPhase::DealerTurn => {
                self.dealer_turn()?;
                self.next_cycle()?
            }
            resolved @ RoundPhase::Resolved(_) => resolved,
        };
        Ok(self.phase)
    }

    fn player_active(&self) -> bool {
        !self.player.is_done_for_round() && self.dealer.is_viable()
    }

    fn dealer_draws(&self) -> bool {
        self.player.can_still_act_or_has_stayed()
            && self.dealer.is_viable()
            && self
                .dealer
                .best_total()
                .is_some_and(|total| total < DEALER_STANDS_AT)
    }

    fn next_cycle(&mut self) -> Result<RoundPhase, ConsoleError> {
        if self.player_active() || self.dealer_draws() {
            Ok(RoundPhase::PlayerTurn)
        } else {
            self.resolve()
        }
    }

    fn deal(&mut self) -> Result<(), ConsoleError> {
        self.player.deal_initial(self.deck);
        self.dealer.deal_initial(self.deck);
        self.announce_shuffles()?;
        debug!(
            player = %card_list(&self.player, false),
            dealer = %card_list(&self.dealer, false),
            "initial hands dealt"
        );

        self.announce_player_status()?;
        self.show_hand(Participant::Player, false)?;
        self.show_hand(Participant::Dealer, true)?;
        self.console.blank_line()
    }

    fn player_turn(&mut self) -> Result<(), ConsoleError> {
        if self.player.is_done_for_round() {
            return Ok(());
        }

        self.show_hand(Participant::Player, false)?;
        self.show_player_values()?;
        self.console.blank_line()?;

        let decision = loop {
            let line = self.console.prompt_line(HIT_OR_STAY_PROMPT)?;
            match Decision::parse(&line) {
                Some(decision) => break decision,
                None => debug!(input = %line, "ignoring unrecognised decision"),
            }
        };
        debug!(?decision, "player decided");

        match decision {
            Decision::Hit => {
                self.console.show("You chose to hit, here's your new hand")?;
                let card = self.draw();
                self.player.add_card(card);
                self.announce_shuffles()?;
                self.show_hand(Participant::Player, false)?;
                self.announce_player_status()?;
            }
            Decision::Stay => {
                self.console.show("You chose to stay")?;
                self.player.mark_stay();
            }
        }
        self.console.blank_line()
    }

    fn dealer_turn(&mut self) -> Result<(), ConsoleError> {
        self.console.show("===== DEALER =====")?;
        if self.dealer_draws() {
            let card = self.draw();
            self.dealer.add_card(card);
            self.announce_shuffles()?;
            debug!(card = %card, total = ?self.dealer.best_total(), "dealer draws");
            self.show_hand(Participant::Dealer, true)?;
        }
        Ok(())
    }

    fn resolve(&mut self) -> Result<RoundPhase, ConsoleError> {
        let outcome = Outcome::resolve(&self.player, &self.dealer);

        self.console.blank_line()?;
        self.console.show("=== HAND COMPLETED ===")?;
        self.show_hand(Participant::Dealer, false)?;
        self.show_hand(Participant::Player, false)?;
        self.console.show(&format!("Player - {}", outcome.message()))?;
        self.console.blank_line()?;

        let summary = self.summary(outcome);
        match serde_json::to_string(&summary) {
            Ok(json) => info!(summary = %json, "round resolved"),
            Err(err) => warn!(%err, ?outcome, "round resolved; summary not serializable"),
        }
        Ok(RoundPhase::Resolved(outcome))
    }

    fn summary(&self, outcome: Outcome) -> RoundSummary {
        RoundSummary {
            player_cards: self.player.cards().to_vec(),
            dealer_cards: self.dealer.cards().to_vec(),
            player_total: self.player.best_total(),
            dealer_total: self.dealer.best_total(),
            outcome,
            winner: outcome.winner(),
        }
    }

    fn draw(&mut self) -> Card {
        self.deck.deal_card()
    }

    fn announce_shuffles(&mut self) -> Result<(), ConsoleError> {
        while self.shuffles_announced < self.deck.shuffles() {
            self.shuffles_announced += 1;
            self.console.show("Shuffling the deck...")?;
        }
        Ok(())
    }

    fn announce_player_status(&mut self) -> Result<(), ConsoleError> {
        match self.player.best_total() {
            Some(BLACKJACK) => self.console.show("Player - BLACKJACK!"),
            None => self.console.show("Player - Busted out!"),
            Some(_) => Ok(()),
        }
    }

    fn show_hand(&mut self, who: Participant, hide_hole: bool) -> Result<(), ConsoleError> {
        let hand = match who {
            Participant::Player => &self.player,
            Participant::Dealer => &self.dealer,
        };
        let line = format!(
            "{who} hand contains {} cards: {}",
            hand.len(),
            card_list(hand, hide_hole)
        );
        self.console.show(&line)
    }

    fn show_player_values(&mut self) -> Result<(), ConsoleError> {
        let totals = self.player.possible_totals();
        let noun = if totals.len() == 1 { "value" } else { "values" };
        let joined = totals
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.console.show(&format!("Player hand {noun}: {joined}"))
    }
}

fn card_list(hand: &Hand, hide_hole: bool) -> String {
    hand.cards()
        .iter()
        .enumerate()
        .map(|(index, card)| {
            if hide_hole && index == 0 {
                HIDDEN_CARD.to_string()
            } else {
                card.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::{Decision, Round, RoundPhase};
    use crate::console::{ConsoleError, ScriptedConsole};
    use crate::game::outcome::Outcome;
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn stacked(ranks: &[Rank]) -> Deck {
        Deck::stacked(
            ranks.iter().map(|&rank| Card::new(rank, Suit::Diamonds)).collect(),
            99,
        )
    }

    #[test]
    fn decision_accepts_only_h_and_s() {
        assert_eq!(Decision::parse("h"), Some(Decision::Hit));
        assert_eq!(Decision::parse("s"), Some(Decision::Stay));
        assert_eq!(Decision::parse("H"), None);
        assert_eq!(Decision::parse(""), None);
        assert_eq!(Decision::parse("hit"), None);
    }

    #[test]
    fn steps_through_phases_in_order() {
        // player 10,8 ; dealer 10,9
        let mut deck = stacked(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Nine]);
        let mut console = ScriptedConsole::new(["s"]);
        let mut round = Round::new(&mut deck, &mut console);
        assert_eq!(round.phase(), RoundPhase::Dealing);
        assert_eq!(round.step().unwrap(), RoundPhase::PlayerTurn);
        assert_eq!(round.step().unwrap(), RoundPhase::DealerTurn);
        assert!(round.player().has_stayed());
        assert_eq!(
            round.step().unwrap(),
            RoundPhase::Resolved(Outcome::DealerHigher { dealer: 19, player: 18 })
        );
        assert_eq!(round.dealer().len(), 2);
    }

    #[test]
    fn invalid_input_reprompts_without_consuming_a_turn() {
        let mut deck = stacked(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Nine]);
        let mut console = ScriptedConsole::new(["x", "", "stay", "s"]);
        let summary = Round::new(&mut deck, &mut console).play().unwrap();
        assert_eq!(summary.player_cards.len(), 2);
        assert_eq!(console.count(super::HIT_OR_STAY_PROMPT), 4);
    }

    #[test]
    fn dealer_hole_card_is_hidden_until_resolution() {
        let mut deck = stacked(&[Rank::Ten, Rank::Eight, Rank::King, Rank::Nine]);
        let mut console = ScriptedConsole::new(["s"]);
        Round::new(&mut deck, &mut console).play().unwrap();
        assert!(console.contains("Dealer hand contains 2 cards: ???,9♦"));
        assert!(console.contains("Dealer hand contains 2 cards: K♦,9♦"));
    }

    #[test]
    fn closed_input_aborts_the_round() {
        let mut deck = stacked(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Nine]);
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let result = Round::new(&mut deck, &mut console).play();
        assert!(matches!(result, Err(ConsoleError::Closed)));
    }

    #[test]
    fn natural_twenty_one_skips_the_player_prompt() {
        // player A,K ; dealer 10,8 (stands)
        let mut deck = stacked(&[Rank::Ace, Rank::King, Rank::Ten, Rank::Eight]);
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let summary = Round::new(&mut deck, &mut console).play().unwrap();
        assert!(console.contains("Player - BLACKJACK!"));
        assert_eq!(console.count(super::HIT_OR_STAY_PROMPT), 0);
        assert_eq!(summary.outcome, Outcome::PlayerBlackjack);
    }

    #[test]
    fn player_shows_all_values_when_prompted() {
        let mut deck = stacked(&[Rank::Ace, Rank::Seven, Rank::Ten, Rank::Nine]);
        let mut console = ScriptedConsole::new(["s"]);
        Round::new(&mut deck, &mut console).play().unwrap();
        assert!(console.contains("Player hand values: 8,18"));
    }
}
