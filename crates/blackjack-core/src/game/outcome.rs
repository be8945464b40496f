use crate::model::hand::Hand;
use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Participant {
    Player,
    Dealer,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Participant::Player => "Player",
            Participant::Dealer => "Dealer",
        };
        f.write_str(label)
    }
}

/// How a finished round was decided. Variants are listed in the order the
/// rules are checked; the first one that applies wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    BothBust,
    Push,
    DealerBlackjack,
    DealerBust,
    PlayerBust,
    PlayerBlackjack,
    DealerHigher { dealer: u8, player: u8 },
    PlayerHigher { dealer: u8, player: u8 },
}

impl Outcome {
    pub fn resolve(player: &Hand, dealer: &Hand) -> Self {
        let player_best = player.best_total();
        let dealer_best = dealer.best_total();

        if player_best.is_none() && dealer_best.is_none() {
            return Outcome::BothBust;
        }
        if player_best == dealer_best {
            return Outcome::Push;
        }
        if dealer.has_blackjack() {
            return Outcome::DealerBlackjack;
        }
        if !dealer.is_viable() {
            return Outcome::DealerBust;
        }
        if player_best.is_none() {
            return Outcome::PlayerBust;
        }
        if player.has_blackjack() {
            return Outcome::PlayerBlackjack;
        }

        match (dealer_best, player_best) {
            (Some(dealer), Some(player)) if dealer >= player => {
                Outcome::DealerHigher { dealer, player }
            }
            (Some(dealer), Some(player)) => Outcome::PlayerHigher { dealer, player },
            // A viable dealer always has a total.
            (None, _) => Outcome::DealerBust,
            (_, None) => Outcome::PlayerBust,
        }
    }

    pub const fn winner(self) -> Option<Participant> {
        match self {
            Outcome::Push => None,
            Outcome::BothBust
            | Outcome::DealerBlackjack
            | Outcome::PlayerBust
            | Outcome::DealerHigher { .. } => Some(Participant::Dealer),
            Outcome::DealerBust | Outcome::PlayerBlackjack | Outcome::PlayerHigher { .. } => {
                Some(Participant::Player)
            }
        }
    }

    /// The line shown to the player, without the `Player - ` prefix.
    pub fn message(self) -> String {
        match self {
            Outcome::BothBust => "Both dealer and player busted - dealer wins".to_string(),
            Outcome::Push => "PUSH - money is returned".to_string(),
            Outcome::DealerBlackjack => "You lose! - dealer hit blackjack".to_string(),
            Outcome::DealerBust => "You win! - dealer busted out".to_string(),
            Outcome::PlayerBust => "You busted - womp, womp".to_string(),
            Outcome::PlayerBlackjack => "You win! BLACKJACK!".to_string(),
            Outcome::DealerHigher { dealer, player } => {
                format!("dealer shows {dealer}, player shows {player} - DEALER WINS!")
            }
            Outcome::PlayerHigher { dealer, player } => {
                format!("dealer shows {dealer}, player shows {player} - PLAYER WINS!")
            }
        }
    }
}
