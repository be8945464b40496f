use crate::console::{Console, ConsoleError};
use crate::game::round::{Round, RoundSummary};
use crate::model::deck::Deck;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

pub const WELCOME: &str = "Greetings! Welcome to Blackjack!";
pub const PLAY_AGAIN_PROMPT: &str = "Play again? (y)es / (n)o?";
pub const FAREWELL: &str = "Okie dokie... Thanks for playing!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seeds every deck in the session; `None` draws from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAgain {
    Yes,
    Quit,
}

impl PlayAgain {
    /// Only `n` and `q` end the session; anything else plays on.
    pub fn from_input(input: &str) -> Self {
        match input {
            "n" | "q" => PlayAgain::Quit,
            _ => PlayAgain::Yes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    rng: StdRng,
    rounds_played: u32,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            rounds_played: 0,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Greets the player and keeps dealing rounds until they quit.
    pub fn run<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<(), ConsoleError> {
        console.show(WELCOME)?;
        console.blank_line()?;

        loop {
            self.play_round(console)?;

            let answer = console.prompt_line(PLAY_AGAIN_PROMPT)?;
            if PlayAgain::from_input(&answer) == PlayAgain::Quit {
                console.blank_line()?;
                console.show(FAREWELL)?;
                info!(rounds = self.rounds_played, "session finished");
                return Ok(());
            }
        }
    }

    /// Deals one round from a freshly shuffled deck.
    pub fn play_round<C: Console + ?Sized>(
        &mut self,
        console: &mut C,
    ) -> Result<RoundSummary, ConsoleError> {
        let mut deck = Deck::with_seed(self.rng.next_u64());
        let summary = Round::new(&mut deck, console).play()?;
        self.rounds_played += 1;
        Ok(summary)
    }
}
