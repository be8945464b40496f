mod logging;
mod terminal;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};

use blackjack_core::AppInfo;
use blackjack_core::console::ConsoleError;
use blackjack_core::game::session::{Session, SessionConfig};

use crate::logging::init_logging;
use crate::terminal::TerminalConsole;

/// Terminal blackjack against an automated dealer.
#[derive(Debug, Parser)]
#[command(name = "blackjack", author, version, about = "Play blackjack against the dealer")]
struct Cli {
    /// Seed every deck in the session for a reproducible game.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Default log level when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: Level,

    /// Write structured JSON logs to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    telemetry: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logging_guard = init_logging(cli.log_level, cli.telemetry.as_deref())?;
    if let Some(path) = logging_guard.telemetry_path.as_ref() {
        info!(path = %path.display(), "telemetry enabled");
    }
    info!(app = AppInfo::name(), version = AppInfo::version(), seed = ?cli.seed, "starting session");

    let mut session = Session::new(SessionConfig { seed: cli.seed });
    let mut console = TerminalConsole::stdio();

    match session.run(&mut console) {
        Ok(()) => Ok(()),
        Err(ConsoleError::Closed) => {
            info!(rounds = session.rounds_played(), "input closed, leaving the table");
            Ok(())
        }
        Err(err) => Err(err).context("terminal console failed"),
    }
}
