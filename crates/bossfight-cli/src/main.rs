//! `bossfight`: play a party versus boss battle in the terminal.

mod cli;
mod logging;
mod prompt;
mod session;

use std::io;

use anyhow::{Context, Result};
use bossfight_core::{AutoPilot, Battle, BattleConfig};
use tracing::info;

use crate::prompt::Prompter;

fn main() -> Result<()> {
    let args = cli::parse_args();
    logging::init(args.verbose);

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    let mut config = match &args.config {
        Some(path) => BattleConfig::load_from_file(path)
            .with_context(|| format!("failed to load battle config {}", path.display()))?,
        None if args.auto => prompt::default_party_config(),
        None => prompter.setup().context("failed to read party setup")?,
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    info!(
        party = config.party.len(),
        difficulty = ?config.difficulty,
        seed = ?config.seed,
        "starting battle"
    );

    let mut battle = Battle::from_config(&config).context("failed to set up battle")?;
    let mut out = io::stdout();
    if args.auto {
        session::play(&mut battle, &mut AutoPilot::default(), args.max_rounds, &mut out)?;
    } else {
        session::play(&mut battle, &mut prompter, args.max_rounds, &mut out)?;
    }
    Ok(())
}
