//! Command-line interface for the bossfight shell.
//!
//! Without `--config` the party is built interactively.

use clap::Parser;
use std::path::PathBuf;

/// Turn-based party versus boss battle
#[derive(Parser, Debug)]
#[command(name = "bossfight")]
#[command(about = "Turn-based party versus boss battle")]
#[command(version)]
pub struct Args {
    /// Load the encounter from a JSON config file instead of prompting
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Seed for reproducible dice (overrides the config's seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Let the built-in autopilot play the party, without prompts
    #[arg(long)]
    pub auto: bool,

    /// Stop the battle after this many rounds
    #[arg(long, default_value = "100")]
    pub max_rounds: u32,

    /// Write debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["bossfight"]);
        assert!(args.config.is_none());
        assert!(!args.auto);
        assert_eq!(args.max_rounds, 100);
    }

    #[test]
    fn all_flags() {
        let args = Args::parse_from([
            "bossfight",
            "--config",
            "battle.json",
            "--seed",
            "9",
            "--auto",
            "--max-rounds",
            "20",
            "-v",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("battle.json")));
        assert_eq!(args.seed, Some(9));
        assert!(args.auto);
        assert_eq!(args.max_rounds, 20);
        assert!(args.verbose);
    }
}
