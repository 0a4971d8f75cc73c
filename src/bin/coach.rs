//! Interactive poker coach.
//!
//! Deals hands, shows advisor recommendations and plays each hand out after
//! the hero acts.
//!
//! Usage:
//!   coach [--config session.json] [--seed 42] [--stack 200] [--notes notes.json] [-v]

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;

use poker_coach::cli::Simulator;
use poker_coach::display;
use poker_coach::sim::SessionConfig;

#[derive(Parser)]
#[command(name = "coach", about = "Interactive poker training simulator")]
struct Cli {
    /// Session config JSON (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting stack
    #[arg(long)]
    stack: Option<f64>,

    /// Strategy notes JSON for the strategy advisor
    #[arg(short, long)]
    notes: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let mut simulator = Simulator::from_config(config).context("invalid session settings")?;

    let mut stdout = io::stdout();
    display::emit(&mut stdout, &simulator.banner());

    loop {
        let line = match Input::<String>::new()
            .with_prompt("poker")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(err) => {
                log::info!("input closed: {}", err);
                break;
            }
        };

        let reply = simulator.handle(&line);
        if !reply.text.is_empty() {
            display::emit(&mut stdout, &reply.text);
        }
        if reply.quit {
            break;
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_json_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(stack) = cli.stack {
        config = config.with_starting_stack(stack);
    }
    if let Some(notes) = &cli.notes {
        config = config.with_knowledge_notes(notes.clone());
    }
    Ok(config)
}
