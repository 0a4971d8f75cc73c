//! Batch drill: autoplay many seeded sessions in parallel.
//!
//! Every hand is dealt at random, shown to the standard advisor panel and
//! played with the panel's consolidated recommendation.
//!
//! Usage:
//!   drill [--sessions 32] [--hands 100] [--seed 7] [--output drill.json]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use poker_coach::advisors::{discuss, AdvisorPanel};
use poker_coach::display;
use poker_coach::sim::{money, PlayerAction, Session, SessionConfig, SessionStats};

#[derive(Parser)]
#[command(name = "drill", about = "Autoplay seeded sessions on advisor consensus")]
struct Cli {
    /// Session config JSON (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of independent sessions
    #[arg(long, default_value_t = 32)]
    sessions: usize,

    /// Hands per session
    #[arg(long, default_value_t = 100)]
    hands: usize,

    /// Base seed; session i uses seed + i
    #[arg(short, long, default_value_t = 7)]
    seed: u64,

    /// Starting stack per session
    #[arg(long)]
    stack: Option<f64>,

    /// Write the summary as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct SessionResult {
    session: usize,
    seed: u64,
    stats: SessionStats,
}

#[derive(Debug, Serialize)]
struct DrillSummary {
    sessions: usize,
    hands_per_session: usize,
    total_hands: usize,
    wins: usize,
    losses: usize,
    folds: usize,
    win_rate: f64,
    total_profit: f64,
    avg_profit_per_session: f64,
    best_session_profit: f64,
    worst_session_profit: f64,
    elapsed_secs: f64,
    results: Vec<SessionResult>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut base = match &cli.config {
        Some(path) => SessionConfig::from_json_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(stack) = cli.stack {
        base = base.with_starting_stack(stack);
    }
    base.validate().context("invalid session settings")?;

    println!("=== Poker Coach Drill ===");
    println!(
        "Sessions: {}, hands per session: {}, starting stack: ${}\n",
        cli.sessions,
        cli.hands,
        money(base.starting_stack)
    );

    let start = Instant::now();
    let bar = ProgressBar::new((cli.sessions * cli.hands) as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} hands ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let results: Vec<SessionResult> = (0..cli.sessions)
        .into_par_iter()
        .map(|i| -> Result<SessionResult> {
            let seed = cli.seed.wrapping_add(i as u64);
            let config = base.clone().with_seed(seed);
            let stats = run_session(config, cli.hands, &bar)?;
            Ok(SessionResult {
                session: i,
                seed,
                stats,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    bar.finish_and_clear();

    let summary = summarize(results, cli.hands, start.elapsed().as_secs_f64());
    print_summary(&summary);

    if let Some(path) = &cli.output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        println!("\nSummary written to {}", path.display());
    }
    Ok(())
}

/// Play `hands` hands on the panel's consensus.
fn run_session(config: SessionConfig, hands: usize, bar: &ProgressBar) -> Result<SessionStats> {
    let panel = AdvisorPanel::default();
    let mut session = Session::new(config)?;

    for _ in 0..hands {
        let situation = session.deal_random().clone();
        let recommendations = panel.consult(&situation);
        let discussion = discuss("What should I do?", &situation, &recommendations);
        let action = session
            .parse_action(&discussion.consensus.keyword().to_ascii_lowercase())
            .unwrap_or(PlayerAction::Call);
        log::debug!(
            "{} {} -> {} ({})",
            situation.position,
            situation.hole_cards,
            action,
            discussion.confidence
        );
        session.play(action);
        bar.inc(1);
    }
    Ok(session.stats())
}

fn summarize(results: Vec<SessionResult>, hands: usize, elapsed_secs: f64) -> DrillSummary {
    let total_hands: usize = results.iter().map(|r| r.stats.hands_played).sum();
    let wins: usize = results.iter().map(|r| r.stats.wins).sum();
    let losses: usize = results.iter().map(|r| r.stats.losses).sum();
    let folds: usize = results.iter().map(|r| r.stats.folds).sum();
    let total_profit: f64 = results.iter().map(|r| r.stats.profit).sum();
    let best = results.iter().map(|r| r.stats.profit).fold(f64::NEG_INFINITY, f64::max);
    let worst = results.iter().map(|r| r.stats.profit).fold(f64::INFINITY, f64::min);
    let (best, worst) = if results.is_empty() {
        (0.0, 0.0)
    } else {
        (best, worst)
    };

    DrillSummary {
        sessions: results.len(),
        hands_per_session: hands,
        total_hands,
        wins,
        losses,
        folds,
        win_rate: if total_hands > 0 {
            wins as f64 / total_hands as f64
        } else {
            0.0
        },
        total_profit,
        avg_profit_per_session: if results.is_empty() {
            0.0
        } else {
            total_profit / results.len() as f64
        },
        best_session_profit: best,
        worst_session_profit: worst,
        elapsed_secs,
        results,
    }
}

fn print_summary(summary: &DrillSummary) {
    let mut stdout = io::stdout();
    let text = format!(
        "=== Summary ===\n\
         Hands: {} over {} sessions\n\
         Wins / Losses / Folds: {} / {} / {}\n\
         Win Rate: {:.1}%\n\
         Total Profit: {:+.2}\n\
         Avg Profit per Session: {:+.2}\n\
         Best / Worst Session: {:+.2} / {:+.2}\n\
         Time: {:.2}s",
        summary.total_hands,
        summary.sessions,
        summary.wins,
        summary.losses,
        summary.folds,
        summary.win_rate * 100.0,
        summary.total_profit,
        summary.avg_profit_per_session,
        summary.best_session_profit,
        summary.worst_session_profit,
        summary.elapsed_secs
    );
    display::emit(&mut stdout, &text);
}
