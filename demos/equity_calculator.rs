extern crate holdem_equity;

mod common;

use std::process::ExitCode;

use clap::Parser;
use holdem_equity::core::Hand;
use holdem_equity::holdem::{Board, EquityConfig, EquitySimulator, TiePolicy};
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "equity_calculator",
    about = "Estimate a Texas Hold'em hand's equity against random opponents",
    long_about = "Deal out the rest of the hand many times and count how often the hero\n\
                  wins. Ties are credited as a share of the pot."
)]
struct Args {
    /// Tracing/logging options
    #[command(flatten)]
    tracing: common::TracingArgs,

    /// The hero's hole cards (e.g. "AhKd")
    hero: String,

    /// Community cards dealt so far (e.g. "Ac Kh Kd")
    #[arg(short, long, default_value = "")]
    board: String,

    /// Opponents holding random cards
    #[arg(short, long, default_value_t = 1)]
    opponents: usize,

    /// Hole cards of opponents that are known, one hand per flag
    #[arg(short = 'k', long = "known")]
    known: Vec<String>,

    /// Number of trials to run
    #[arg(short = 'n', long, default_value_t = holdem_equity::holdem::DEFAULT_TRIALS)]
    trials: usize,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// How ties are credited: split or even
    #[arg(long, default_value_t = TiePolicy::SplitAmongTied)]
    tie_policy: TiePolicy,

    /// Spread trials over every core (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

fn run(args: &Args) -> Result<(), holdem_equity::core::PokerError> {
    let hero = Hand::new_from_str(&args.hero)?;
    let board = Board::new_from_str(&args.board)?;
    let known = args
        .known
        .iter()
        .map(|s| Hand::new_from_str(s))
        .collect::<Result<Vec<_>, _>>()?;

    let config = EquityConfig::new()
        .with_opponents(args.opponents + known.len())
        .with_trials(args.trials)
        .with_tie_policy(args.tie_policy)
        .with_parallel(args.parallel);
    let config = match args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    };

    let street = board
        .street()
        .map_or_else(|| format!("{} board cards", board.len()), |s| s.to_string());
    let sim = EquitySimulator::new_with_opponents(hero, board, known, config)?;
    let result = sim.run()?;

    println!("Hero:         {}", sim.hero());
    println!("Board:        {} ({street})", sim.board());
    println!("Opponents:    {}", sim.config().num_opponents);
    println!("Current hand: {}", result.current_hand_label());
    println!();
    println!(
        "Equity:       {:.1}% (+/- {:.1})",
        result.win_probability_percent,
        result.standard_error_percent()
    );
    println!(
        "Win / tie / lose: {:.1}% / {:.1}% / {:.1}%",
        result.outright_win_percent(),
        result.tie_percent(),
        result.loss_percent()
    );
    println!("Trials:       {} (seed {})", result.trials(), result.seed);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.tracing.init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Unable to run the simulation");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
