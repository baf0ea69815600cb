/// Community cards and the street they put the hand on.
mod board;
/// Export `Board` and `Street`
pub use self::board::{Board, MAX_BOARD_CARDS, Street};

/// Module for the knobs a simulation run takes.
mod config;
/// Export `EquityConfig` and `TiePolicy`
pub use self::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_TRIALS, EquityConfig, MAX_OPPONENTS, TiePolicy,
};

/// Win, tie, and loss counts that add up across batches.
mod tally;
/// Export `Tally`
pub use self::tally::Tally;

/// Module for the monte carlo equity simulator.
mod equity;
/// Export the simulator, its results, and the convenience entry points.
pub use self::equity::{
    EquityResult, EquitySimulator, SimulationOutcome, simulate_equity,
    simulate_equity_str, simulate_equity_with_config,
};
