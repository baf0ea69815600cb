//! `holdem_equity` estimates how often a Texas Hold'em hand wins at showdown
//! against random opponents.
//!
//! The crate is split in two:
//!
//! - [`core`] has the game agnostic pieces: cards, a bit set backed deck, and
//!   the 5 to 7 card evaluator that turns cards into a [`core::Score`].
//! - [`holdem`] has the board, the simulation config, and the monte carlo
//!   equity simulator.
//!
//! # Examples
//!
//! ```
//! use holdem_equity::holdem::simulate_equity_str;
//!
//! let result = simulate_equity_str("AhAd", "AcKhKd", 1, Some(2_000)).unwrap();
//! assert_eq!("Full House", result.current_hand_label());
//! assert!(result.win_probability_percent > 90.0);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// The holdem specific code: boards, streets, and equity simulation.
pub mod holdem;
