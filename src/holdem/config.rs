use std::fmt;
use std::str::FromStr;

use crate::core::PokerError;

/// Trials used when the caller doesn't pick a number.
pub const DEFAULT_TRIALS: usize = 1_500;
/// Trials run between cancellation checks.
pub const DEFAULT_BATCH_SIZE: usize = 250;
/// Most opponents the simulator will seat against the hero.
pub const MAX_OPPONENTS: usize = 9;

/// How a trial that the hero ties is credited.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TiePolicy {
    /// The pot is split only between the players holding the best hand. A
    /// hero tying with one of three opponents gets half.
    #[default]
    SplitAmongTied,
    /// Every tie is worth `1 / (opponents + 1)` no matter how many players
    /// actually share the best hand.
    EvenSeatShare,
}

impl TiePolicy {
    /// How many ways the pot is split when the hero ties. The hero's share
    /// is one over this.
    ///
    /// `tied_opponents` is how many opponents hold the same best hand as the
    /// hero, so it's at least 1 for a tie.
    pub fn split_ways(self, tied_opponents: usize, num_opponents: usize) -> usize {
        match self {
            Self::SplitAmongTied => tied_opponents + 1,
            Self::EvenSeatShare => num_opponents + 1,
        }
    }
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SplitAmongTied => "split",
            Self::EvenSeatShare => "even",
        })
    }
}

impl FromStr for TiePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "split" | "split-among-tied" => Ok(Self::SplitAmongTied),
            "even" | "even-seat-share" => Ok(Self::EvenSeatShare),
            other => Err(format!("unknown tie policy {other:?}, use split or even")),
        }
    }
}

/// Everything about a simulation except the cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EquityConfig {
    /// Number of opponents, 1 to 9. Seats without a known hand are dealt
    /// random hole cards.
    pub num_opponents: usize,
    /// Number of trials to run.
    pub trials: usize,
    /// Optional random seed for reproducibility
    pub seed: Option<u64>,
    pub tie_policy: TiePolicy,
    /// Trials per batch. Each batch gets its own rng and cancellation is
    /// checked between batches.
    pub batch_size: usize,
    /// Run batches on the rayon thread pool. Only has an effect with the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            num_opponents: 1,
            trials: DEFAULT_TRIALS,
            seed: None,
            tie_policy: TiePolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: false,
        }
    }
}

impl EquityConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opponents(mut self, num_opponents: usize) -> Self {
        self.num_opponents = num_opponents;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PokerError> {
        if self.num_opponents == 0 {
            return Err(PokerError::NoOpponents);
        }
        if self.num_opponents > MAX_OPPONENTS {
            return Err(PokerError::TooManyOpponents(self.num_opponents));
        }
        if self.trials == 0 {
            return Err(PokerError::ZeroTrials);
        }
        if self.batch_size == 0 {
            return Err(PokerError::ZeroBatchSize);
        }
        Ok(())
    }

    /// How many batches the trials split into. The last one may be short.
    pub fn num_batches(&self) -> usize {
        self.trials.div_ceil(self.batch_size)
    }

    /// Trials in batch `idx`.
    pub fn batch_trials(&self, idx: usize) -> usize {
        let start = idx * self.batch_size;
        self.batch_size.min(self.trials.saturating_sub(start))
    }
}
