use std::ops::{Add, AddAssign};

use super::config::MAX_OPPONENTS;

/// Largest number of ways a pot can be split: the hero plus every opponent.
const MAX_SPLIT: usize = MAX_OPPONENTS + 1;

/// Win and tie counts from some number of trials.
///
/// Ties are kept as integer counts per split size rather than as a running
/// float so that adding tallies together gives the same answer no matter
/// the order, which keeps seeded parallel runs bit for bit identical to
/// sequential ones.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    trials: u64,
    wins: u64,
    /// `split_ties[k]` counts trials where the hero's share was `1 / k`.
    split_ties: [u64; MAX_SPLIT + 1],
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_win(&mut self) {
        self.trials += 1;
        self.wins += 1;
    }

    pub fn record_loss(&mut self) {
        self.trials += 1;
    }

    /// Record a tie where the pot went `ways` ways. Anything outside of
    /// `2..=10` is clamped into it.
    pub fn record_tie(&mut self, ways: usize) {
        self.trials += 1;
        self.split_ties[ways.clamp(2, MAX_SPLIT)] += 1;
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn wins(&self) -> u64 {
        self.wins
    }

    pub fn ties(&self) -> u64 {
        self.split_ties.iter().sum()
    }

    pub fn losses(&self) -> u64 {
        self.trials - self.wins - self.ties()
    }

    /// Pots won through ties, counting each tie as its share.
    pub fn tie_credit(&self) -> f64 {
        self.split_ties
            .iter()
            .enumerate()
            .skip(2)
            .map(|(ways, &count)| count as f64 / ways as f64)
            .sum()
    }

    /// `(wins + tie credit) / trials`, as a percentage.
    pub fn equity_percent(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        (self.wins as f64 + self.tie_credit()) / self.trials as f64 * 100.0
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.trials += rhs.trials;
        self.wins += rhs.wins;
        for (mine, theirs) in self.split_ties.iter_mut().zip(rhs.split_ties) {
            *mine += theirs;
        }
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}
