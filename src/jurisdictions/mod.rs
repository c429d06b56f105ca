//! Jurisdiction-specific rules layered over the apportionment engine.

pub mod board;
pub mod colombia;
pub mod majority;

use crate::model::election::QuotaMethod;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum share of the valid vote needed to take part in the distribution,
/// kept as an exact ratio so boundary votes compare without rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub numerator: u64,
    pub denominator: u64,
}

impl Threshold {
    pub const fn new(numerator: u64, denominator: u64) -> Threshold {
        Threshold {
            numerator,
            denominator,
        }
    }

    pub fn fraction(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Votes needed to qualify, as a real number.
    pub fn minimum_votes(&self, total_votes: u64) -> f64 {
        total_votes as f64 * self.fraction()
    }

    /// `votes >= total_votes * fraction`, evaluated exactly.
    pub fn is_met(&self, votes: u64, total_votes: u64) -> bool {
        u128::from(votes) * u128::from(self.denominator)
            >= u128::from(total_votes) * u128::from(self.numerator)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.fraction() * 100.0)
    }
}

/// How an office is decided once the votes are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "method")]
pub enum ElectionRule {
    LargestRemainder(QuotaMethod),
    AbsoluteMajority,
}

impl fmt::Display for ElectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectionRule::LargestRemainder(method) => write!(f, "largest remainder ({})", method),
            ElectionRule::AbsoluteMajority => f.write_str("absolute majority"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary_is_inclusive() {
        let three_percent = Threshold::new(3, 100);

        assert!(three_percent.is_met(750_000, 25_000_000));
        assert!(!three_percent.is_met(749_999, 25_000_000));
        assert!(three_percent.is_met(800_000, 25_000_000));
        assert!(!three_percent.is_met(600_000, 25_000_000));
    }

    #[test]
    fn threshold_with_no_votes() {
        assert!(Threshold::new(3, 100).is_met(0, 0));
    }

    #[test]
    fn threshold_display() {
        assert_eq!(Threshold::new(3, 100).to_string(), "3.0%");
        assert_eq!(Threshold::new(1, 2).to_string(), "50.0%");
    }

    #[test]
    fn minimum_votes() {
        assert!((Threshold::new(3, 100).minimum_votes(25_000_000) - 750_000.0).abs() < 1e-6);
    }
}
