use crate::tabulator::ApportionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A party, list or slate competing for seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub votes: u64,
}

impl Candidate {
    pub fn new(name: impl Into<String>, votes: u64) -> Candidate {
        Candidate {
            name: name.into(),
            votes,
        }
    }
}

/// Quota used to size the electoral quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaMethod {
    /// total votes / seats
    Hare,
    /// total votes / (seats + 1) + 1
    Droop,
}

impl QuotaMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaMethod::Hare => "hare",
            QuotaMethod::Droop => "droop",
        }
    }
}

impl Default for QuotaMethod {
    fn default() -> Self {
        QuotaMethod::Hare
    }
}

impl fmt::Display for QuotaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotaMethod {
    type Err = ApportionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hare" => Ok(QuotaMethod::Hare),
            "droop" => Ok(QuotaMethod::Droop),
            other => Err(ApportionError::InvalidMethod(other.to_string())),
        }
    }
}

/// Totals and entrants for a single apportionment computation.
///
/// Candidates keep their entry order; that order is the tie-break when two
/// remainders are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionContext {
    pub total_valid_votes: u64,
    pub total_seats: u32,
    pub candidates: Vec<Candidate>,
}

impl ElectionContext {
    pub fn new(total_valid_votes: u64, total_seats: u32) -> ElectionContext {
        ElectionContext {
            total_valid_votes,
            total_seats,
            candidates: Vec::new(),
        }
    }

    /// Appends a candidate. Duplicate names are accepted as-is.
    pub fn add_candidate(&mut self, name: impl Into<String>, votes: u64) {
        self.candidates.push(Candidate::new(name, votes));
    }

    pub fn with_candidates<I, S>(mut self, candidates: I) -> ElectionContext
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        for (name, votes) in candidates {
            self.add_candidate(name, votes);
        }
        self
    }

    pub fn candidate_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.votes).sum()
    }

    /// Vote share of `candidate` against the context total, in percent.
    pub fn percentage_of_votes(&self, candidate: &Candidate) -> f64 {
        percentage(candidate.votes, self.total_valid_votes)
    }
}

pub(crate) fn percentage(votes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    votes as f64 / total as f64 * 100.0
}
