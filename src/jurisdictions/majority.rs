//! Single-office races decided by absolute majority (50% + 1 vote).

use crate::model::election::Candidate;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key reported in place of a winner when a second round is needed.
pub const RUNOFF_KEY: &str = "RUNOFF";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum MajorityOutcome {
    /// Nobody ran.
    NoCandidates,
    /// The leader holds more than half of the valid vote.
    Winner {
        winner: Candidate,
        standings: Vec<Candidate>,
    },
    /// No absolute majority; a second round is required.
    Runoff { standings: Vec<Candidate> },
}

impl MajorityOutcome {
    pub fn winner(&self) -> Option<&Candidate> {
        match self {
            MajorityOutcome::Winner { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub fn is_runoff(&self) -> bool {
        matches!(self, MajorityOutcome::Runoff { .. })
    }

    /// Candidates by votes, highest first; ties in entry order.
    pub fn standings(&self) -> &[Candidate] {
        match self {
            MajorityOutcome::NoCandidates => &[],
            MajorityOutcome::Winner { standings, .. } | MajorityOutcome::Runoff { standings } => {
                standings
            }
        }
    }

    /// `{winner: 1}`, `{"RUNOFF": 0}` or an empty map.
    pub fn seat_map(&self) -> BTreeMap<String, u32> {
        let mut map = BTreeMap::new();
        match self {
            MajorityOutcome::NoCandidates => {}
            MajorityOutcome::Winner { winner, .. } => {
                map.insert(winner.name.clone(), 1);
            }
            MajorityOutcome::Runoff { .. } => {
                map.insert(RUNOFF_KEY.to_string(), 0);
            }
        }
        map
    }
}

/// Votes a candidate needs to win outright: half the total plus one.
pub fn votes_to_win(total_valid_votes: u64) -> u64 {
    total_valid_votes / 2 + 1
}

/// Decide a single office by absolute majority.
///
/// The leader wins only with strictly more than half of `total_valid_votes`;
/// exactly half goes to a runoff.
pub fn resolve_majority_winner(candidates: &[Candidate], total_valid_votes: u64) -> MajorityOutcome {
    if candidates.is_empty() {
        return MajorityOutcome::NoCandidates;
    }

    let standings: Vec<Candidate> = candidates
        .iter()
        .sorted_by(|a, b| b.votes.cmp(&a.votes))
        .cloned()
        .collect();

    let leader = &standings[0];
    if u128::from(leader.votes) * 2 > u128::from(total_valid_votes) {
        MajorityOutcome::Winner {
            winner: leader.clone(),
            standings,
        }
    } else {
        MajorityOutcome::Runoff { standings }
    }
}
