use crate::model::election::QuotaMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod generator;
pub mod text;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Any report the tool can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ContestReport {
    Apportionment(ApportionmentReport),
    Majority(MajorityReport),
}

impl ContestReport {
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Seat distribution for a list election.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApportionmentReport {
    pub info: ContestInfo,
    #[serde(rename = "totalValidVotes")]
    pub total_valid_votes: u64,
    /// Votes the quotient was computed from, when it differs from the total.
    #[serde(rename = "quotientBasis")]
    pub quotient_basis: u64,
    #[serde(rename = "totalSeats")]
    pub total_seats: u32,
    pub method: QuotaMethod,
    /// Absent when nobody took part in the distribution.
    pub quotient: Option<f64>,
    /// Qualifying threshold as a percentage of the valid vote.
    #[serde(rename = "thresholdPercent")]
    pub threshold_percent: Option<f64>,
    pub results: Vec<CandidateResult>,
    /// Entrants that took no part in the distribution.
    pub excluded: Vec<ExcludedCandidate>,
    pub summary: SeatSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestInfo {
    pub name: String,
    #[serde(rename = "electionType")]
    pub election_type: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub name: String,
    pub votes: u64,
    pub percentage: f64,
    #[serde(rename = "quotaSeats")]
    pub quota_seats: u32,
    #[serde(rename = "remainderSeat")]
    pub remainder_seat: bool,
    pub seats: u32,
    pub remainder: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedCandidate {
    pub name: String,
    pub votes: u64,
    pub percentage: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatSummary {
    #[serde(rename = "assignedSeats")]
    pub assigned_seats: u64,
    #[serde(rename = "remainderSeats")]
    pub remainder_seats: u64,
    #[serde(rename = "unfilledSeats")]
    pub unfilled_seats: u64,
}

/// Single-office race decided by absolute majority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorityReport {
    pub info: ContestInfo,
    #[serde(rename = "totalValidVotes")]
    pub total_valid_votes: u64,
    #[serde(rename = "votesToWin")]
    pub votes_to_win: u64,
    pub standings: Vec<Standing>,
    pub winner: Option<String>,
    pub runoff: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub votes: u64,
    pub percentage: f64,
}
