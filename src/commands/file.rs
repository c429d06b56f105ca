use super::{emit, Output, Result};
use crate::jurisdictions::board::apportion_board;
use crate::jurisdictions::colombia::{ColombiaElection, ElectionType};
use crate::model::election::{Candidate, ElectionContext, QuotaMethod};
use crate::reports::{generator, ContestReport};
use crate::util::read_serialized;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// A contest described in a JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ContestFile {
    #[serde(rename_all = "camelCase")]
    LargestRemainder {
        name: Option<String>,
        seats: u32,
        /// Defaults to the sum of the candidates' votes.
        total_valid_votes: Option<u64>,
        /// `hare` or `droop`; defaults to `hare`.
        method: Option<String>,
        candidates: Vec<Candidate>,
    },
    #[serde(rename_all = "camelCase")]
    Colombia {
        name: Option<String>,
        election_type: ElectionType,
        total_valid_votes: Option<u64>,
        seats: Option<u32>,
        candidates: Vec<Candidate>,
    },
    #[serde(rename_all = "camelCase")]
    Board {
        name: Option<String>,
        seats: u32,
        slates: Vec<Candidate>,
    },
}

fn sum_votes(candidates: &[Candidate]) -> u64 {
    candidates.iter().map(|c| c.votes).sum()
}

impl ContestFile {
    pub fn into_report(self) -> Result<ContestReport> {
        match self {
            ContestFile::LargestRemainder {
                name,
                seats,
                total_valid_votes,
                method,
                candidates,
            } => {
                let method: QuotaMethod = match method {
                    Some(method) => method.parse()?,
                    None => QuotaMethod::default(),
                };
                let mut context = ElectionContext {
                    total_valid_votes: 0,
                    total_seats: seats,
                    candidates,
                };
                context.total_valid_votes =
                    total_valid_votes.unwrap_or_else(|| context.candidate_votes());
                let result = context.assign_seats(method)?;
                let name = name.unwrap_or_else(|| "Largest remainder".to_string());

                Ok(generator::generate_apportionment_report(&name, &context, &result))
            }
            ContestFile::Colombia {
                name,
                election_type,
                total_valid_votes,
                seats,
                candidates,
            } => {
                let total = total_valid_votes.unwrap_or_else(|| sum_votes(&candidates));
                let election = ColombiaElection::new(election_type, total, seats)?
                    .with_candidates(candidates.into_iter().map(|c| (c.name, c.votes)));
                let outcome = election.assign_seats_regional()?;
                let name = name.unwrap_or_else(|| format!("Colombia {}", election_type));

                Ok(generator::generate_regional_report(&name, &election, &outcome))
            }
            ContestFile::Board { name, seats, slates } => {
                let outcome = apportion_board(seats, &slates)?;
                let name = name.unwrap_or_else(|| "Board of directors".to_string());

                Ok(generator::generate_board_report(&name, seats, &outcome))
            }
        }
    }
}

pub fn file_report(path: &Path) -> Result<ContestReport> {
    info!(path = %path.display(), "reading contest file");
    let contest: ContestFile = read_serialized(path)?;
    contest.into_report()
}

pub fn file(path: &Path, output: &Output) -> Result<()> {
    let report = file_report(path)?;
    emit(&report, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::InputError;
    use crate::tabulator::ApportionError;

    fn parse(json: &str) -> ContestFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn largest_remainder_contest() {
        let contest = parse(
            r#"{
                "kind": "largestRemainder",
                "seats": 10,
                "totalValidVotes": 1000000,
                "method": "Droop",
                "candidates": [
                    {"name": "Liberal", "votes": 350000},
                    {"name": "Polo", "votes": 80000}
                ]
            }"#,
        );

        match contest.into_report().unwrap() {
            ContestReport::Apportionment(report) => {
                assert_eq!(report.method, QuotaMethod::Droop);
                assert_eq!(report.total_valid_votes, 1_000_000);
                assert_eq!(report.info.name, "Largest remainder");
            }
            other => panic!("unexpected report {:?}", other),
        }
    }

    #[test]
    fn unknown_method_in_file() {
        let contest = parse(
            r#"{"kind": "largestRemainder", "seats": 2, "method": "dhondt",
                "candidates": [{"name": "A", "votes": 10}]}"#,
        );

        let err = contest.into_report().unwrap_err();
        assert!(matches!(
            err,
            InputError::Apportion(ApportionError::InvalidMethod(_))
        ));
    }

    #[test]
    fn colombia_contest() {
        let contest = parse(
            r#"{"kind": "colombia", "name": "Bogota council", "electionType": "council", "seats": 45,
                "candidates": [{"name": "A", "votes": 600000}, {"name": "B", "votes": 400000}]}"#,
        );

        match contest.into_report().unwrap() {
            ContestReport::Apportionment(report) => {
                assert_eq!(report.info.name, "Bogota council");
                assert_eq!(report.summary.assigned_seats, 45);
            }
            other => panic!("unexpected report {:?}", other),
        }
    }

    #[test]
    fn board_contest() {
        let contest = parse(
            r#"{"kind": "board", "seats": 5, "slates": [{"name": "A", "votes": 70}, {"name": "B", "votes": 30}]}"#,
        );

        assert!(matches!(
            contest.into_report().unwrap(),
            ContestReport::Apportionment(_)
        ));
    }
}
