use super::{
    ApportionmentReport, CandidateResult, ContestInfo, ContestReport, ExcludedCandidate,
    MajorityReport, SeatSummary, Standing,
};
use crate::jurisdictions::board::BoardOutcome;
use crate::jurisdictions::colombia::{ColombiaElection, RegionalOutcome};
use crate::jurisdictions::majority::{self, MajorityOutcome};
use crate::model::election::{percentage, ElectionContext, QuotaMethod};
use crate::tabulator::Apportionment;
use chrono::Utc;

fn contest_info(name: &str, election_type: &str) -> ContestInfo {
    ContestInfo {
        name: name.to_string(),
        election_type: election_type.to_string(),
        generated_at: Utc::now(),
    }
}

fn candidate_results(apportionment: &Apportionment, total_votes: u64) -> Vec<CandidateResult> {
    apportionment
        .allocations
        .iter()
        .map(|a| CandidateResult {
            name: a.name.clone(),
            votes: a.votes,
            percentage: percentage(a.votes, total_votes),
            quota_seats: a.quota_seats,
            remainder_seat: a.remainder_seat,
            seats: a.seats,
            remainder: a.remainder,
        })
        .collect()
}

fn seat_summary(apportionment: Option<&Apportionment>, total_seats: u32) -> SeatSummary {
    match apportionment {
        Some(a) => SeatSummary {
            assigned_seats: a.assigned_seats(),
            remainder_seats: a.assigned_seats() - a.quota_seats(),
            unfilled_seats: a.unfilled_seats(),
        },
        None => SeatSummary {
            assigned_seats: 0,
            remainder_seats: 0,
            unfilled_seats: u64::from(total_seats),
        },
    }
}

/// Report for a plain largest-remainder run over `context`.
pub fn generate_apportionment_report(
    name: &str,
    context: &ElectionContext,
    apportionment: &Apportionment,
) -> ContestReport {
    ContestReport::Apportionment(ApportionmentReport {
        info: contest_info(name, "largest-remainder"),
        total_valid_votes: context.total_valid_votes,
        quotient_basis: context.total_valid_votes,
        total_seats: apportionment.total_seats,
        method: apportionment.method,
        quotient: Some(apportionment.quotient),
        threshold_percent: None,
        results: candidate_results(apportionment, context.total_valid_votes),
        excluded: Vec::new(),
        summary: seat_summary(Some(apportionment), apportionment.total_seats),
    })
}

/// Report for a Colombian election, either rule.
pub fn generate_regional_report(
    name: &str,
    election: &ColombiaElection,
    outcome: &RegionalOutcome,
) -> ContestReport {
    let total_votes = election.total_valid_votes();

    match outcome {
        RegionalOutcome::AbsoluteMajority(majority) => ContestReport::Majority(majority_report(
            name,
            election.election_type.name(),
            total_votes,
            majority,
        )),
        RegionalOutcome::LargestRemainder(result) => {
            let method = result
                .apportionment
                .as_ref()
                .map(|a| a.method)
                .unwrap_or(QuotaMethod::Hare);
            let minimum = election.threshold.minimum_votes(total_votes);
            let excluded = result
                .excluded
                .iter()
                .map(|c| ExcludedCandidate {
                    name: c.name.clone(),
                    votes: c.votes,
                    percentage: percentage(c.votes, total_votes),
                    reason: format!(
                        "below the {} threshold of {:.0} votes",
                        election.threshold, minimum
                    ),
                })
                .collect();

            ContestReport::Apportionment(ApportionmentReport {
                info: contest_info(name, election.election_type.name()),
                total_valid_votes: total_votes,
                quotient_basis: result.qualified_votes,
                total_seats: election.total_seats(),
                method,
                quotient: result.apportionment.as_ref().map(|a| a.quotient),
                threshold_percent: Some(election.threshold.fraction() * 100.0),
                results: result
                    .apportionment
                    .as_ref()
                    .map(|a| candidate_results(a, total_votes))
                    .unwrap_or_default(),
                excluded,
                summary: seat_summary(result.apportionment.as_ref(), election.total_seats()),
            })
        }
    }
}

fn majority_report(
    name: &str,
    election_type: &str,
    total_votes: u64,
    outcome: &MajorityOutcome,
) -> MajorityReport {
    let standings = outcome
        .standings()
        .iter()
        .enumerate()
        .map(|(i, c)| Standing {
            rank: i + 1,
            name: c.name.clone(),
            votes: c.votes,
            percentage: percentage(c.votes, total_votes),
        })
        .collect();

    MajorityReport {
        info: contest_info(name, election_type),
        total_valid_votes: total_votes,
        votes_to_win: majority::votes_to_win(total_votes),
        standings,
        winner: outcome.winner().map(|c| c.name.clone()),
        runoff: outcome.is_runoff(),
    }
}

/// Report for a board of directors election.
pub fn generate_board_report(name: &str, seats: u32, outcome: &BoardOutcome) -> ContestReport {
    let excluded = outcome
        .empty_slates
        .iter()
        .map(|s| ExcludedCandidate {
            name: s.name.clone(),
            votes: 0,
            percentage: 0.0,
            reason: "no votes".to_string(),
        })
        .collect();

    ContestReport::Apportionment(ApportionmentReport {
        info: contest_info(name, "board"),
        total_valid_votes: outcome.total_votes,
        quotient_basis: outcome.total_votes,
        total_seats: seats,
        method: QuotaMethod::Hare,
        quotient: outcome.apportionment.as_ref().map(|a| a.quotient),
        threshold_percent: None,
        results: outcome
            .apportionment
            .as_ref()
            .map(|a| candidate_results(a, outcome.total_votes))
            .unwrap_or_default(),
        excluded,
        summary: seat_summary(outcome.apportionment.as_ref(), seats),
    })
}
