use super::{emit, into_candidates, CandidateEntry, Output, Result};
use crate::model::election::{ElectionContext, QuotaMethod};
use crate::reports::{generator, ContestReport};
use tracing::info;

/// Build the report for a plain largest-remainder run.
///
/// `total_votes` defaults to the sum of the entries.
pub fn apportion_report(
    seats: u32,
    total_votes: Option<u64>,
    method: QuotaMethod,
    entries: Vec<CandidateEntry>,
) -> Result<ContestReport> {
    let mut context = ElectionContext::new(0, seats);
    for candidate in into_candidates(entries) {
        context.add_candidate(candidate.name, candidate.votes);
    }
    let total = total_votes.unwrap_or_else(|| context.candidate_votes());
    context.total_valid_votes = total;

    info!(seats, total, %method, candidates = context.candidates.len(), "apportioning seats");
    let result = context.assign_seats(method)?;

    Ok(generator::generate_apportionment_report(
        "Largest remainder",
        &context,
        &result,
    ))
}

pub fn apportion(
    seats: u32,
    total_votes: Option<u64>,
    method: QuotaMethod,
    entries: Vec<CandidateEntry>,
    output: &Output,
) -> Result<()> {
    let report = apportion_report(seats, total_votes, method, entries)?;
    emit(&report, output)
}
