use super::{emit, into_candidates, CandidateEntry, Output, Result};
use crate::jurisdictions::colombia::{ColombiaElection, ElectionType};
use crate::reports::{generator, ContestReport};
use tracing::info;

/// Build the report for an election under the Colombian rule table.
///
/// `total_votes` defaults to the sum of the entries.
pub fn colombia_report(
    election_type: ElectionType,
    total_votes: Option<u64>,
    seats: Option<u32>,
    entries: Vec<CandidateEntry>,
) -> Result<ContestReport> {
    let candidates = into_candidates(entries);
    let total = total_votes.unwrap_or_else(|| candidates.iter().map(|c| c.votes).sum());

    let mut election = ColombiaElection::new(election_type, total, seats)?;
    for candidate in candidates {
        election.add_candidate(candidate.name, candidate.votes);
    }

    info!(
        election = %election_type,
        seats = election.total_seats(),
        total,
        rule = %election.rule,
        "applying Colombian rules"
    );
    let outcome = election.assign_seats_regional()?;

    let name = format!("Colombia {}", election_type);
    Ok(generator::generate_regional_report(&name, &election, &outcome))
}

pub fn colombia(
    election_type: ElectionType,
    total_votes: Option<u64>,
    seats: Option<u32>,
    entries: Vec<CandidateEntry>,
    output: &Output,
) -> Result<()> {
    let report = colombia_report(election_type, total_votes, seats, entries)?;
    emit(&report, output)
}
