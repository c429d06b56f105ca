use super::{emit, into_candidates, CandidateEntry, Output, Result};
use crate::jurisdictions::board::apportion_board;
use crate::reports::{generator, ContestReport};
use tracing::info;

/// Build the report for a board of directors election by slate.
pub fn board_report(seats: u32, entries: Vec<CandidateEntry>) -> Result<ContestReport> {
    let slates = into_candidates(entries);

    info!(seats, slates = slates.len(), "electing board");
    let outcome = apportion_board(seats, &slates)?;

    Ok(generator::generate_board_report("Board of directors", seats, &outcome))
}

pub fn board(seats: u32, entries: Vec<CandidateEntry>, output: &Output) -> Result<()> {
    let report = board_report(seats, entries)?;
    emit(&report, output)
}
