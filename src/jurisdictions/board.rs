//! Board of directors elections by slate (plancha), as used by Colombian
//! corporations: the quotient is the total vote over the seats to fill and
//! leftover seats go to the largest remainders.

use crate::model::election::{Candidate, ElectionContext, QuotaMethod};
use crate::tabulator::{Apportionment, Result};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOutcome {
    /// Votes across the slates that received any.
    pub total_votes: u64,
    /// `None` when no slate received votes.
    pub apportionment: Option<Apportionment>,
    /// Slates dropped for having no votes.
    pub empty_slates: Vec<Candidate>,
}

impl BoardOutcome {
    pub fn seat_map(&self) -> BTreeMap<String, u32> {
        self.apportionment
            .as_ref()
            .map(Apportionment::seat_map)
            .unwrap_or_default()
    }
}

/// Fill `seats` board seats among `slates`.
///
/// Slates without votes take no part; the rest share a Hare quotient.
pub fn apportion_board(seats: u32, slates: &[Candidate]) -> Result<BoardOutcome> {
    let (valid, empty_slates): (Vec<&Candidate>, Vec<&Candidate>) =
        slates.iter().partition(|s| s.votes > 0);
    let total_votes: u64 = valid.iter().map(|s| s.votes).sum();

    // Validates `seats` even when no slate has votes.
    crate::tabulator::quotient(QuotaMethod::Hare, total_votes, seats)?;

    let apportionment = if valid.is_empty() {
        None
    } else {
        let context = ElectionContext::new(total_votes, seats)
            .with_candidates(valid.iter().map(|s| (s.name.clone(), s.votes)));
        Some(context.assign_seats(QuotaMethod::Hare)?)
    };

    Ok(BoardOutcome {
        total_votes,
        apportionment,
        empty_slates: empty_slates.into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabulator::ApportionError;

    fn slates(entries: &[(&str, u64)]) -> Vec<Candidate> {
        entries.iter().map(|(n, v)| Candidate::new(*n, *v)).collect()
    }

    #[test]
    fn two_slates_three_seats() {
        let outcome = apportion_board(3, &slates(&[("Lista A", 345), ("Lista B", 90)])).unwrap();

        // Quotient 145: A gets 2 (remainder 55), B gets 0 (remainder 90) and then the last seat.
        let apportionment = outcome.apportionment.as_ref().unwrap();
        assert_eq!(outcome.total_votes, 435);
        assert!((apportionment.quotient - 145.0).abs() < 1e-9);
        assert_eq!(outcome.seat_map()["Lista A"], 2);
        assert_eq!(outcome.seat_map()["Lista B"], 1);
    }

    #[test]
    fn slates_without_votes_are_dropped() {
        let outcome = apportion_board(
            5,
            &slates(&[("A", 600), ("Empty", 0), ("B", 400)]),
        )
        .unwrap();

        assert_eq!(outcome.empty_slates, vec![Candidate::new("Empty", 0)]);
        assert!(!outcome.seat_map().contains_key("Empty"));
        assert_eq!(outcome.seat_map()["A"], 3);
        assert_eq!(outcome.seat_map()["B"], 2);
    }

    #[test]
    fn no_votes_at_all() {
        let outcome = apportion_board(3, &slates(&[("A", 0)])).unwrap();

        assert!(outcome.apportionment.is_none());
        assert!(outcome.seat_map().is_empty());
    }

    #[test]
    fn zero_seats_is_invalid() {
        let err = apportion_board(0, &slates(&[("A", 10)])).unwrap_err();
        assert!(matches!(err, ApportionError::InvalidConfiguration(_)));
    }
}
