//! Largest-remainder apportionment.
//!
//! Seats are handed out in two passes: every candidate first receives
//! `floor(votes / quotient)` seats, then the seats still open go one each to
//! the largest remainders. Remainder ties keep entry order.

use crate::model::election::{Candidate, ElectionContext, QuotaMethod};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApportionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid method: '{0}' (expected 'hare' or 'droop')")]
    InvalidMethod(String),
}

pub type Result<T> = std::result::Result<T, ApportionError>;

/// Electoral quotient kept as an exact ratio, so floor seats and remainders
/// come out of integer arithmetic and equal remainders compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quotient {
    pub numerator: u128,
    pub denominator: u128,
}

impl Quotient {
    /// Real value, for reporting.
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whole quotients in `votes` and what is left over, as a numerator over
    /// `self.denominator`.
    fn divide(&self, votes: u64) -> (u128, u128) {
        let scaled = u128::from(votes) * self.denominator;
        (scaled / self.numerator, scaled % self.numerator)
    }
}

/// Compute the electoral quotient for the given totals.
///
/// Hare is `votes / seats`; Droop is `votes / (seats + 1) + 1`, held as
/// `(votes + seats + 1) / (seats + 1)`.
pub fn quotient(method: QuotaMethod, total_votes: u64, total_seats: u32) -> Result<Quotient> {
    if total_seats == 0 {
        return Err(ApportionError::InvalidConfiguration(
            "the number of seats must be greater than 0".to_string(),
        ));
    }

    let votes = u128::from(total_votes);
    let seats = u128::from(total_seats);

    Ok(match method {
        QuotaMethod::Hare => Quotient {
            numerator: votes,
            denominator: seats,
        },
        QuotaMethod::Droop => Quotient {
            numerator: votes + seats + 1,
            denominator: seats + 1,
        },
    })
}

/// Seats won by one candidate in a single run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatAllocation {
    pub name: String,
    pub votes: u64,
    /// Seats won outright by the quotient.
    pub quota_seats: u32,
    /// Whether an extra seat was granted for a large remainder.
    pub remainder_seat: bool,
    pub seats: u32,
    pub remainder: f64,
}

/// Outcome of one apportionment run, rows in entry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Apportionment {
    pub method: QuotaMethod,
    pub quotient: f64,
    pub total_seats: u32,
    pub allocations: Vec<SeatAllocation>,
}

impl Apportionment {
    /// Name to seats. With duplicate names the later entry wins.
    pub fn seat_map(&self) -> BTreeMap<String, u32> {
        self.allocations
            .iter()
            .map(|a| (a.name.clone(), a.seats))
            .collect()
    }

    pub fn seats_for(&self, name: &str) -> Option<u32> {
        self.allocations
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.seats)
    }

    pub fn assigned_seats(&self) -> u64 {
        self.allocations.iter().map(|a| u64::from(a.seats)).sum()
    }

    pub fn quota_seats(&self) -> u64 {
        self.allocations.iter().map(|a| u64::from(a.quota_seats)).sum()
    }

    /// Seats left open because there were fewer candidates than leftover seats.
    pub fn unfilled_seats(&self) -> u64 {
        u64::from(self.total_seats).saturating_sub(self.assigned_seats())
    }
}

/// Run the floor/remainder distribution over `candidates`.
///
/// If more seats remain after the quotient pass than there are candidates,
/// each candidate receives at most one remainder seat and the rest stay
/// unfilled.
pub fn distribute<'a, I>(candidates: I, total_seats: u32, quotient: Quotient) -> Result<Vec<SeatAllocation>>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    if quotient.numerator == 0 {
        return Err(ApportionError::InvalidConfiguration(
            "cannot divide votes by a quotient of 0; there are no valid votes to apportion"
                .to_string(),
        ));
    }

    let mut rows: Vec<(SeatAllocation, u128)> = Vec::new();
    for candidate in candidates {
        let (whole, leftover) = quotient.divide(candidate.votes);
        let quota_seats = u32::try_from(whole).map_err(|_| {
            ApportionError::InvalidConfiguration(format!(
                "{} votes for '{}' amount to {} quotients; the total valid votes are too low",
                candidate.votes, candidate.name, whole
            ))
        })?;

        rows.push((
            SeatAllocation {
                name: candidate.name.clone(),
                votes: candidate.votes,
                quota_seats,
                remainder_seat: false,
                seats: quota_seats,
                remainder: leftover as f64 / quotient.denominator as f64,
            },
            leftover,
        ));
    }

    let assigned: u64 = rows.iter().map(|(a, _)| u64::from(a.quota_seats)).sum();
    let remaining = u64::from(total_seats).saturating_sub(assigned);

    debug!(
        quotient = quotient.value(),
        quota_seats = assigned,
        remaining,
        "quotient pass complete"
    );

    if remaining > 0 {
        let by_remainder: Vec<usize> = rows
            .iter()
            .enumerate()
            // Stable: equal remainders stay in entry order.
            .sorted_by(|(_, (_, a)), (_, (_, b))| b.cmp(a))
            .map(|(i, _)| i)
            .take(remaining as usize)
            .collect();

        for i in by_remainder {
            let allocation = &mut rows[i].0;
            allocation.remainder_seat = true;
            allocation.seats += 1;
        }

        if remaining > rows.len() as u64 {
            warn!(
                remaining,
                candidates = rows.len(),
                unfilled = remaining - rows.len() as u64,
                "not enough candidates to fill every remainder seat"
            );
        }
    }

    Ok(rows.into_iter().map(|(allocation, _)| allocation).collect())
}

impl ElectionContext {
    pub fn compute_quotient(&self, method: QuotaMethod) -> Result<f64> {
        Ok(quotient(method, self.total_valid_votes, self.total_seats)?.value())
    }

    /// Apportion `total_seats` among the candidates by largest remainder.
    ///
    /// Candidates are left untouched; every call starts from zero seats.
    pub fn assign_seats(&self, method: QuotaMethod) -> Result<Apportionment> {
        let quotient = quotient(method, self.total_valid_votes, self.total_seats)?;
        debug!(%method, quotient = quotient.value(), seats = self.total_seats, "apportioning");

        let allocations = distribute(&self.candidates, self.total_seats, quotient)?;

        Ok(Apportionment {
            method,
            quotient: quotient.value(),
            total_seats: self.total_seats,
            allocations,
        })
    }

    /// Same as [`ElectionContext::assign_seats`] with the method given by name.
    pub fn assign_seats_by_name(&self, method: &str) -> Result<Apportionment> {
        self.assign_seats(method.parse()?)
    }
}
