//! Colombian public elections: Senate, House, departmental assemblies,
//! municipal councils and mayoralties.

use super::majority::{self, MajorityOutcome};
use super::{ElectionRule, Threshold};
use crate::model::election::{Candidate, ElectionContext, QuotaMethod};
use crate::tabulator::{self, ApportionError, Apportionment, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionType {
    Senate,
    House,
    Assembly,
    Council,
    Mayoralty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatCount {
    Fixed(u32),
    /// Set per department or municipality; the caller must supply it.
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionalConfig {
    pub seats: SeatCount,
    pub threshold: Threshold,
    pub rule: ElectionRule,
}

const LEGISLATIVE_THRESHOLD: Threshold = Threshold::new(3, 100);
const MAJORITY_THRESHOLD: Threshold = Threshold::new(1, 2);

impl ElectionType {
    pub const ALL: [ElectionType; 5] = [
        ElectionType::Senate,
        ElectionType::House,
        ElectionType::Assembly,
        ElectionType::Council,
        ElectionType::Mayoralty,
    ];

    pub const fn config(&self) -> RegionalConfig {
        match self {
            ElectionType::Senate => RegionalConfig {
                seats: SeatCount::Fixed(100),
                threshold: LEGISLATIVE_THRESHOLD,
                rule: ElectionRule::LargestRemainder(QuotaMethod::Hare),
            },
            ElectionType::House => RegionalConfig {
                seats: SeatCount::Fixed(166),
                threshold: LEGISLATIVE_THRESHOLD,
                rule: ElectionRule::LargestRemainder(QuotaMethod::Hare),
            },
            ElectionType::Assembly | ElectionType::Council => RegionalConfig {
                seats: SeatCount::Variable,
                threshold: LEGISLATIVE_THRESHOLD,
                rule: ElectionRule::LargestRemainder(QuotaMethod::Hare),
            },
            ElectionType::Mayoralty => RegionalConfig {
                seats: SeatCount::Fixed(1),
                threshold: MAJORITY_THRESHOLD,
                rule: ElectionRule::AbsoluteMajority,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElectionType::Senate => "senate",
            ElectionType::House => "house",
            ElectionType::Assembly => "assembly",
            ElectionType::Council => "council",
            ElectionType::Mayoralty => "mayoralty",
        }
    }

    pub fn requires_seat_count(&self) -> bool {
        self.config().seats == SeatCount::Variable
    }
}

impl fmt::Display for ElectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElectionType {
    type Err = ApportionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "senate" | "senado" => Ok(ElectionType::Senate),
            "house" | "camara" | "cámara" => Ok(ElectionType::House),
            "assembly" | "asamblea" => Ok(ElectionType::Assembly),
            "council" | "concejo" => Ok(ElectionType::Council),
            "mayoralty" | "mayor" | "alcaldia" | "alcaldía" => Ok(ElectionType::Mayoralty),
            other => Err(ApportionError::InvalidConfiguration(format!(
                "unknown election type '{}'",
                other
            ))),
        }
    }
}

/// Result of applying the Colombian rules to one election.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "rule")]
pub enum RegionalOutcome {
    LargestRemainder(ThresholdApportionment),
    AbsoluteMajority(MajorityOutcome),
}

impl RegionalOutcome {
    pub fn seat_map(&self) -> BTreeMap<String, u32> {
        match self {
            RegionalOutcome::LargestRemainder(result) => result.seat_map(),
            RegionalOutcome::AbsoluteMajority(outcome) => outcome.seat_map(),
        }
    }
}

/// Largest-remainder run restricted to the lists that met the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdApportionment {
    /// Sum of qualified votes, the base of the quotient.
    pub qualified_votes: u64,
    /// `None` when no list met the threshold.
    pub apportionment: Option<Apportionment>,
    /// Lists below the threshold; they hold no seats.
    pub excluded: Vec<Candidate>,
}

impl ThresholdApportionment {
    /// Seats for the qualified lists only.
    pub fn seat_map(&self) -> BTreeMap<String, u32> {
        self.apportionment
            .as_ref()
            .map(Apportionment::seat_map)
            .unwrap_or_default()
    }
}

/// An election under the Colombian rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColombiaElection {
    pub election_type: ElectionType,
    pub threshold: Threshold,
    pub rule: ElectionRule,
    context: ElectionContext,
}

impl ColombiaElection {
    /// Look up the rules for `election_type`.
    ///
    /// `seat_override` replaces the table's seat count and is mandatory for
    /// assemblies and councils.
    pub fn new(
        election_type: ElectionType,
        total_valid_votes: u64,
        seat_override: Option<u32>,
    ) -> Result<ColombiaElection> {
        let config = election_type.config();

        let total_seats = match (seat_override, config.seats) {
            (Some(0), _) => {
                return Err(ApportionError::InvalidConfiguration(
                    "the number of seats must be greater than 0".to_string(),
                ))
            }
            (Some(seats), _) => seats,
            (None, SeatCount::Fixed(seats)) => seats,
            (None, SeatCount::Variable) => {
                return Err(ApportionError::InvalidConfiguration(format!(
                    "{} elections have a variable number of seats; a seat count is required",
                    election_type
                )))
            }
        };

        Ok(ColombiaElection {
            election_type,
            threshold: config.threshold,
            rule: config.rule,
            context: ElectionContext::new(total_valid_votes, total_seats),
        })
    }

    pub fn add_candidate(&mut self, name: impl Into<String>, votes: u64) {
        self.context.add_candidate(name, votes);
    }

    pub fn with_candidates<I, S>(mut self, candidates: I) -> ColombiaElection
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        self.context = self.context.with_candidates(candidates);
        self
    }

    pub fn total_seats(&self) -> u32 {
        self.context.total_seats
    }

    pub fn total_valid_votes(&self) -> u64 {
        self.context.total_valid_votes
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.context.candidates
    }

    pub fn percentage_of_votes(&self, candidate: &Candidate) -> f64 {
        self.context.percentage_of_votes(candidate)
    }

    /// Candidates at or above the threshold, in entry order.
    pub fn filter_by_threshold(&self) -> Vec<&Candidate> {
        let total = self.context.total_valid_votes;
        self.context
            .candidates
            .iter()
            .filter(|c| self.threshold.is_met(c.votes, total))
            .collect()
    }

    /// Candidates below the threshold, in entry order.
    pub fn excluded_by_threshold(&self) -> Vec<&Candidate> {
        let total = self.context.total_valid_votes;
        self.context
            .candidates
            .iter()
            .filter(|c| !self.threshold.is_met(c.votes, total))
            .collect()
    }

    pub fn assign_seats_regional(&self) -> Result<RegionalOutcome> {
        let method = match self.rule {
            ElectionRule::AbsoluteMajority => {
                return Ok(RegionalOutcome::AbsoluteMajority(
                    self.resolve_majority_winner(),
                ))
            }
            ElectionRule::LargestRemainder(method) => method,
        };

        let qualified = self.filter_by_threshold();
        let excluded: Vec<Candidate> = self.excluded_by_threshold().into_iter().cloned().collect();
        let qualified_votes: u64 = qualified.iter().map(|c| c.votes).sum();

        debug!(
            election = %self.election_type,
            qualified = qualified.len(),
            excluded = excluded.len(),
            qualified_votes,
            "threshold applied"
        );

        // Nothing to divide when the qualified lists hold no votes.
        if qualified_votes == 0 {
            return Ok(RegionalOutcome::LargestRemainder(ThresholdApportionment {
                qualified_votes,
                apportionment: None,
                excluded,
            }));
        }

        let total_seats = self.context.total_seats;
        let quotient = tabulator::quotient(method, qualified_votes, total_seats)?;
        let allocations = tabulator::distribute(qualified, total_seats, quotient)?;

        Ok(RegionalOutcome::LargestRemainder(ThresholdApportionment {
            qualified_votes,
            apportionment: Some(Apportionment {
                method,
                quotient: quotient.value(),
                total_seats,
                allocations,
            }),
            excluded,
        }))
    }

    pub fn resolve_majority_winner(&self) -> MajorityOutcome {
        majority::resolve_majority_winner(&self.context.candidates, self.context.total_valid_votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn senate() -> ColombiaElection {
        ColombiaElection::new(ElectionType::Senate, 25_000_000, None)
            .unwrap()
            .with_candidates(vec![
                ("Liberal", 8_500_000),
                ("Conservative", 7_200_000),
                ("Centro Democratico", 3_800_000),
                ("Green", 2_200_000),
                ("Polo", 1_800_000),
                ("Comunes", 800_000),
                ("La U", 600_000),
                ("Cambio Radical", 400_000),
            ])
    }

    #[test]
    fn rule_table() {
        assert_eq!(ElectionType::Senate.config().seats, SeatCount::Fixed(100));
        assert_eq!(ElectionType::House.config().seats, SeatCount::Fixed(166));
        assert_eq!(ElectionType::Assembly.config().seats, SeatCount::Variable);
        assert_eq!(ElectionType::Council.config().seats, SeatCount::Variable);
        assert_eq!(ElectionType::Mayoralty.config().seats, SeatCount::Fixed(1));

        for t in &ElectionType::ALL[..4] {
            assert_eq!(t.config().threshold, Threshold::new(3, 100));
            assert_eq!(t.config().rule, ElectionRule::LargestRemainder(QuotaMethod::Hare));
        }
        assert_eq!(ElectionType::Mayoralty.config().threshold.fraction(), 0.5);
        assert_eq!(ElectionType::Mayoralty.config().rule, ElectionRule::AbsoluteMajority);
    }

    #[test]
    fn election_type_names() {
        assert_eq!("Senado".parse::<ElectionType>().unwrap(), ElectionType::Senate);
        assert_eq!("council".parse::<ElectionType>().unwrap(), ElectionType::Council);
        assert_eq!("alcaldia".parse::<ElectionType>().unwrap(), ElectionType::Mayoralty);
        assert!("parliament".parse::<ElectionType>().is_err());
    }

    #[test]
    fn variable_seats_require_override() {
        let err = ColombiaElection::new(ElectionType::Council, 100_000, None).unwrap_err();
        assert!(matches!(err, ApportionError::InvalidConfiguration(_)));

        let council = ColombiaElection::new(ElectionType::Council, 100_000, Some(19)).unwrap();
        assert_eq!(council.total_seats(), 19);
    }

    #[test]
    fn zero_override_is_invalid() {
        let err = ColombiaElection::new(ElectionType::Senate, 100_000, Some(0)).unwrap_err();
        assert!(matches!(err, ApportionError::InvalidConfiguration(_)));
    }

    #[test]
    fn override_replaces_fixed_seats() {
        let senate = ColombiaElection::new(ElectionType::Senate, 100_000, Some(108)).unwrap();
        assert_eq!(senate.total_seats(), 108);
    }

    #[test]
    fn threshold_filter() {
        let election = senate();
        let qualified: Vec<&str> = election
            .filter_by_threshold()
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        // 3% of 25M is 750,000.
        assert_eq!(
            qualified,
            vec!["Liberal", "Conservative", "Centro Democratico", "Green", "Polo", "Comunes"]
        );

        let excluded: Vec<&str> = election
            .excluded_by_threshold()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(excluded, vec!["La U", "Cambio Radical"]);
    }

    #[test]
    fn regional_apportionment_uses_qualified_votes() {
        let outcome = senate().assign_seats_regional().unwrap();

        let result = match &outcome {
            RegionalOutcome::LargestRemainder(result) => result,
            other => panic!("unexpected outcome {:?}", other),
        };

        assert_eq!(result.qualified_votes, 24_300_000);
        let apportionment = result.apportionment.as_ref().unwrap();
        assert!((apportionment.quotient - 243_000.0).abs() < 1e-9);
        assert_eq!(apportionment.assigned_seats(), 100);

        let map = outcome.seat_map();
        assert_eq!(map.len(), 6);
        assert!(!map.contains_key("La U"));
        assert!(!map.contains_key("Cambio Radical"));
        assert_eq!(map["Liberal"], 35);
        assert_eq!(map["Conservative"], 30);
    }

    #[test]
    fn nobody_qualifies() {
        let election = ColombiaElection::new(ElectionType::Council, 1_000_000, Some(7))
            .unwrap()
            .with_candidates(vec![("A", 10_000), ("B", 20_000)]);

        let outcome = election.assign_seats_regional().unwrap();
        assert!(outcome.seat_map().is_empty());
    }

    #[test]
    fn zero_votes_yield_empty_mapping() {
        let election = ColombiaElection::new(ElectionType::Council, 0, Some(5))
            .unwrap()
            .with_candidates(vec![("A", 0), ("B", 0)]);

        match election.assign_seats_regional().unwrap() {
            RegionalOutcome::LargestRemainder(result) => {
                assert_eq!(result.qualified_votes, 0);
                assert!(result.apportionment.is_none());
                assert!(result.excluded.is_empty());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn no_candidates_yields_empty_mapping() {
        let election = ColombiaElection::new(ElectionType::Senate, 1_000_000, None).unwrap();
        let outcome = election.assign_seats_regional().unwrap();

        assert!(outcome.seat_map().is_empty());
    }

    #[test]
    fn mayoralty_runoff() {
        let election = ColombiaElection::new(ElectionType::Mayoralty, 500_000, None)
            .unwrap()
            .with_candidates(vec![("A", 180_000), ("B", 160_000), ("C", 120_000), ("D", 40_000)]);

        let map = election.assign_seats_regional().unwrap().seat_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(majority::RUNOFF_KEY), Some(&0));
    }

    #[test]
    fn mayoralty_outright_winner() {
        let election = ColombiaElection::new(ElectionType::Mayoralty, 500_000, None)
            .unwrap()
            .with_candidates(vec![("A", 260_000), ("B", 150_000), ("C", 90_000)]);

        let map = election.assign_seats_regional().unwrap().seat_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("A"), Some(&1));
    }

    #[test]
    fn mayoralty_with_no_candidates() {
        let election = ColombiaElection::new(ElectionType::Mayoralty, 500_000, None).unwrap();
        assert!(election.assign_seats_regional().unwrap().seat_map().is_empty());
    }
}
