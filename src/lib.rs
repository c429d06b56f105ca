//! Seat apportionment by electoral quotient and largest remainder (Hare and
//! Droop), with the Colombian public-election rules and board-of-directors
//! slate elections layered on top.

pub mod commands;
pub mod jurisdictions;
pub mod model;
pub mod reports;
pub mod tabulator;
pub mod util;

pub use jurisdictions::board::{apportion_board, BoardOutcome};
pub use jurisdictions::colombia::{ColombiaElection, ElectionType, RegionalOutcome};
pub use jurisdictions::majority::{resolve_majority_winner, MajorityOutcome, RUNOFF_KEY};
pub use jurisdictions::{ElectionRule, Threshold};
pub use model::election::{Candidate, ElectionContext, QuotaMethod};
pub use tabulator::{ApportionError, Apportionment, Quotient, SeatAllocation};
