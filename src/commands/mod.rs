mod apportion;
mod board;
mod colombia;
mod demo;
mod file;
mod interactive;

pub use apportion::{apportion, apportion_report};
pub use board::{board, board_report};
pub use colombia::{colombia, colombia_report};
pub use demo::{demo, demo_reports};
pub use file::{file, file_report, ContestFile};
pub use interactive::{interactive, interactive_report};

use crate::model::election::Candidate;
use crate::reports::{text, ContestReport, ReportError};
use crate::tabulator::ApportionError;
use crate::util::write_serialized;
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Apportion(#[from] ApportionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Report(#[from] ReportError),
}

pub type Result<T> = std::result::Result<T, InputError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where and how reports are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub format: OutputFormat,
    /// Also write the JSON report to this file.
    pub save_to: Option<PathBuf>,
}

impl Output {
    pub fn text() -> Output {
        Output {
            format: OutputFormat::Text,
            save_to: None,
        }
    }
}

/// Print a report to stdout in the requested format.
pub fn emit(report: &ContestReport, output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Text => println!("{}", text::render(report)),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(path) = &output.save_to {
        write_serialized(path, report)?;
        eprintln!(
            "✅ Report written to {}",
            path.display().to_string().bright_green()
        );
    }
    Ok(())
}

/// Parse a vote count, allowing `,`, `.` or `_` as thousands separators.
pub fn parse_votes(raw: &str) -> Result<u64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '_'))
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::InvalidInput(format!(
            "'{}' is not a valid number of votes",
            raw.trim()
        )));
    }

    cleaned
        .parse()
        .map_err(|_| InputError::InvalidInput(format!("'{}' is too large", raw.trim())))
}

/// A `NAME=VOTES` pair given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry(pub Candidate);

impl FromStr for CandidateEntry {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref ENTRY_RX: Regex = Regex::new(r"^\s*(.+?)\s*=\s*([0-9][0-9,._]*)\s*$").unwrap();
        }

        let caps = ENTRY_RX.captures(s).ok_or_else(|| {
            InputError::InvalidInput(format!("expected NAME=VOTES, got '{}'", s))
        })?;

        let votes = parse_votes(&caps[2])?;
        Ok(CandidateEntry(Candidate::new(&caps[1], votes)))
    }
}

pub(crate) fn into_candidates(entries: Vec<CandidateEntry>) -> Vec<Candidate> {
    entries.into_iter().map(|CandidateEntry(c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries() {
        let entry: CandidateEntry = "Partido Liberal=350000".parse().unwrap();
        assert_eq!(entry.0, Candidate::new("Partido Liberal", 350_000));

        let entry: CandidateEntry = " Polo = 80,000 ".parse().unwrap();
        assert_eq!(entry.0, Candidate::new("Polo", 80_000));

        let entry: CandidateEntry = "Lista A=1.000.000".parse().unwrap();
        assert_eq!(entry.0.votes, 1_000_000);
    }

    #[test]
    fn name_may_contain_equals() {
        let entry: CandidateEntry = "A=B=100".parse().unwrap();
        assert_eq!(entry.0, Candidate::new("A=B", 100));
    }

    #[test]
    fn rejects_bad_entries() {
        assert!(matches!(
            "Liberal".parse::<CandidateEntry>(),
            Err(InputError::InvalidInput(_))
        ));
        assert!(matches!(
            "Liberal=many".parse::<CandidateEntry>(),
            Err(InputError::InvalidInput(_))
        ));
        assert!(matches!(
            "Liberal=-5".parse::<CandidateEntry>(),
            Err(InputError::InvalidInput(_))
        ));
        assert!(matches!(
            "=10".parse::<CandidateEntry>(),
            Err(InputError::InvalidInput(_))
        ));
    }

    #[test]
    fn vote_parsing() {
        assert_eq!(parse_votes("1_000").unwrap(), 1000);
        assert!(parse_votes("").is_err());
        assert!(parse_votes("12a").is_err());
        assert!(parse_votes("99999999999999999999999").is_err());
    }
}
