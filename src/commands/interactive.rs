use super::{
    apportion_report, colombia_report, emit, parse_votes, CandidateEntry, InputError, Output,
    Result,
};
use crate::jurisdictions::colombia::ElectionType;
use crate::model::election::{Candidate, QuotaMethod};
use crate::reports::ContestReport;
use colored::Colorize;
use std::io::{self, BufRead, Write};

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_required(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)?
            .ok_or_else(|| InputError::InvalidInput("unexpected end of input".to_string()))
    }

    fn ask_seats(&mut self, prompt: &str) -> Result<u32> {
        let raw = self.ask_required(prompt)?;
        raw.parse().map_err(|_| {
            InputError::InvalidInput(format!("'{}' is not a valid number of seats", raw))
        })
    }

    fn ask_election_type(&mut self) -> Result<ElectionType> {
        writeln!(self.output, "\nElection types:")?;
        for (i, election_type) in ElectionType::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, election_type.name().to_uppercase())?;
        }

        let raw = self.ask_required("\nSelect the election type (1-5): ")?;
        if let Ok(n) = raw.parse::<usize>() {
            return ElectionType::ALL
                .get(n.wrapping_sub(1))
                .copied()
                .ok_or_else(|| InputError::InvalidInput(format!("no election type {}", n)));
        }
        Ok(raw.parse()?)
    }

    fn ask_method(&mut self) -> Result<QuotaMethod> {
        writeln!(self.output, "\nMethods:")?;
        writeln!(self.output, "1. Hare")?;
        writeln!(self.output, "2. Droop")?;

        let raw = self.ask("Select the method (1 or 2): ")?.unwrap_or_default();
        match raw.as_str() {
            "" | "1" => Ok(QuotaMethod::Hare),
            "2" => Ok(QuotaMethod::Droop),
            other => Ok(other.parse()?),
        }
    }

    /// Read name/votes pairs until an empty name. Bad vote counts are
    /// reported and the pair is asked for again.
    fn ask_candidates(&mut self) -> Result<Vec<Candidate>> {
        writeln!(self.output, "\nEnter each candidate and its votes (empty name to finish):")?;

        let mut candidates = Vec::new();
        loop {
            let name = match self.ask("\nCandidate name (or Enter to finish): ")? {
                Some(name) if !name.is_empty() => name,
                _ => break,
            };

            let raw = self.ask_required(&format!("Votes for '{}': ", name))?;
            match parse_votes(&raw) {
                Ok(votes) => candidates.push(Candidate::new(name, votes)),
                Err(e) => {
                    writeln!(self.output, "{} {}", "Error:".red(), e)?;
                }
            }
        }

        if candidates.is_empty() {
            return Err(InputError::InvalidInput(
                "at least one candidate is required".to_string(),
            ));
        }
        Ok(candidates)
    }
}

fn entries(candidates: Vec<Candidate>) -> Vec<CandidateEntry> {
    candidates.into_iter().map(CandidateEntry).collect()
}

/// Collect an election from a prompt session and compute its report.
pub fn interactive_report<R: BufRead, W: Write>(
    input: R,
    output: W,
    colombia: bool,
) -> Result<ContestReport> {
    let mut prompter = Prompter { input, output };

    if colombia {
        let election_type = prompter.ask_election_type()?;
        let total = parse_votes(&prompter.ask_required("\nTotal valid votes: ")?)?;
        let seats = if election_type.requires_seat_count() {
            Some(prompter.ask_seats("Number of seats: ")?)
        } else {
            None
        };
        let candidates = prompter.ask_candidates()?;

        colombia_report(election_type, Some(total), seats, entries(candidates))
    } else {
        let total = parse_votes(&prompter.ask_required("Total valid votes: ")?)?;
        let seats = prompter.ask_seats("Number of seats: ")?;
        let candidates = prompter.ask_candidates()?;
        let method = prompter.ask_method()?;

        apportion_report(seats, Some(total), method, entries(candidates))
    }
}

pub fn interactive(colombia: bool, output: &Output) -> Result<()> {
    let title = if colombia {
        "ELECTORAL QUOTIENT CALCULATOR - COLOMBIA"
    } else {
        "ELECTORAL QUOTIENT CALCULATOR"
    };
    println!("{}", title.bright_cyan().bold());
    println!("{}", "=".repeat(70).bright_cyan());

    let stdin = io::stdin();
    let report = interactive_report(stdin.lock(), io::stdout(), colombia)?;
    emit(&report, output)
}
