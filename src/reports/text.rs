//! Human-readable rendering of contest reports.

use super::{ApportionmentReport, ContestReport, MajorityReport};
use colored::*;
use itertools::Itertools;
use std::fmt;

const WIDTH: usize = 70;

pub fn render(report: &ContestReport) -> String {
    report.to_string()
}

impl fmt::Display for ContestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContestReport::Apportionment(report) => write_apportionment(f, report),
            ContestReport::Majority(report) => write_majority(f, report),
        }
    }
}

/// Group digits in thousands: 1234567 -> "1,234,567".
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn rule(ch: &str) -> String {
    ch.repeat(WIDTH)
}

fn write_apportionment(out: &mut fmt::Formatter<'_>, report: &ApportionmentReport) -> fmt::Result {
    writeln!(out, "{}", rule("=").bright_cyan())?;
    writeln!(
        out,
        "{} - {}",
        "SEAT DISTRIBUTION".bold(),
        report.info.name.to_uppercase().bright_cyan().bold()
    )?;
    writeln!(out, "{}", rule("=").bright_cyan())?;
    writeln!(out)?;
    writeln!(out, "{}", "General data:".bold())?;
    writeln!(out, "  - Election type: {}", report.info.election_type)?;
    writeln!(out, "  - Total valid votes: {}", thousands(report.total_valid_votes))?;
    if report.quotient_basis != report.total_valid_votes {
        writeln!(out, "  - Qualified votes: {}", thousands(report.quotient_basis))?;
    }
    writeln!(out, "  - Total seats: {}", report.total_seats)?;
    if let Some(threshold) = report.threshold_percent {
        writeln!(out, "  - Threshold: {:.1}%", threshold)?;
    }
    writeln!(out, "  - Method: {}", report.method.as_str().to_uppercase())?;
    match report.quotient {
        Some(q) => writeln!(out, "  - Quotient: {:.2}", q)?,
        None => writeln!(out, "  - Quotient: {}", "n/a".dimmed())?,
    }

    writeln!(out)?;
    writeln!(out, "{}", "Results:".bold())?;
    writeln!(out, "{}", rule("-").bright_cyan())?;

    if report.results.is_empty() {
        writeln!(out, "  {}", "No candidate took part in the distribution.".yellow())?;
    }

    // Most seats first; equal seats keep entry order.
    for result in report.results.iter().sorted_by(|a, b| b.seats.cmp(&a.seats)) {
        let seats = if result.seats > 0 {
            result.seats.to_string().bright_green().bold()
        } else {
            result.seats.to_string().normal()
        };
        writeln!(out, "{}:", result.name.to_uppercase().bold())?;
        writeln!(
            out,
            "  - Votes: {} ({:.2}%)",
            thousands(result.votes),
            result.percentage
        )?;
        writeln!(
            out,
            "  - Seats: {} ({} by quotient{})",
            seats,
            result.quota_seats,
            if result.remainder_seat { ", +1 by remainder" } else { "" }
        )?;
        writeln!(out, "  - Remainder: {:.2}", result.remainder)?;
    }

    if !report.excluded.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Excluded:".bold())?;
        writeln!(out, "{}", rule("-").bright_cyan())?;
        for excluded in &report.excluded {
            writeln!(out, "{}:", excluded.name.to_uppercase().bold())?;
            writeln!(
                out,
                "  - Votes: {} ({:.2}%)",
                thousands(excluded.votes),
                excluded.percentage
            )?;
            writeln!(out, "  - Status: {}", excluded.reason.red())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "Summary:".bold())?;
    writeln!(out, "  - Seats assigned: {}", report.summary.assigned_seats)?;
    writeln!(out, "  - Seats assigned by remainder: {}", report.summary.remainder_seats)?;
    let unfilled = report.summary.unfilled_seats.to_string();
    writeln!(
        out,
        "  - Seats left unfilled: {}",
        if report.summary.unfilled_seats > 0 {
            unfilled.bright_red().bold()
        } else {
            unfilled.normal()
        }
    )?;
    writeln!(out, "{}", rule("=").bright_cyan())
}

fn write_majority(out: &mut fmt::Formatter<'_>, report: &MajorityReport) -> fmt::Result {
    writeln!(out, "{}", rule("=").bright_cyan())?;
    writeln!(
        out,
        "{} - {}",
        "ABSOLUTE MAJORITY".bold(),
        report.info.name.to_uppercase().bright_cyan().bold()
    )?;
    writeln!(out, "{}", rule("=").bright_cyan())?;
    writeln!(out)?;
    writeln!(out, "{}", "General data:".bold())?;
    writeln!(out, "  - Election type: {}", report.info.election_type)?;
    writeln!(out, "  - Total valid votes: {}", thousands(report.total_valid_votes))?;
    writeln!(out, "  - Votes needed to win: {}", thousands(report.votes_to_win))?;
    writeln!(out)?;
    writeln!(out, "{}", "Results:".bold())?;
    writeln!(out, "{}", rule("-").bright_cyan())?;

    for standing in &report.standings {
        let won = report.winner.as_deref() == Some(standing.name.as_str());
        writeln!(out, "{}. {}:", standing.rank, standing.name.to_uppercase().bold())?;
        writeln!(
            out,
            "    - Votes: {} ({:.2}%)",
            thousands(standing.votes),
            standing.percentage
        )?;
        writeln!(
            out,
            "    - Status: {}",
            if won { "WINNER".bright_green().bold() } else { "-".normal() }
        )?;
    }

    writeln!(out)?;
    match (&report.winner, report.runoff) {
        (Some(winner), _) => {
            writeln!(out, "{}", "RESULT: WON BY ABSOLUTE MAJORITY".bright_green().bold())?;
            writeln!(out, "{} is elected", winner.to_uppercase())?;
        }
        (None, true) => {
            writeln!(out, "{}", "RESULT: RUNOFF REQUIRED".yellow().bold())?;
            writeln!(out, "No candidate obtained an absolute majority (50% + 1 vote)")?;
        }
        (None, false) => {
            writeln!(out, "{}", "RESULT: NO CANDIDATES".yellow().bold())?;
        }
    }
    writeln!(out, "{}", rule("=").bright_cyan())
}
