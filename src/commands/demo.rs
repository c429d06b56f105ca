use super::{emit, Output, Result};
use crate::jurisdictions::board::apportion_board;
use crate::jurisdictions::colombia::{ColombiaElection, ElectionType};
use crate::model::election::{Candidate, ElectionContext, QuotaMethod};
use crate::reports::{generator, ContestReport};
use colored::Colorize;

const NATIONAL_LIST: [(&str, u64); 6] = [
    ("Partido Liberal", 350_000),
    ("Partido Conservador", 280_000),
    ("Partido Verde", 150_000),
    ("Centro Democrático", 120_000),
    ("Polo Democrático", 80_000),
    ("Otros partidos", 20_000),
];

const SENATE: [(&str, u64); 9] = [
    ("Partido Liberal", 8_500_000),
    ("Partido Conservador", 7_200_000),
    ("Centro Democrático", 3_800_000),
    ("Partido Verde", 2_200_000),
    ("Polo Democrático", 1_800_000),
    ("Comunes", 800_000),
    ("Partido de la U", 600_000),
    ("Cambio Radical", 400_000),
    ("Otros partidos menores", 2_000_000),
];

const MAYORALTY: [(&str, u64); 4] = [
    ("Juan Pérez", 180_000),
    ("María García", 160_000),
    ("Carlos López", 120_000),
    ("Ana Rodríguez", 40_000),
];

const BOARD: [(&str, u64); 2] = [("Lista A", 345), ("Lista B", 90)];

/// The sample elections, Hare and Droop side by side first.
pub fn demo_reports() -> Result<Vec<(&'static str, ContestReport)>> {
    let mut reports = Vec::new();

    let context = ElectionContext::new(1_000_000, 10).with_candidates(NATIONAL_LIST.iter().copied());
    for method in [QuotaMethod::Hare, QuotaMethod::Droop].iter().copied() {
        let result = context.assign_seats(method)?;
        let name = format!("Example list election ({})", method);
        reports.push((
            "Generic largest remainder",
            generator::generate_apportionment_report(&name, &context, &result),
        ));
    }

    let senate = ColombiaElection::new(ElectionType::Senate, 25_000_000, None)?
        .with_candidates(SENATE.iter().copied());
    let outcome = senate.assign_seats_regional()?;
    reports.push((
        "Senate election - Colombia",
        generator::generate_regional_report("Senate", &senate, &outcome),
    ));

    let mayoralty = ColombiaElection::new(ElectionType::Mayoralty, 500_000, None)?
        .with_candidates(MAYORALTY.iter().copied());
    let outcome = mayoralty.assign_seats_regional()?;
    reports.push((
        "Mayoralty election - Colombia",
        generator::generate_regional_report("Mayoralty", &mayoralty, &outcome),
    ));

    let slates: Vec<Candidate> = BOARD.iter().map(|(n, v)| Candidate::new(*n, *v)).collect();
    let outcome = apportion_board(3, &slates)?;
    reports.push((
        "Board of directors",
        generator::generate_board_report("Board of directors", 3, &outcome),
    ));

    Ok(reports)
}

pub fn demo(output: &Output) -> Result<()> {
    for (heading, report) in demo_reports()? {
        println!("\n{} {}", "📊".bright_yellow(), heading.bright_yellow().bold());
        emit(&report, output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_covers_every_rule() {
        let reports = demo_reports().unwrap();
        assert_eq!(reports.len(), 5);

        let kinds: Vec<&str> = reports
            .iter()
            .map(|(_, r)| match r {
                ContestReport::Apportionment(a) => a.info.election_type.as_str(),
                ContestReport::Majority(m) => m.info.election_type.as_str(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["largest-remainder", "largest-remainder", "senate", "mayoralty", "board"]
        );
    }

    #[test]
    fn demo_mayoralty_goes_to_runoff() {
        let reports = demo_reports().unwrap();

        match &reports[3].1 {
            ContestReport::Majority(report) => assert!(report.runoff),
            other => panic!("unexpected report {:?}", other),
        }
    }

    #[test]
    fn demo_senate_fills_every_seat() {
        let reports = demo_reports().unwrap();

        match &reports[2].1 {
            ContestReport::Apportionment(report) => {
                assert_eq!(report.summary.assigned_seats, 100);
                assert_eq!(report.excluded.len(), 2);
            }
            other => panic!("unexpected report {:?}", other),
        }
    }
}
