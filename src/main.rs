use clap::{Parser, Subcommand};
use colored::*;
use electoral_quotient::commands::{self, CandidateEntry, Output, OutputFormat};
use electoral_quotient::{ElectionType, QuotaMethod};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Seat apportionment by electoral quotient and largest remainder.
#[derive(Parser)]
#[clap(name = "electoral-quotient", version)]
struct Opts {
    /// Log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: u64,
    /// Print reports as JSON instead of text.
    #[clap(long, global = true)]
    json: bool,
    /// Also write the JSON report to this file.
    #[clap(long, global = true)]
    save: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apportion seats among candidates by largest remainder.
    Apportion {
        /// Number of seats to fill.
        #[clap(long)]
        seats: u32,
        /// Total valid votes. Defaults to the sum of the candidates' votes.
        #[clap(long)]
        total_votes: Option<u64>,
        /// Quota method: hare or droop.
        #[clap(long, default_value = "hare")]
        method: QuotaMethod,
        /// Candidates as NAME=VOTES.
        #[clap(required = true)]
        candidates: Vec<CandidateEntry>,
    },
    /// Apply the Colombian rules (threshold, seat table, absolute majority).
    Colombia {
        /// senate, house, assembly, council or mayoralty.
        election_type: ElectionType,
        /// Total valid votes. Defaults to the sum of the candidates' votes.
        #[clap(long)]
        total_votes: Option<u64>,
        /// Seat count; required for assemblies and councils.
        #[clap(long)]
        seats: Option<u32>,
        /// Parties or candidates as NAME=VOTES.
        #[clap(required = true)]
        candidates: Vec<CandidateEntry>,
    },
    /// Elect a board of directors by slate.
    Board {
        /// Number of board seats to fill.
        #[clap(long)]
        seats: u32,
        /// Slates as NAME=VOTES.
        #[clap(required = true)]
        slates: Vec<CandidateEntry>,
    },
    /// Compute a contest described in a JSON file.
    File {
        /// Contest file.
        path: PathBuf,
    },
    /// Enter an election at the prompt.
    Interactive {
        /// Use the Colombian rule table.
        #[clap(long)]
        colombia: bool,
    },
    /// Run the sample elections.
    Demo,
}

fn init_logging(verbose: u64) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    let output = Output {
        format: if opts.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        save_to: opts.save,
    };

    let result = match opts.command {
        Command::Apportion {
            seats,
            total_votes,
            method,
            candidates,
        } => commands::apportion(seats, total_votes, method, candidates, &output),
        Command::Colombia {
            election_type,
            total_votes,
            seats,
            candidates,
        } => commands::colombia(election_type, total_votes, seats, candidates, &output),
        Command::Board { seats, slates } => commands::board(seats, slates, &output),
        Command::File { path } => commands::file(&path, &output),
        Command::Interactive { colombia } => commands::interactive(colombia, &output),
        Command::Demo => commands::demo(&output),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e.to_string().red());
        std::process::exit(1);
    }
}
