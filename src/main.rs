//! Triodos-to-YNAB4 converter CLI
//!
//! Reads a Triodos CSV export and writes the YNAB4 import file.
//!
//! # Usage
//!
//! ```bash
//! triodos2ynab Umsaetze_blah.CSV credit-ynab4.csv
//! triodos2ynab < export.csv > ynab.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::debug;
use triodos2ynab::{Converter, PayeeStrategy, Result};

#[derive(Parser)]
#[command(version, about = "Convert a Triodos CSV export to the YNAB4 import format")]
struct Cli {
    /// Bank export to convert; reads standard input when omitted
    input: Option<PathBuf>,

    /// Destination file; writes standard output when omitted
    output: Option<PathBuf>,

    /// Where the Payee column comes from
    #[arg(long, value_enum, default_value = "direct")]
    payee: PayeeSource,
}

/// CLI-facing names for the payee strategies; kept here so the library
/// carries no CLI dependency.
#[derive(Clone, Copy, ValueEnum)]
enum PayeeSource {
    /// Take the payee column as-is
    Direct,
    /// Fall back to the purpose text when the payee column is empty
    Heuristic,
}

impl From<PayeeSource> for PayeeStrategy {
    fn from(source: PayeeSource) -> Self {
        match source {
            PayeeSource::Direct => PayeeStrategy::Direct,
            PayeeSource::Heuristic => PayeeStrategy::Heuristic,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let converter = Converter::new(cli.payee.into())?;
    let summary = converter.convert(input, output)?;
    debug!(
        "Wrote {} rows, dropped {} balance markers",
        summary.written, summary.dropped
    );

    Ok(())
}
