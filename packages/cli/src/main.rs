#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the normalic parsers.
//!
//! ```text
//! normalic address "201 Varick St. floor 12th, New York, NY 10014"
//! normalic address --localities zips.toml < addresses.txt
//! normalic phone --json "(212) 555-0123"
//! normalic uri example.com/a/../b
//! ```
//!
//! Each input produces one output line. With no inputs on the command line,
//! inputs are read from stdin, one per line. Inputs that do not parse print
//! an empty line (`null` with `--json`).

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use normalic_address::AddressParser;
use normalic_reference::{LocalityTable, ReferenceTables};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "normalic",
    about = "Normalize postal addresses, phone numbers and URIs"
)]
struct Cli {
    /// Print each result as a JSON object
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse US and Canadian postal addresses
    Address {
        /// TOML table of postal code localities to use instead of the
        /// built-in one
        #[arg(long)]
        localities: Option<PathBuf>,
        /// Addresses to parse (read from stdin when omitted)
        inputs: Vec<String>,
    },
    /// Parse North American phone numbers
    Phone {
        /// Phone numbers to parse (read from stdin when omitted)
        inputs: Vec<String>,
    },
    /// Split URIs into their parts
    Uri {
        /// URIs to parse (read from stdin when omitted)
        inputs: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Address { localities, inputs } => {
            let custom;
            let parser = match localities {
                Some(path) => {
                    let table = LocalityTable::from_path(&path)?;
                    log::info!("Loaded {} localities from {}", table.len(), path.display());
                    custom = AddressParser::new(ReferenceTables::default().with_localities(table))?;
                    &custom
                }
                None => AddressParser::global(),
            };

            for input in read_inputs(inputs)? {
                emit(&mut out, &input, Some(parser.parse(&input)), cli.json)?;
            }
        }
        Commands::Phone { inputs } => {
            for input in read_inputs(inputs)? {
                emit(&mut out, &input, normalic_phone::parse(&input), cli.json)?;
            }
        }
        Commands::Uri { inputs } => {
            for input in read_inputs(inputs)? {
                emit(&mut out, &input, normalic_uri::parse(&input), cli.json)?;
            }
        }
    }

    Ok(())
}

/// The command-line inputs, or stdin's non-blank lines when there are none.
fn read_inputs(inputs: Vec<String>) -> io::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }
    lines(io::stdin().lock())
}

fn lines(reader: impl BufRead) -> io::Result<Vec<String>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(line) if line.trim().is_empty()))
        .collect()
}

fn emit<T: Serialize + Display>(
    out: &mut impl Write,
    input: &str,
    parsed: Option<T>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&parsed)?)?;
        return Ok(());
    }

    match parsed {
        Some(value) => writeln!(out, "{value}")?,
        None => {
            log::warn!("Unable to parse {input:?}");
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted<T: Serialize + Display>(parsed: Option<T>, json: bool) -> String {
        let mut out = Vec::new();
        emit(&mut out, "input", parsed, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["normalic", "phone", "--json", "212 555 0123"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Phone { inputs } if inputs == ["212 555 0123"]));

        let cli = Cli::try_parse_from(["normalic", "address", "--localities", "zips.toml"]).unwrap();
        assert!(!cli.json);
        assert!(matches!(
            cli.command,
            Commands::Address { localities: Some(_), inputs } if inputs.is_empty()
        ));

        assert!(Cli::try_parse_from(["normalic", "email", "a@b.com"]).is_err());
    }

    #[test]
    fn emits_rendered_text() {
        let address = normalic_address::parse("201 Varick St. floor 12th, New York, NY 10014");
        assert_eq!(
            emitted(Some(address), false),
            "201 Varick St., New York, NY 10014\n"
        );
        assert_eq!(emitted(normalic_phone::parse("555"), false), "\n");
    }

    #[test]
    fn emits_json() {
        let phone = normalic_phone::parse("(212) 555-0123");
        assert_eq!(
            emitted(phone, true),
            "{\"npa\":\"212\",\"nxx\":\"555\",\"slid\":\"0123\"}\n"
        );
        assert_eq!(emitted(normalic_uri::parse("localhost"), true), "null\n");
    }

    #[test]
    fn skips_blank_stdin_lines() {
        let input = "example.com\n\n   \nexample.org\n";
        assert_eq!(lines(input.as_bytes()).unwrap(), ["example.com", "example.org"]);
    }
}
