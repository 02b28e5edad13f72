//! chk-isbn - calculate check digits for, and parse and validate, ISBNs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chk_isbn::validation::{normalize, ISBN10_LEN, ISBN13_LEN};
use chk_isbn::{calc_check_digit, Isbn, RangeStore};

#[derive(Parser)]
#[command(name = "chk-isbn")]
#[command(version, about = "Calculate ISBN check digits, or parse and validate ISBNs", long_about = None)]
#[command(after_help = "EXAMPLES:
    chk-isbn -c 054792824              Calculate the check digit of an ISBN-10
    chk-isbn -p 978-0-547-92824-1      Parse and validate an ISBN-13
    chk-isbn --json 0547928246         Print the parsed ISBN as JSON")]
struct Cli {
    /// Calculate check-digit(s) (does not parse/validate)
    #[arg(short = 'c', long = "check-digit")]
    check_digit: bool,

    /// Parse and validate ISBN(s) (the default)
    #[arg(short = 'p', long)]
    parse: bool,

    /// RangeMessage.xml to parse against
    #[arg(long, value_name = "PATH", env = "ISBN_RANGE_FILE")]
    range_file: Option<PathBuf>,

    /// Print parsed ISBNs as JSON objects
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// ISBN(s) to check
    #[arg(value_name = "ISBN", required = true)]
    isbns: Vec<String>,
}

#[derive(Serialize)]
struct JsonIsbn<'a> {
    input: &'a str,
    #[serde(flatten)]
    isbn: &'a Isbn,
    isbn13: Option<String>,
    isbn10: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    CheckDigit,
    Parse,
}

/// The first of `-c`/`-p` on the command line picks the mode.
fn select_mode(matches: &ArgMatches) -> Mode {
    let position = |id: &str| {
        (matches.value_source(id) == Some(ValueSource::CommandLine))
            .then(|| matches.index_of(id).unwrap_or(usize::MAX))
    };
    match (position("check_digit"), position("parse")) {
        (Some(check), Some(parse)) if check < parse => Mode::CheckDigit,
        (Some(_), None) => Mode::CheckDigit,
        _ => Mode::Parse,
    }
}

fn main() -> ExitCode {
    let matches = Cli::command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    init_tracing(cli.verbose);

    let result = match select_mode(&matches) {
        Mode::CheckDigit => {
            check_digits(&cli.isbns);
            Ok(())
        },
        Mode::Parse => parse_and_validate(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn check_digits(inputs: &[String]) {
    for input in inputs {
        // A body without its check digit gets a placeholder one
        let mut isbn = normalize(input);
        if isbn.len() == ISBN10_LEN - 1 || isbn.len() == ISBN13_LEN - 1 {
            isbn.push('0');
        }

        match calc_check_digit(&isbn) {
            Ok(digit) => println!("Check-digit for {input} is {digit}"),
            Err(e) => warn!("{input}: {e}"),
        }
    }
}

fn parse_and_validate(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.range_file else {
        bail!("ISBN_RANGE_FILE Env variable not set (or pass --range-file)");
    };

    let store = RangeStore::new();
    store
        .load_range_data(path)
        .with_context(|| format!("could not load range data from {}", path.display()))?;

    let results = store.parse_batch(cli.isbns.as_slice());
    for (input, result) in cli.isbns.iter().zip(results) {
        let isbn = match result {
            Ok(isbn) => isbn,
            Err(e) => {
                warn!("ISBN is invalid ({e}): {input}");
                continue;
            },
        };

        if !isbn.is_fully_resolved() {
            warn!("{input}: not within any range assigned by the ISBN agency");
        }

        if cli.json {
            let record = JsonIsbn {
                input,
                isbn: &isbn,
                isbn13: isbn.to_isbn13(),
                isbn10: isbn.to_isbn10(),
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("ISBN is valid: {isbn}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode_of(args: &[&str]) -> Mode {
        let matches = Cli::command().try_get_matches_from(args).unwrap();
        select_mode(&matches)
    }

    #[test]
    fn test_first_mode_flag_wins() {
        assert_eq!(mode_of(&["chk-isbn", "-c", "-p", "054792824"]), Mode::CheckDigit);
        assert_eq!(mode_of(&["chk-isbn", "-p", "-c", "0547928246"]), Mode::Parse);
        assert_eq!(mode_of(&["chk-isbn", "0547928246", "-c"]), Mode::CheckDigit);
    }

    #[test]
    fn test_parse_is_default_mode() {
        assert_eq!(mode_of(&["chk-isbn", "0547928246"]), Mode::Parse);
        assert_eq!(mode_of(&["chk-isbn", "-p", "0547928246"]), Mode::Parse);
    }

    #[test]
    fn test_isbn_required() {
        assert!(Cli::command().try_get_matches_from(["chk-isbn", "-c"]).is_err());
    }
}
