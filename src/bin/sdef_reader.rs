//! Command-line front end for the scripting dictionary reader.
//!
//! One-shot subcommands print a single answer; `serve` keeps the process
//! alive and answers line-delimited JSON requests on stdin so repeated
//! lookups reuse the parsed dictionaries.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sdef_reader::config::parse_timeout_secs;
use sdef_reader::{DictionaryService, ProviderConfig, Request, dispatch, provider_from_config};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sdef-reader",
    version,
    about = "Read macOS scripting dictionaries as compact text"
)]
struct Cli {
    /// Serve pre-extracted <app>.sdef files from this directory.
    #[arg(long, global = true, value_name = "DIR")]
    sdef_dir: Option<PathBuf>,

    /// Seconds to wait for dictionary extraction.
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List scriptable applications.
    Apps { dir: Option<PathBuf> },
    /// Overview of an application's suites.
    Suites { app: String },
    /// Everything in one suite.
    Suite { app: String, name: String },
    /// Details for a command.
    Command { app: String, name: String },
    /// Details for a class and its extensions.
    Class { app: String, name: String },
    /// Values of an enumeration.
    Enum { app: String, name: String },
    /// Keyword search across the dictionary.
    Search { app: String, query: String },
    /// The parsed dictionary as JSON.
    Export { app: String },
    /// Answer JSON requests on stdin, one per line.
    Serve,
}

impl CliCommand {
    /// `None` for `serve`, which is not a single request.
    fn into_request(self) -> Option<Request> {
        let request = match self {
            CliCommand::Apps { dir } => Request::ListApps { search_dir: dir },
            CliCommand::Suites { app } => Request::Overview { app },
            CliCommand::Suite { app, name } => Request::Suite { app, name },
            CliCommand::Command { app, name } => Request::Command { app, name },
            CliCommand::Class { app, name } => Request::Class { app, name },
            CliCommand::Enum { app, name } => Request::Enumeration { app, name },
            CliCommand::Search { app, query } => Request::Search { app, query },
            CliCommand::Export { app } => Request::Export { app },
            CliCommand::Serve => return None,
        };
        Some(request)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    parse_timeout_secs(raw).map_err(|err| format!("{err:#}"))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = ProviderConfig::from_env().context("invalid environment configuration")?;
    if let Some(dir) = cli.sdef_dir {
        config.sdef_dir = Some(dir);
    }
    if let Some(timeout) = cli.timeout {
        config.extract_timeout = timeout;
    }
    let service = DictionaryService::new(provider_from_config(&config));

    match cli.command.into_request() {
        Some(request) => {
            let text = dispatch(&service, &request)?;
            println!("{text}");
            Ok(())
        }
        None => {
            let stdin = io::stdin();
            sdef_reader::serve(&service, BufReader::new(stdin.lock()), io::stdout().lock())
        }
    }
}
