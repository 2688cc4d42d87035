//! CLI argument parsing
//!
//! Defines the command-line interface using clap.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};

/// End-to-end test suite for the Report Portal dashboard API and UI
#[derive(Parser, Debug)]
#[command(name = "portal-e2e")]
#[command(version)]
#[command(about = "Run API and UI scenarios against a Report Portal instance")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run scenarios
    Run(RunArgs),

    /// List available scenarios
    List(ListArgs),

    /// Load and print the resolved configuration
    CheckConfig(CheckConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the properties file (default: discovered)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suite to run (all, api, ui)
    #[arg(short, long, default_value = "all")]
    pub suite: String,

    /// Specific scenario number to run (1-5)
    #[arg(long)]
    pub scenario: Option<u8>,

    /// Skip specific scenarios (comma-separated numbers)
    #[arg(long)]
    pub skip: Option<String>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Save the JSON report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show suite and polarity for each scenario
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the check-config command
#[derive(Parser, Debug)]
pub struct CheckConfigArgs {
    /// Path to the properties file (default: discovered)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Parse a comma-separated skip list into scenario numbers
pub fn parse_skip(skip: Option<&str>) -> Result<Vec<u8>> {
    let Some(skip) = skip else {
        return Ok(Vec::new());
    };

    skip.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .map_err(|_| anyhow!("Invalid scenario number in skip list: '{s}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skip_list() {
        assert_eq!(parse_skip(None).unwrap(), Vec::<u8>::new());
        assert_eq!(parse_skip(Some("1,3, 5")).unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_skip(Some("")).unwrap(), Vec::<u8>::new());
        assert!(parse_skip(Some("1,two")).is_err());
    }

    #[test]
    fn test_run_args_defaults() {
        let args = Args::parse_from(["portal-e2e", "run"]);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.suite, "all");
                assert_eq!(run.format, "table");
                assert!(!run.headed);
                assert!(run.scenario.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let args = Args::parse_from(["portal-e2e", "list", "-vv"]);
        assert_eq!(args.verbose, 2);
    }
}
