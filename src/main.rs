//! portal-e2e - End-to-end test suite for a Report Portal instance
//!
//! Drives the product's dashboard REST API and browser UI through five
//! named scenarios: dashboard creation (positive and negative), login
//! (positive and negative), and widget creation with a filter.
//!
//! ## Usage
//!
//! ```bash
//! # Run everything against the configured instance
//! portal-e2e run
//!
//! # Run only the API scenarios, save a JSON report
//! portal-e2e run --suite api --output report.json
//!
//! # Run one scenario with a visible browser window
//! portal-e2e run --scenario 5 --headed
//!
//! # List scenarios, verify the configuration
//! portal-e2e list --detailed
//! portal-e2e check-config
//! ```

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use tracing::info;

mod api;
mod browser;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod pages;
mod scenarios;
mod steps;
mod utils;

use cli::Args;
use config::Settings;
use executor::ScenarioRunner;
use models::{Scenario, SuiteSummary};
use output::{OutputFormat, ResultFormatter};
use utils::logger::{self, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init_logger(LogLevel::from_verbosity(args.verbose));

    match args.command {
        cli::Command::Run(run_args) => run_scenarios(run_args).await,
        cli::Command::List(list_args) => {
            list_scenarios(list_args);
            Ok(())
        }
        cli::Command::CheckConfig(config_args) => check_config(config_args),
    }
}

async fn run_scenarios(args: cli::RunArgs) -> Result<()> {
    // A configuration problem aborts the whole run before any scenario
    let path = Settings::discover(args.config.as_deref())?;
    let mut settings = Settings::load(&path)?;
    info!("Loaded configuration from {}", path.display());

    if args.headed {
        settings = settings.with_headless(false);
    }

    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow!("Unknown output format: {}", args.format))?;
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let skip = cli::parse_skip(args.skip.as_deref())?;
    let runner = ScenarioRunner::new(&settings).with_skip(skip);

    let summary = if let Some(number) = args.scenario {
        let scenario = Scenario::from_number(number)
            .ok_or_else(|| anyhow!("Invalid scenario number: {number}"))?;
        let result = runner.run_scenario(scenario).await;
        SuiteSummary::new(vec![result])
    } else {
        match args.suite.to_lowercase().as_str() {
            "all" => runner.run_all().await,
            "api" | "ui" => runner.run_suite(&args.suite).await,
            other => bail!("Unknown suite: {other} (expected all, api or ui)"),
        }
    };

    println!("{}", formatter.format_summary(&summary));

    if let Some(path) = &args.output {
        formatter.write_report(&summary, path)?;
        info!("Report written to {}", path.display());
    }

    if !summary.all_passed() {
        bail!(
            "{} of {} scenario(s) did not pass",
            summary.failed + summary.errors,
            summary.total
        );
    }

    Ok(())
}

fn list_scenarios(args: cli::ListArgs) {
    println!("\nPortal E2E Scenarios\n");

    let mut current_category = "";

    for scenario in Scenario::all() {
        let category = scenario.category();
        if category != current_category {
            println!("{category} Scenarios:");
            println!("──────────────────────────────────────────────────");
            current_category = category;
        }

        if args.detailed {
            let polarity = if scenario.is_negative() {
                "negative"
            } else {
                "positive"
            };
            println!(
                "  {:2}. {:32} [{} / {}]",
                scenario.number(),
                scenario.name(),
                scenario.category(),
                polarity
            );
        } else {
            println!("  {:2}. {}", scenario.number(), scenario.name());
        }

        if scenario.number() == 2 {
            println!();
        }
    }

    println!();
}

fn check_config(args: cli::CheckConfigArgs) -> Result<()> {
    let path = Settings::discover(args.config.as_deref())?;
    let settings = Settings::load(&path)?;

    println!("Configuration loaded from {}\n", path.display());
    for (key, value) in settings.masked_summary() {
        println!("  {key:20} = {value}");
    }
    println!("\nConfiguration OK");

    Ok(())
}
