//! Eligibility check CLI
//!
//! Evaluates a single eligibility check read from a JSON file

use anyhow::Context;
use clap::Parser;
use legalaid_eligibility::case::load_check_input;
use legalaid_eligibility::{EligibilityChecker, PolicyLimits};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eligibility-check", version, about = "Legal aid means-test eligibility check")]
struct Args {
    /// Eligibility check JSON file (interval-based amounts in pence)
    check: PathBuf,

    /// Directory of limit CSV files; built-in 2013 limits when omitted
    #[arg(long)]
    limits: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let limits = match &args.limits {
        Some(dir) => PolicyLimits::from_csv_path(dir)
            .with_context(|| format!("loading limits from {}", dir.display()))?,
        None => PolicyLimits::default_2013(),
    };

    let input = load_check_input(&args.check)
        .with_context(|| format!("reading check {}", args.check.display()))?;
    let case_data = input.to_case_data();

    let checker = EligibilityChecker::with_limits(case_data, limits)?;
    let report = checker.report()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Legal Aid Eligibility Check");
        println!("===========================\n");
        println!("Category: {}", checker.case_data().category);
        println!("{}", report);
    }

    Ok(())
}
