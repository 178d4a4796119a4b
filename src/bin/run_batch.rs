//! Run eligibility checks for a batch of cases from a CSV file
//!
//! Outputs one result row per case, in input order

use anyhow::Context;
use clap::Parser;
use legalaid_eligibility::case::load_cases;
use legalaid_eligibility::money::Pence;
use legalaid_eligibility::{EligibilityOutcome, EligibilityRunner};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Evaluate a CSV of monthly-normalised cases")]
struct Args {
    /// Input cases CSV
    #[arg(long, default_value = "cases.csv")]
    input: PathBuf,

    /// Output results CSV
    #[arg(long, default_value = "eligibility_results.csv")]
    output: PathBuf,

    /// Directory of limit CSV files; built-in 2013 limits when omitted
    #[arg(long)]
    limits: Option<PathBuf>,
}

fn optional(amount: Option<Pence>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let runner = match &args.limits {
        Some(dir) => EligibilityRunner::from_csv_path(dir)
            .with_context(|| format!("loading limits from {}", dir.display()))?,
        None => EligibilityRunner::new(),
    };

    println!("Loading cases from {}...", args.input.display());
    let records = load_cases(&args.input)
        .with_context(|| format!("loading cases from {}", args.input.display()))?;
    println!("Loaded {} cases in {:?}", records.len(), start.elapsed());

    let cases: Vec<_> = records.iter().map(|r| r.case_data.clone()).collect();

    let eval_start = Instant::now();
    let results = runner.run_batch(&cases);
    println!("Evaluation complete in {:?}", eval_start.elapsed());

    let mut out = BufWriter::new(File::create(&args.output)?);
    writeln!(
        out,
        "case_ref,is_eligible,failed_test,gross_income,disposable_income,disposable_capital"
    )?;

    let (mut yes, mut no, mut unknown) = (0, 0, 0);
    for (record, result) in records.iter().zip(&results) {
        let report = result
            .as_ref()
            .map_err(|err| anyhow::anyhow!("case {}: {}", record.case_ref, err))?;

        match report.is_eligible {
            EligibilityOutcome::Yes => yes += 1,
            EligibilityOutcome::No => no += 1,
            EligibilityOutcome::Unknown => unknown += 1,
        }

        writeln!(
            out,
            "{},{},{},{},{},{}",
            record.case_ref,
            report.is_eligible,
            report
                .failed_test
                .map(|t| t.to_string())
                .unwrap_or_default(),
            report.gross_income,
            optional(report.disposable_income),
            optional(report.disposable_capital),
        )?;
    }
    out.flush()?;

    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Eligible:     {}", yes);
    println!("  Not eligible: {}", no);
    println!("  Unknown:      {}", unknown);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
