//! CLI entry point for the campaign analysis.

use anyhow::{Result, anyhow};
use campaign_eda::{AnalysisConfig, AnalysisResult, Pipeline, RunReport, seconds_to_minutes};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory analysis of a bank telemarketing campaign",
    long_about = "Loads the campaign dataset, removes duplicate and incomplete rows, and writes \
                  an age profile, a per-job call duration report and three charts.\n\n\
                  Running without arguments reads data/bank-full.csv and writes into \
                  data/processed.\n\n\
                  EXAMPLES:\n  \
                  # Default run\n  \
                  campaign-eda\n\n  \
                  # Also write the seasonal table and a JSON run report\n  \
                  campaign-eda --seasonal-report seasonal_std.csv --emit-report\n\n  \
                  # Summary as JSON, no charts\n  \
                  campaign-eda --no-plots --json | jq .age_stats"
)]
struct Args {
    /// Path to the semicolon-delimited campaign file
    #[arg(short, long, default_value = "data/bank-full.csv")]
    input: PathBuf,

    /// Directory receiving the CSV reports and the plots/ directory
    #[arg(short, long, default_value = "data/processed")]
    output_dir: PathBuf,

    /// Also write the seasonal variability table under this file name
    #[arg(long)]
    seasonal_report: Option<String>,

    /// Skip chart rendering
    #[arg(long)]
    no_plots: bool,

    /// Write run_report.json to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Print the run summary as JSON on stdout instead of text
    ///
    /// Disables all logging so stdout only carries the JSON document.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// Nothing is initialized with `--json` so stdout stays machine-readable.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let mut builder = AnalysisConfig::builder()
        .input_path(args.input.clone())
        .output_dir(args.output_dir.clone())
        .render_plots(!args.no_plots)
        .emit_report(args.emit_report);
    if let Some(ref name) = args.seasonal_report {
        builder = builder.seasonal_report_file(name);
    }
    let config = builder.build()?;

    let pipeline = Pipeline::builder().config(config).build()?;

    match pipeline.run() {
        Ok(result) => {
            if args.json {
                let report = RunReport::from_result(&result);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&result);
            }
            Ok(())
        }
        // The pipeline has already logged the failure.
        Err(e) => Err(anyhow!("Analysis failed [{}]: {}", e.error_code(), e)),
    }
}

/// Print a human-readable summary of the run.
fn print_summary(result: &AnalysisResult) {
    println!();
    println!("{}", "=".repeat(60));
    println!("ANALYSIS COMPLETE");
    println!("{}", "=".repeat(60));
    println!();

    let cleaning = &result.cleaning;
    println!("Input: {} ({} columns)", result.input_file.display(), result.columns);
    println!(
        "  Rows: {} -> {} ({} duplicates, {} incomplete)",
        cleaning.rows_before,
        cleaning.rows_after,
        cleaning.duplicates_removed,
        cleaning.null_rows_removed
    );
    println!("  Duration: {}ms", result.duration_ms);
    println!();

    let age = &result.age_stats;
    println!("Age:");
    println!(
        "  mean {:.2}, median {}, mode {}, range {}-{}",
        age.mean, age.median, age.mode, age.min, age.max
    );
    for (range, count) in &result.age_range_counts {
        println!("  {:<6} {}", range.label(), count);
    }
    println!();

    println!("Mean call duration per job:");
    for stat in &result.job_durations {
        println!(
            "  {:<15} {} ({} calls)",
            stat.job,
            seconds_to_minutes(stat.mean.trunc() as i64),
            stat.count
        );
    }
    println!();

    if !result.warnings.is_empty() {
        println!("Warnings ({}):", result.warnings.len());
        for warning in result.warnings.iter().take(10) {
            println!("  - {}", warning);
        }
        if result.warnings.len() > 10 {
            println!("  ... and {} more", result.warnings.len() - 10);
        }
        println!();
    }

    println!("Files written:");
    for path in &result.outputs {
        println!("  - {}", path.display());
    }
}
