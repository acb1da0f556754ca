//! CLI entry point for the Titanic preprocessing pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use titanic_prep::{
    BoxplotComparison, BoxplotSink, BoxplotStats, Pipeline, PipelineConfig, PipelineResult,
    PreprocessingError,
};
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Titanic dataset preprocessing pipeline",
    long_about = "Cleans the Titanic passenger dataset for modeling: reports data quality,\n\
                  imputes missing values, removes IQR outliers, encodes categorical\n\
                  columns, standardizes Age and Fare, and writes the result as CSV.\n\n\
                  EXAMPLES:\n  \
                  # Default run: TitanicDataset.csv -> titanic_preprocessed.csv\n  \
                  titanic-prep\n\n  \
                  # Custom paths, keep outliers\n  \
                  titanic-prep -i data/train.csv -o out/train_clean.csv --keep-outliers\n\n  \
                  # Machine-readable summary\n  \
                  titanic-prep --json | jq .rows_removed"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the CSV file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the IQR outlier filter
    #[arg(long)]
    keep_outliers: bool,

    /// Column to drop before imputation (repeatable; replaces the default "Cabin")
    #[arg(long = "drop", value_name = "COLUMN")]
    drop_columns: Vec<String>,

    /// Column to filter for outliers, in order (repeatable; replaces "Age", "Fare")
    #[arg(long = "outlier-column", value_name = "COLUMN")]
    outlier_columns: Vec<String>,

    /// Do not print the before/after box-plot comparison
    #[arg(long)]
    no_plot: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON to stdout instead of the reports
    ///
    /// Disables all logs and dataset reports.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout
/// only carries the JSON summary.
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

    let config = build_config(&args)?;
    debug!("Configuration: {:?}", config);

    let mut builder = Pipeline::builder().config(config);
    if !args.no_plot && !args.json {
        builder = builder.boxplot_sink(Arc::new(TextBoxplotSink));
    }
    let pipeline = builder.build()?;

    info!("{}", "=".repeat(80));
    info!("Starting preprocessing pipeline...");
    info!("{}", "=".repeat(80));

    match pipeline.run() {
        Ok(result) => handle_pipeline_output(&result, &args),
        Err(e) => {
            error!("Pipeline failed: {}", e);
            if args.json {
                println!("{}", error_json(&e)?);
            }
            Err(e).context("Preprocessing failed")
        }
    }
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<PipelineConfig> {
    let base = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("Loading configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let mut builder = PipelineConfig::builder()
        .input_path(args.input.clone().unwrap_or(base.input_path))
        .output_path(args.output.clone().unwrap_or(base.output_path))
        .remove_outliers(base.remove_outliers && !args.keep_outliers)
        .print_reports(base.print_reports && !args.json);

    builder = if args.drop_columns.is_empty() {
        builder.drop_columns(base.drop_columns)
    } else {
        builder.drop_columns(args.drop_columns.clone())
    };
    builder = if args.outlier_columns.is_empty() {
        builder.outlier_columns(base.outlier_columns)
    } else {
        builder.outlier_columns(args.outlier_columns.clone())
    };

    Ok(builder.build()?)
}

/// Print the final message, or the JSON summary with `--json`.
fn handle_pipeline_output(result: &PipelineResult, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    for step in &result.processing_steps {
        info!("  - {}", step);
    }

    let output = result.summary.output_path.as_deref().unwrap_or_default();
    println!(
        "\nPreprocessing complete. Cleaned dataset saved as '{}'",
        output
    );
    Ok(())
}

/// `{"error": {"code", "message"}}` document printed for a failed `--json` run.
fn error_json(error: &PreprocessingError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({ "error": error }))
}

/// Prints the before/after outlier comparison as a text table.
struct TextBoxplotSink;

impl BoxplotSink for TextBoxplotSink {
    fn emit(&self, comparison: &BoxplotComparison) {
        println!("\n{}", comparison.title);
        println!("{}", "-".repeat(96));
        println!(
            "{:<10} {:<7} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8}",
            "Column", "Stage", "Count", "Min", "Q1", "Median", "Q3", "Max", "Whisk.Hi", "Outliers"
        );
        for col in &comparison.columns {
            print_boxplot_row(&col.column, "before", col.before.as_ref());
            print_boxplot_row("", "after", col.after.as_ref());
        }
        println!("{}", "-".repeat(96));
    }
}

fn print_boxplot_row(column: &str, stage: &str, stats: Option<&BoxplotStats>) {
    match stats {
        Some(s) => println!(
            "{:<10} {:<7} {:>6} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8}",
            column, stage, s.count, s.min, s.q1, s.median, s.q3, s.max, s.upper_whisker, s.outliers
        ),
        None => println!("{:<10} {:<7} {:>6}", column, stage, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_json_carries_code_and_message() {
        let error = PreprocessingError::DegenerateStatistics {
            column: "Fare".to_string(),
            std: 0.0,
        }
        .with_context("Standardization failed");

        let json: serde_json::Value = serde_json::from_str(&error_json(&error).unwrap()).unwrap();

        assert_eq!(json["error"]["code"], "DEGENERATE_STATISTICS");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Standardization failed: "));
        assert!(message.contains("'Fare'"));
    }

    #[test]
    fn test_error_json_input_not_found() {
        let error = PreprocessingError::InputNotFound(PathBuf::from("TitanicDataset.csv"));
        let json: serde_json::Value = serde_json::from_str(&error_json(&error).unwrap()).unwrap();
        assert_eq!(json["error"]["code"], "INPUT_NOT_FOUND");
    }

    #[test]
    fn test_json_flag_silences_reports() {
        let args = Args::parse_from(["titanic-prep", "--json", "--keep-outliers"]);
        let config = build_config(&args).unwrap();
        assert!(!config.print_reports);
        assert!(!config.remove_outliers);
    }
}
