//! Main preprocessing pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the preprocessing workflow.

use crate::config::PipelineConfig;
use crate::error::{PreprocessingError, Result, ResultExt};
use crate::io::{load_csv, write_csv};
use crate::pipeline::PreprocessingExecutor;
use crate::pipeline::boxplot::{BoxplotComparison, BoxplotSink, ClosureBoxplotSink};
use crate::pipeline::encoding::CategoricalEncoder;
use crate::pipeline::outliers::OutlierHandler;
use crate::pipeline::progress::{
    ClosureProgressReporter, PreprocessingStage, ProgressReporter, ProgressUpdate,
};
use crate::pipeline::scaling::{STANDARDIZED_COLUMNS, Standardizer};
use crate::reporting::DatasetReport;
use crate::types::{PipelineResult, PreprocessingSummary};
use crate::utils::present_columns;
use polars::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Title of the comparison handed to the box-plot sink.
pub const BOXPLOT_TITLE: &str = "Before vs After IQR Outlier Removal";

/// The main preprocessing pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use titanic_prep::{Pipeline, PipelineConfig};
///
/// let result = Pipeline::builder()
///     .config(PipelineConfig::builder().remove_outliers(false).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run()?;
///
/// println!("{}", result.final_report);
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    boxplot_sink: Option<Arc<dyn BoxplotSink>>,
    executor: PreprocessingExecutor,
}

// Ensure Pipeline is Send (can be moved to a worker thread)
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured input, transform it, and write the configured output.
    ///
    /// Nothing is written unless every stage succeeds.
    pub fn run(&self) -> Result<PipelineResult> {
        let outcome = self.run_internal();
        self.finish(outcome)
    }

    /// Transform an in-memory table without touching the filesystem.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        let outcome = self.process_internal(df);
        self.finish(outcome)
    }

    fn finish(&self, outcome: Result<PipelineResult>) -> Result<PipelineResult> {
        match outcome {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn print(&self, text: impl std::fmt::Display) {
        if self.config.print_reports {
            println!("{}", text);
        }
    }

    fn run_internal(&self) -> Result<PipelineResult> {
        let df = load_csv(&self.config.input_path)?;
        let mut result = self.process_internal(df)?;

        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Writing,
            0.0,
            "Writing output...",
        ));
        let output = &self.config.output_path;
        write_csv(&mut result.data, output)?;
        result.summary.output_path = Some(output.display().to_string());
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Writing,
            1.0,
            "Output written",
        ));

        Ok(result)
    }

    fn process_internal(&self, df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();

        info!("Starting preprocessing pipeline...");
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Initializing,
            0.0,
            "Starting preprocessing pipeline...",
        ));

        let mut summary = PreprocessingSummary::new(df.height(), df.width());
        let mut processing_steps: Vec<String> = Vec::new();

        // Step 1: Report on the raw table
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Reporting,
            0.0,
            "Reporting on raw dataset...",
        ));
        let raw_report = DatasetReport::build(&df, "Original dataset");
        summary.nulls_before = raw_report.profile.total_nulls();
        self.print(&raw_report);

        // Step 2: Drop configured columns
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::DroppingColumns,
            0.0,
            "Dropping columns...",
        ));
        info!("Step 2: Dropping configured columns...");
        let (df, dropped) =
            self.executor
                .drop_columns(df, &self.config.drop_columns, &mut processing_steps)?;
        summary.columns_removed.extend(dropped);

        // Step 3: Imputation
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Imputation,
            0.0,
            "Imputing missing values...",
        ));
        info!("Step 3: Imputing missing values...");
        let df = self
            .executor
            .impute_missing(df, &mut processing_steps)
            .context("Imputation failed")?;
        let imputed_report = DatasetReport::build(&df, "After imputation");
        summary.nulls_after_imputation = imputed_report.profile.total_nulls();
        self.print(format_args!(
            "\nAfter imputation missing counts:\n{}",
            imputed_report.missing_counts()
        ));

        // Step 4: Outlier removal
        let (df, outlier_report) = if self.config.remove_outliers {
            self.remove_outliers(df, &mut processing_steps)?
        } else {
            info!("Step 4: Skipping outlier removal (disabled)");
            (df, None)
        };

        // Step 5: Encoding
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Encoding,
            0.0,
            "Encoding categorical columns...",
        ));
        info!("Step 5: Encoding categorical columns...");
        let columns_before = column_names(&df);
        let df = CategoricalEncoder::encode(df, &mut processing_steps)
            .context("Encoding failed")?;
        let columns_after = column_names(&df);
        let (added, removed) = column_diff(&columns_before, &columns_after);
        summary.columns_added.extend(added);
        summary.columns_removed.extend(removed);

        // Step 6: Standardization
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Standardization,
            0.0,
            "Standardizing numeric columns...",
        ));
        info!("Step 6: Standardizing numeric columns...");
        let targets = present_columns(&df, &STANDARDIZED_COLUMNS);
        let df = Standardizer::standardize(df, &targets, &mut processing_steps)?;
        summary.standardized_columns = targets;

        // Step 7: Final report
        let final_report = DatasetReport::build(&df, "Final dataset");
        self.print(&final_report);

        summary.finish(&df, start_time.elapsed().as_millis() as u64);
        for step in &processing_steps {
            debug!("  {}", step);
        }
        info!(
            "Preprocessing finished: {:?} -> {:?} in {}ms",
            (summary.rows_before, summary.columns_before),
            df.shape(),
            summary.duration_ms
        );

        Ok(PipelineResult {
            data: df,
            raw_report,
            imputed_report,
            final_report,
            outlier_report,
            processing_steps,
            summary,
        })
    }

    fn remove_outliers(
        &self,
        df: DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, Option<crate::pipeline::outliers::OutlierReport>)> {
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::OutlierRemoval,
            0.0,
            "Removing outliers...",
        ));
        info!("Step 4: Removing outliers...");

        let targets = present_columns(&df, &self.config.outlier_columns);
        let before = self.boxplot_sink.as_ref().map(|_| df.clone());

        let (df, report) = OutlierHandler::remove_outliers_iqr(df, &targets, processing_steps)
            .context("Outlier removal failed")?;
        for (i, col) in report.columns.iter().enumerate() {
            self.print(format_args!(
                "Outlier removal on '{}': removed {} rows",
                col.column, col.rows_removed
            ));
            self.report_progress(ProgressUpdate::with_items(
                PreprocessingStage::OutlierRemoval,
                format!("Column: {}", col.column),
                i + 1,
                report.columns.len(),
                format!("Filtered '{}'", col.column),
            ));
        }
        self.print(format_args!("Total rows removed: {}", report.total_removed()));

        if let (Some(sink), Some(before)) = (&self.boxplot_sink, before) {
            let comparison = BoxplotComparison::from_frames(BOXPLOT_TITLE, &before, &df, &targets)?;
            sink.emit(&comparison);
        }

        Ok((df, Some(report)))
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Columns in `after` but not `before`, and in `before` but not `after`, in table order.
fn column_diff(before: &[String], after: &[String]) -> (Vec<String>, Vec<String>) {
    let before_set: HashSet<&String> = before.iter().collect();
    let after_set: HashSet<&String> = after.iter().collect();
    let added = after
        .iter()
        .filter(|c| !before_set.contains(c))
        .cloned()
        .collect();
    let removed = before
        .iter()
        .filter(|c| !after_set.contains(c))
        .cloned()
        .collect();
    (added, removed)
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    boxplot_sink: Option<Arc<dyn BoxplotSink>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// Convenience over [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Install a sink for the before/after outlier comparison.
    ///
    /// Without one no comparison is computed.
    pub fn boxplot_sink(mut self, sink: Arc<dyn BoxplotSink>) -> Self {
        self.boxplot_sink = Some(sink);
        self
    }

    /// Install a closure as the box-plot sink.
    pub fn on_boxplot<F>(mut self, callback: F) -> Self
    where
        F: Fn(&BoxplotComparison) + Send + Sync + 'static,
    {
        self.boxplot_sink = Some(Arc::new(ClosureBoxplotSink::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns [`PreprocessingError::InvalidConfig`] if the configuration is invalid.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| PreprocessingError::InvalidConfig(e.to_string()))?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            boxplot_sink: self.boxplot_sink,
            executor: PreprocessingExecutor,
        })
    }
}
