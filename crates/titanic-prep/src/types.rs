use crate::pipeline::outliers::OutlierReport;
use crate::reporting::DatasetReport;
use chrono::Local;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub inferred_type: String,
    pub non_null_count: usize,
    pub null_count: usize,
    /// Percentage of missing cells, rounded to 2 decimals.
    pub null_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub column_profiles: Vec<ColumnProfile>,
}

impl DatasetProfile {
    /// Total number of missing cells across all columns.
    pub fn total_nulls(&self) -> usize {
        self.column_profiles.iter().map(|c| c.null_count).sum()
    }

    /// Look up a column's profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.column_profiles.iter().find(|c| c.name == name)
    }
}

/// Output of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The fully transformed table.
    pub data: DataFrame,
    /// Report on the raw input.
    pub raw_report: DatasetReport,
    /// Report taken right after imputation.
    pub imputed_report: DatasetReport,
    /// Report on the final table.
    pub final_report: DatasetReport,
    /// Present when outlier removal ran.
    pub outlier_report: Option<OutlierReport>,
    pub processing_steps: Vec<String>,
    pub summary: PreprocessingSummary,
}

// ============================================================================
// Preprocessing Summary
// ============================================================================

/// Human-readable summary of what the pipeline did.
///
/// Serialized to stdout by the CLI's `--json` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingSummary {
    /// Local timestamp of the run (RFC 3339).
    pub generated_at: String,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    pub rows_before: usize,
    pub rows_after: usize,
    pub rows_removed: usize,

    pub columns_before: usize,
    pub columns_after: usize,
    /// Columns removed by the drop stage or by encoding.
    pub columns_removed: Vec<String>,
    /// Columns created by encoding.
    pub columns_added: Vec<String>,

    /// Missing cells before and after imputation.
    pub nulls_before: usize,
    pub nulls_after_imputation: usize,

    /// Columns that were z-score standardized.
    pub standardized_columns: Vec<String>,

    /// Where the table was written, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl PreprocessingSummary {
    pub fn new(rows_before: usize, columns_before: usize) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            duration_ms: 0,
            rows_before,
            rows_after: rows_before,
            rows_removed: 0,
            columns_before,
            columns_after: columns_before,
            columns_removed: Vec::new(),
            columns_added: Vec::new(),
            nulls_before: 0,
            nulls_after_imputation: 0,
            standardized_columns: Vec::new(),
            output_path: None,
        }
    }

    /// Record the final shape.
    pub fn finish(&mut self, df: &DataFrame, duration_ms: u64) {
        self.rows_after = df.height();
        self.rows_removed = self.rows_before.saturating_sub(self.rows_after);
        self.columns_after = df.width();
        self.duration_ms = duration_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_summary_finish_counts_removed_rows() {
        let mut summary = PreprocessingSummary::new(5, 3);
        let df = df!["a" => [1, 2, 3], "b" => [4, 5, 6]].unwrap();
        summary.finish(&df, 12);

        assert_eq!(summary.rows_after, 3);
        assert_eq!(summary.rows_removed, 2);
        assert_eq!(summary.columns_after, 2);
        assert_eq!(summary.duration_ms, 12);
    }

    #[test]
    fn test_summary_serialization_skips_missing_output() {
        let summary = PreprocessingSummary::new(1, 1);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("output_path"));
        assert!(json.contains("generated_at"));
    }
}
