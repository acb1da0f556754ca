//! Outlier handling module.
//!
//! Removes rows whose value in a numeric column falls outside Tukey's
//! fences `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`. Columns are processed in the
//! given order and each one's quartiles are computed on the rows that
//! survived the previous columns.

use crate::error::Result;
use crate::profiler::statistics::quantile;
use crate::utils::{has_column, numeric_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Multiplier applied to the IQR to get the fences.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// What the filter did to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub column: String,
    /// `None` when the column had no values to compute quartiles from.
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub rows_before: usize,
    pub rows_removed: usize,
}

/// Per-column and total removal counts for one filter run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns: Vec<ColumnOutliers>,
}

impl OutlierReport {
    /// Rows removed across all columns.
    pub fn total_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Handles outlier detection and removal.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Remove rows containing IQR outliers, one column at a time.
    ///
    /// Columns absent from the table are skipped. A missing value fails the
    /// bounds check and its row is removed. With zero IQR the bounds collapse
    /// to `[Q1, Q1]`.
    pub fn remove_outliers_iqr<S: AsRef<str>>(
        mut df: DataFrame,
        cols: &[S],
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, OutlierReport)> {
        let initial_rows = df.height();
        let mut columns = Vec::with_capacity(cols.len());

        for col_name in cols.iter().map(|c| c.as_ref()) {
            if !has_column(&df, col_name) {
                debug!("Skipping outlier check: '{}' not present", col_name);
                continue;
            }

            let series = df.column(col_name)?.as_materialized_series().clone();
            let values = numeric_values(&series)?;
            let q1 = quantile(&values, 0.25);
            let q3 = quantile(&values, 0.75);
            let bounds = q1.zip(q3).map(|(q1, q3)| {
                let iqr = q3 - q1;
                (q1 - IQR_MULTIPLIER * iqr, q3 + IQR_MULTIPLIER * iqr)
            });

            let float_series = series.cast(&DataType::Float64)?;
            let mask: BooleanChunked = float_series
                .f64()?
                .into_iter()
                .map(|v| match (v, bounds) {
                    (Some(val), Some((lower, upper))) => Some(val >= lower && val <= upper),
                    _ => Some(false),
                })
                .collect();

            let before = df.height();
            df = df.filter(&mask)?;
            let removed = before - df.height();

            info!("Outlier removal on '{}': removed {} rows", col_name, removed);
            processing_steps.push(format!(
                "Outlier removal on '{}': removed {} rows",
                col_name, removed
            ));

            columns.push(ColumnOutliers {
                column: col_name.to_string(),
                q1,
                q3,
                lower_bound: bounds.map(|b| b.0),
                upper_bound: bounds.map(|b| b.1),
                rows_before: before,
                rows_removed: removed,
            });
        }

        let report = OutlierReport {
            rows_before: initial_rows,
            rows_after: df.height(),
            columns,
        };
        info!("Total rows removed: {}", report.total_removed());
        processing_steps.push(format!("Total rows removed: {}", report.total_removed()));

        Ok((df, report))
    }
}
