//! Statistical imputation methods.
//!
//! Provides median imputation for numeric columns and mode imputation for
//! categorical columns. Every method takes the table by value and returns
//! the updated table.

use crate::error::Result;
use crate::profiler::statistics::median;
use crate::utils::{fill_numeric_nulls, fill_string_nulls, has_column, numeric_values, string_mode};
use polars::prelude::*;
use tracing::{debug, warn};

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing numeric values with the median of the non-missing ones.
    ///
    /// Absent columns and columns without any non-missing value are returned unchanged.
    pub fn apply_numeric_median(
        mut df: DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        if !has_column(&df, col_name) {
            debug!("Skipping median imputation: '{}' not present", col_name);
            return Ok(df);
        }

        let series = df.column(col_name)?.as_materialized_series().clone();
        let Some(median_val) = median(&numeric_values(&series)?) else {
            warn!("No median for '{}' (no numeric values); left as is", col_name);
            return Ok(df);
        };

        let missing = series.null_count();
        let filled = fill_numeric_nulls(&series, median_val)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled {} missing '{}' with median: {:.2}",
            missing, col_name, median_val
        ));
        Ok(df)
    }

    /// Fill missing categorical values with the most frequent value.
    ///
    /// Ties resolve to the lexicographically smallest value.
    pub fn apply_mode_imputation(
        mut df: DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        if !has_column(&df, col_name) {
            debug!("Skipping mode imputation: '{}' not present", col_name);
            return Ok(df);
        }

        let series = df.column(col_name)?.as_materialized_series().clone();
        let Some(mode_val) = string_mode(&series) else {
            warn!("No mode for '{}' (all values missing); left as is", col_name);
            return Ok(df);
        };

        let missing = series.null_count();
        let filled = fill_string_nulls(&series, &mode_val)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled {} missing '{}' with mode: '{}'",
            missing, col_name, mode_val
        ));
        Ok(df)
    }
}
