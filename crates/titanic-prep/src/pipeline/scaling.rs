//! Z-score standardization of numeric columns.

use crate::error::{PreprocessingError, Result};
use crate::profiler::statistics::{mean, sample_std};
use crate::utils::{has_column, numeric_values};
use polars::prelude::*;
use tracing::{debug, warn};

/// Columns the pipeline standardizes when present.
pub const STANDARDIZED_COLUMNS: [&str; 2] = ["Age", "Fare"];

/// Rescales numeric columns to zero mean and unit sample standard deviation.
pub struct Standardizer;

impl Standardizer {
    /// Replace each column in `cols` by `(x - mean) / std`.
    ///
    /// Statistics use the column's non-missing values and the N-1 denominator.
    /// Missing cells stay missing. Fails with
    /// [`PreprocessingError::DegenerateStatistics`] when the std is zero or
    /// undefined, and with [`PreprocessingError::ColumnNotFound`] when a
    /// column is absent.
    pub fn standardize<S: AsRef<str>>(
        mut df: DataFrame,
        cols: &[S],
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        for col_name in cols.iter().map(|c| c.as_ref()) {
            if !has_column(&df, col_name) {
                return Err(PreprocessingError::ColumnNotFound(col_name.to_string()));
            }

            let series = df.column(col_name)?.as_materialized_series().clone();
            let values = numeric_values(&series)?;
            let (mean_val, std_val) = match (mean(&values), sample_std(&values)) {
                (Some(m), Some(s)) if s.is_finite() && s > 0.0 => (m, s),
                (_, std) => {
                    let std = std.unwrap_or(f64::NAN);
                    warn!("Cannot standardize '{}': std is {}", col_name, std);
                    return Err(PreprocessingError::DegenerateStatistics {
                        column: col_name.to_string(),
                        std,
                    });
                }
            };
            debug!("'{}': mean={:.4}, std={:.4}", col_name, mean_val, std_val);

            let float_series = series.cast(&DataType::Float64)?;
            let scaled: Float64Chunked = float_series
                .f64()?
                .apply_values(|v| (v - mean_val) / std_val);
            df.replace(col_name, scaled.with_name(series.name().clone()).into_series())?;

            processing_steps.push(format!(
                "Standardized '{}' (mean: {:.2}, std: {:.2})",
                col_name, mean_val, std_val
            ));
        }
        Ok(df)
    }
}
