//! Data profiling module.
//!
//! Per-column type, non-null and missing-value statistics, plus the
//! descriptive statistics used by the outlier filter and standardizer.

pub mod statistics;

use crate::types::{ColumnProfile, DatasetProfile};
use crate::utils::dtype_category_str;
use polars::prelude::*;

pub use statistics::BoxplotStats;

/// Data profiler for analyzing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of the dataset, in column order.
    pub fn profile_dataset(df: &DataFrame) -> DatasetProfile {
        let column_profiles = df
            .get_columns()
            .iter()
            .map(|col| Self::profile_column(col.as_materialized_series(), df.height()))
            .collect();

        DatasetProfile {
            shape: df.shape(),
            column_profiles,
        }
    }

    fn profile_column(series: &Series, total_rows: usize) -> ColumnProfile {
        let null_count = series.null_count();
        let null_percentage = if total_rows > 0 {
            round2(null_count as f64 / total_rows as f64 * 100.0)
        } else {
            0.0
        };

        ColumnProfile {
            name: series.name().to_string(),
            dtype: series.dtype().to_string(),
            inferred_type: dtype_category_str(series).to_string(),
            non_null_count: series.len() - null_count,
            null_count,
            null_percentage,
        }
    }
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
