//! Before/after box-plot comparison for the outlier stage.
//!
//! The pipeline does not draw anything. When a [`BoxplotSink`] is installed it
//! receives one [`BoxplotComparison`] after outlier removal, holding the box
//! statistics of each filtered column on both sides of the filter.

use crate::profiler::BoxplotStats;
use crate::utils::{has_column, numeric_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Box statistics of one column before and after outlier removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBoxplot {
    pub column: String,
    /// `None` when the column had no non-missing values.
    pub before: Option<BoxplotStats>,
    pub after: Option<BoxplotStats>,
}

/// Side-by-side box statistics for a set of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotComparison {
    pub title: String,
    pub columns: Vec<ColumnBoxplot>,
}

impl BoxplotComparison {
    /// Compute the comparison for every column in `cols` present in `before`.
    pub fn from_frames<S: AsRef<str>>(
        title: impl Into<String>,
        before: &DataFrame,
        after: &DataFrame,
        cols: &[S],
    ) -> PolarsResult<Self> {
        let mut columns = Vec::with_capacity(cols.len());
        for name in cols.iter().map(|c| c.as_ref()) {
            if !has_column(before, name) {
                continue;
            }
            columns.push(ColumnBoxplot {
                column: name.to_string(),
                before: column_stats(before, name)?,
                after: column_stats(after, name)?,
            });
        }
        Ok(Self {
            title: title.into(),
            columns,
        })
    }
}

fn column_stats(df: &DataFrame, name: &str) -> PolarsResult<Option<BoxplotStats>> {
    if !has_column(df, name) {
        return Ok(None);
    }
    let values = numeric_values(df.column(name)?.as_materialized_series())?;
    Ok(BoxplotStats::from_values(&values))
}

/// Receives box-plot comparisons emitted by the pipeline.
pub trait BoxplotSink: Send + Sync {
    fn emit(&self, comparison: &BoxplotComparison);
}

/// Wrapper that implements [`BoxplotSink`] using a closure.
pub struct ClosureBoxplotSink<F>
where
    F: Fn(&BoxplotComparison) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureBoxplotSink<F>
where
    F: Fn(&BoxplotComparison) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> BoxplotSink for ClosureBoxplotSink<F>
where
    F: Fn(&BoxplotComparison) + Send + Sync,
{
    fn emit(&self, comparison: &BoxplotComparison) {
        (self.callback)(comparison);
    }
}
