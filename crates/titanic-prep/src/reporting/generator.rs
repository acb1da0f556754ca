//! Dataset quality reports: shape, leading rows, column info, and missing values.

use crate::profiler::DataProfiler;
use crate::types::DatasetProfile;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading rows shown in a report.
pub const HEAD_ROWS: usize = 3;

/// Snapshot of a table's shape, leading rows, and per-column missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub label: String,
    pub shape: (usize, usize),
    /// Rendered first rows of the table.
    pub head: String,
    pub profile: DatasetProfile,
}

impl DatasetReport {
    /// Build a report; never mutates the table.
    pub fn build(df: &DataFrame, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            shape: df.shape(),
            head: render_head(df, HEAD_ROWS),
            profile: DataProfiler::profile_dataset(df),
        }
    }

    /// Only the per-column missing counts, as printed after imputation.
    pub fn missing_counts(&self) -> MissingCounts<'_> {
        MissingCounts(&self.profile)
    }

    fn name_width(&self) -> usize {
        self.profile
            .column_profiles
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max(6)
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.name_width();

        writeln!(
            f,
            "\n == {} shape: ({}, {}) ==",
            self.label, self.shape.0, self.shape.1
        )?;
        writeln!(f, "{}", self.head)?;

        writeln!(f, "\nInfo:")?;
        writeln!(
            f,
            " {:>3}  {:<width$}  {:>14}  {:<8}  {}",
            "#", "Column", "Non-Null Count", "Dtype", "Type"
        )?;
        for (i, col) in self.profile.column_profiles.iter().enumerate() {
            writeln!(
                f,
                " {:>3}  {:<width$}  {:>14}  {:<8}  {}",
                i, col.name, col.non_null_count, col.dtype, col.inferred_type
            )?;
        }

        writeln!(f, "\nMissing values (counts):")?;
        write!(f, "{}", self.missing_counts())?;

        writeln!(f, "\nMissing values (%):")?;
        for col in &self.profile.column_profiles {
            writeln!(f, "{:<width$}  {:>6.2}", col.name, col.null_percentage)?;
        }
        Ok(())
    }
}

/// Render the first `n` rows as a plain table showing every column.
fn render_head(df: &DataFrame, n: usize) -> String {
    let rows = n.min(df.height());
    let columns = df.get_columns();

    let mut grid: Vec<Vec<String>> = vec![columns.iter().map(|c| c.name().to_string()).collect()];
    for i in 0..rows {
        grid.push(
            columns
                .iter()
                .map(|c| c.get(i).map(|v| cell_text(&v)).unwrap_or_default())
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|j| grid.iter().map(|row| row[j].chars().count()).max().unwrap_or(0))
        .collect();

    grid.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:>w$}", w = *w))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell_text(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format!("{v:?}"),
        other => other.to_string(),
    }
}

/// Display adapter printing one `name  count` line per column.
pub struct MissingCounts<'a>(&'a DatasetProfile);

impl fmt::Display for MissingCounts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .0
            .column_profiles
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);
        for col in &self.0.column_profiles {
            writeln!(f, "{:<width$}  {:>6}", col.name, col.null_count)?;
        }
        Ok(())
    }
}
