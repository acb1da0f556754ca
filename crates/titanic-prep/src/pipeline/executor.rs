//! Preprocessing executor module.
//!
//! Column-removal and imputation steps that run before the outlier filter.

use crate::error::Result;
use crate::imputers::StatisticalImputer;
use crate::utils::present_columns;
use polars::prelude::*;
use tracing::{debug, info};

/// Numeric columns filled with their median.
pub const MEDIAN_IMPUTED_COLUMNS: [&str; 2] = ["Age", "Fare"];

/// Categorical columns filled with their mode.
pub const MODE_IMPUTED_COLUMNS: [&str; 1] = ["Embarked"];

/// Executes the table-level preprocessing steps.
pub struct PreprocessingExecutor;

impl PreprocessingExecutor {
    /// Drop every listed column present in the table.
    ///
    /// Returns the new table and the names of the columns actually removed.
    pub fn drop_columns<S: AsRef<str>>(
        &self,
        df: DataFrame,
        columns: &[S],
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, Vec<String>)> {
        let present = present_columns(&df, columns);
        if present.is_empty() {
            debug!("No configured columns to drop");
            return Ok((df, present));
        }

        let df = df.drop_many(present.iter().map(|s| s.as_str()));
        info!("Dropped columns: {:?}", present);
        processing_steps.push(format!("Dropped columns: {}", present.join(", ")));
        Ok((df, present))
    }

    /// Median-impute `Age` and `Fare`, then mode-impute `Embarked`.
    pub fn impute_missing(
        &self,
        mut df: DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        for col in MEDIAN_IMPUTED_COLUMNS {
            df = StatisticalImputer::apply_numeric_median(df, col, processing_steps)?;
        }
        for col in MODE_IMPUTED_COLUMNS {
            df = StatisticalImputer::apply_mode_imputation(df, col, processing_steps)?;
        }

        let remaining: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
        debug!("Missing values remaining after imputation: {}", remaining);
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_drop_columns_present_only() {
        let df = df![
            "PassengerId" => [1i64, 2],
            "Cabin" => [Some("C85"), None],
        ]
        .unwrap();
        let mut steps = vec![];

        let (df, dropped) = PreprocessingExecutor
            .drop_columns(df, &["Cabin", "Ticket"], &mut steps)
            .unwrap();

        assert_eq!(dropped, vec!["Cabin".to_string()]);
        assert_eq!(df.width(), 1);
        assert_eq!(steps, vec!["Dropped columns: Cabin".to_string()]);
    }

    #[test]
    fn test_drop_columns_none_present() {
        let df = df!["Age" => [1.0]].unwrap();
        let mut steps = vec![];

        let (df, dropped) = PreprocessingExecutor
            .drop_columns(df, &["Cabin"], &mut steps)
            .unwrap();

        assert!(dropped.is_empty());
        assert_eq!(df.width(), 1);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_impute_missing_fills_target_columns() {
        let df = df![
            "Age" => [Some(22.0), Some(38.0), None, Some(35.0)],
            "Fare" => [Some(7.25), None, Some(8.05), Some(53.1)],
            "Embarked" => [Some("S"), Some("C"), Some("S"), None],
            "Ticket" => [Some("A/5"), None, Some("PC"), Some("113803")],
        ]
        .unwrap();
        let mut steps = vec![];

        let df = PreprocessingExecutor.impute_missing(df, &mut steps).unwrap();

        for col in ["Age", "Fare", "Embarked"] {
            assert_eq!(df.column(col).unwrap().null_count(), 0, "{col}");
        }
        // Untargeted columns keep their gaps
        assert_eq!(df.column("Ticket").unwrap().null_count(), 1);
        assert_eq!(steps.len(), 3);
    }
}
