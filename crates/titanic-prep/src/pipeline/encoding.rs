//! Categorical encoding.
//!
//! `Sex` is label-encoded (`male` -> 0, `female` -> 1). `Embarked` is
//! one-hot encoded with the lexicographically first category dropped as the
//! reference level. Both encoders leave already-encoded tables untouched.

use crate::error::Result;
use crate::utils::has_column;
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Column label-encoded by [`CategoricalEncoder::encode_sex`].
pub const SEX_COLUMN: &str = "Sex";

/// Column one-hot encoded by [`CategoricalEncoder::encode_embarked`].
pub const EMBARKED_COLUMN: &str = "Embarked";

/// Fixed label mapping for `Sex`.
pub const SEX_MAPPING: [(&str, i32); 2] = [("male", 0), ("female", 1)];

/// Encodes categorical columns into numeric/indicator form.
pub struct CategoricalEncoder;

impl CategoricalEncoder {
    /// Encode `Sex` then `Embarked`.
    pub fn encode(df: DataFrame, processing_steps: &mut Vec<String>) -> Result<DataFrame> {
        let df = Self::encode_sex(df, processing_steps)?;
        Self::encode_embarked(df, processing_steps)
    }

    /// Map `Sex` through [`SEX_MAPPING`]; any other value becomes missing.
    ///
    /// Skipped when the column is absent or not a string column.
    pub fn encode_sex(mut df: DataFrame, processing_steps: &mut Vec<String>) -> Result<DataFrame> {
        if !has_column(&df, SEX_COLUMN) {
            return Ok(df);
        }
        let series = df.column(SEX_COLUMN)?.as_materialized_series().clone();
        if !matches!(series.dtype(), DataType::String) {
            debug!("'{}' is already {}; not re-encoding", SEX_COLUMN, series.dtype());
            return Ok(df);
        }

        let encoded: Vec<Option<i32>> = series
            .str()?
            .into_iter()
            .map(|v| {
                v.and_then(|s| {
                    SEX_MAPPING
                        .iter()
                        .find(|(label, _)| *label == s)
                        .map(|(_, code)| *code)
                })
            })
            .collect();
        let encoded = Series::new(SEX_COLUMN.into(), encoded);
        let unmapped = encoded.null_count() - series.null_count();
        df.replace(SEX_COLUMN, encoded)?;

        processing_steps.push(format!(
            "Encoded '{}' as male=0, female=1 ({} unmapped values)",
            SEX_COLUMN, unmapped
        ));
        Ok(df)
    }

    /// One-hot encode `Embarked` with drop-first.
    pub fn encode_embarked(df: DataFrame, processing_steps: &mut Vec<String>) -> Result<DataFrame> {
        Self::one_hot_drop_first(df, EMBARKED_COLUMN, processing_steps)
    }

    /// Replace `col_name` by one boolean column `<col_name>_<category>` per
    /// distinct category except the lexicographically first.
    ///
    /// Indicator columns are appended after the existing columns, in category
    /// order. Rows with a missing value get `false` in every indicator.
    pub fn one_hot_drop_first(
        df: DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        if !has_column(&df, col_name) {
            return Ok(df);
        }

        let series = df
            .column(col_name)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        let values = series.str()?;

        let categories: BTreeSet<&str> = values.into_iter().flatten().collect();
        let mut categories = categories.into_iter();
        let reference = categories.next();

        let mut out = df.drop(col_name)?;
        let mut added = Vec::new();
        for category in categories {
            let name = format!("{}_{}", col_name, category);
            let indicator: Vec<bool> = values
                .into_iter()
                .map(|v| v == Some(category))
                .collect();
            out.with_column(Series::new(name.as_str().into(), indicator))?;
            added.push(name);
        }

        processing_steps.push(format!(
            "One-hot encoded '{}' into {:?} (reference: {})",
            col_name,
            added,
            reference.unwrap_or("none")
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    fn bools(df: &DataFrame, name: &str) -> Vec<Option<bool>> {
        df.column(name).unwrap().bool().unwrap().into_iter().collect()
    }

    // ==================== encode_sex tests ====================

    #[test]
    fn test_encode_sex_mapping() {
        let df = df![
            "Sex" => [Some("male"), Some("female"), None, Some("unknown")],
        ]
        .unwrap();
        let mut steps = vec![];

        let df = CategoricalEncoder::encode_sex(df, &mut steps).unwrap();

        let sex: Vec<Option<i32>> = df.column("Sex").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(sex, vec![Some(0), Some(1), None, None]);
        assert!(steps[0].contains("1 unmapped"));
    }

    #[test]
    fn test_encode_sex_is_idempotent() {
        let df = df![
            "Sex" => ["male", "female"],
        ]
        .unwrap();
        let mut steps = vec![];

        let once = CategoricalEncoder::encode_sex(df, &mut steps).unwrap();
        let twice = CategoricalEncoder::encode_sex(once.clone(), &mut steps).unwrap();
        assert!(once.equals_missing(&twice));
        assert_eq!(steps.len(), 1);
    }

    // ==================== one-hot tests ====================

    #[test]
    fn test_encode_embarked_drop_first() {
        let df = df![
            "PassengerId" => [1i64, 2, 3, 4],
            "Embarked" => ["S", "C", "S", "Q"],
        ]
        .unwrap();
        let mut steps = vec![];

        let df = CategoricalEncoder::encode_embarked(df, &mut steps).unwrap();

        assert_eq!(
            column_names(&df),
            vec!["PassengerId", "Embarked_Q", "Embarked_S"]
        );
        assert_eq!(
            bools(&df, "Embarked_Q"),
            vec![Some(false), Some(false), Some(false), Some(true)]
        );
        assert_eq!(
            bools(&df, "Embarked_S"),
            vec![Some(true), Some(false), Some(true), Some(false)]
        );
    }

    #[test]
    fn test_encode_embarked_at_most_one_indicator_per_row() {
        let df = df![
            "Embarked" => [Some("S"), Some("C"), Some("Q"), None, Some("S")],
        ]
        .unwrap();
        let mut steps = vec![];

        let df = CategoricalEncoder::encode_embarked(df, &mut steps).unwrap();

        let q = bools(&df, "Embarked_Q");
        let s = bools(&df, "Embarked_S");
        for row in 0..df.height() {
            let set = [q[row], s[row]].iter().filter(|v| **v == Some(true)).count();
            assert!(set <= 1);
        }
        // Missing row has every indicator false
        assert_eq!((q[3], s[3]), (Some(false), Some(false)));
    }

    #[test]
    fn test_encode_embarked_single_category_yields_no_columns() {
        let df = df![
            "Fare" => [7.25, 8.05],
            "Embarked" => ["S", "S"],
        ]
        .unwrap();
        let mut steps = vec![];

        let df = CategoricalEncoder::encode_embarked(df, &mut steps).unwrap();
        assert_eq!(column_names(&df), vec!["Fare"]);
    }

    #[test]
    fn test_encode_scenario_from_imputed_embarked() {
        // ["S", "C", "S", missing] imputed with mode "S"
        let df = df![
            "Embarked" => ["S", "C", "S", "S"],
        ]
        .unwrap();
        let mut steps = vec![];

        let df = CategoricalEncoder::encode_embarked(df, &mut steps).unwrap();
        assert_eq!(column_names(&df), vec!["Embarked_S"]);
        assert!(steps[0].contains("reference: C"));
    }

    #[test]
    fn test_encode_is_noop_on_encoded_table() {
        let df = df![
            "Sex" => ["female", "male", "female"],
            "Embarked" => ["C", "Q", "S"],
            "Age" => [1.0, 2.0, 3.0],
        ]
        .unwrap();
        let mut steps = vec![];

        let encoded = CategoricalEncoder::encode(df, &mut steps).unwrap();
        let again = CategoricalEncoder::encode(encoded.clone(), &mut steps).unwrap();

        assert!(encoded.equals_missing(&again));
        assert_eq!(column_names(&again), vec!["Sex", "Age", "Embarked_Q", "Embarked_S"]);
    }

    #[test]
    fn test_encode_absent_columns() {
        let df = df![
            "Age" => [1.0, 2.0],
        ]
        .unwrap();
        let mut steps = vec![];

        let df = CategoricalEncoder::encode(df, &mut steps).unwrap();
        assert_eq!(column_names(&df), vec!["Age"]);
        assert!(steps.is_empty());
    }
}
