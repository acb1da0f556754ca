//! Imputation module for filling missing values.

mod statistical;

pub use statistical::StatisticalImputer;
