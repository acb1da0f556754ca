//! Pipeline module.
//!
//! The [`Pipeline`] driver and the stages it runs, in order: column drop and
//! imputation ([`PreprocessingExecutor`]), IQR outlier removal
//! ([`OutlierHandler`]), categorical encoding ([`CategoricalEncoder`]) and
//! z-score standardization ([`Standardizer`]).

pub mod boxplot;
mod builder;
pub mod encoding;
mod executor;
pub mod outliers;
pub mod progress;
pub mod scaling;

pub use boxplot::{BoxplotComparison, BoxplotSink, ClosureBoxplotSink, ColumnBoxplot};
pub use builder::{BOXPLOT_TITLE, Pipeline, PipelineBuilder};
pub use encoding::CategoricalEncoder;
pub use executor::{MEDIAN_IMPUTED_COLUMNS, MODE_IMPUTED_COLUMNS, PreprocessingExecutor};
pub use outliers::{ColumnOutliers, OutlierHandler, OutlierReport};
pub use progress::{ClosureProgressReporter, PreprocessingStage, ProgressReporter, ProgressUpdate};
pub use scaling::{STANDARDIZED_COLUMNS, Standardizer};
