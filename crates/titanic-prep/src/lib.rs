//! Titanic Preprocessing Library
//!
//! A batch preprocessing pipeline for the Titanic passenger dataset, built
//! on Polars.
//!
//! # Overview
//!
//! One run loads a CSV table and applies, in this fixed order:
//!
//! - **Reporting**: shape, leading rows, dtypes and missing values of the raw table
//! - **Column drop**: removes `Cabin` (configurable)
//! - **Imputation**: median for `Age`/`Fare`, mode for `Embarked`
//! - **Outlier removal**: IQR fences on `Age` then `Fare` (optional)
//! - **Encoding**: `Sex` to 0/1, `Embarked` to drop-first one-hot columns
//! - **Standardization**: z-scores for `Age` and `Fare`
//!
//! and writes the result back to CSV. Any failure aborts the run before
//! anything is written.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use titanic_prep::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::builder()
//!     .input_path("TitanicDataset.csv")
//!     .output_path("out/titanic_preprocessed.csv")
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! println!("Rows removed: {}", result.summary.rows_removed);
//! ```
//!
//! Use [`Pipeline::process`] to transform an in-memory `DataFrame` without
//! touching the filesystem.

pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use error::{PreprocessingError, Result as PreprocessingResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use io::{load_csv, write_csv};
pub use pipeline::{
    BoxplotComparison, BoxplotSink, CategoricalEncoder, ClosureBoxplotSink,
    ClosureProgressReporter, ColumnBoxplot, OutlierHandler, OutlierReport, Pipeline,
    PipelineBuilder, PreprocessingExecutor, PreprocessingStage, ProgressReporter, ProgressUpdate,
    Standardizer,
};
pub use profiler::{BoxplotStats, DataProfiler};
pub use reporting::DatasetReport;
pub use types::{ColumnProfile, DatasetProfile, PipelineResult, PreprocessingSummary};
pub use utils::{
    DtypeCategory, dtype_category_str, fill_numeric_nulls, fill_string_nulls, get_dtype_category,
    is_numeric_dtype,
};
