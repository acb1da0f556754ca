//! Dataset reporting module.
//!
//! A [`DatasetReport`] is a pure observation of a table: shape, first rows,
//! per-column dtype and non-null count, and missing counts/percentages. Its
//! `Display` form is the console diagnostic printed by the pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use titanic_prep::reporting::DatasetReport;
//!
//! let report = DatasetReport::build(&df, "Original dataset");
//! println!("{report}");
//! println!("{}", report.missing_counts());
//! ```

mod generator;

pub use generator::{DatasetReport, HEAD_ROWS, MissingCounts};
