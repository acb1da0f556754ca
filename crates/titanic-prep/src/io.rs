//! CSV loading and saving.

use crate::error::{PreprocessingError, Result, ResultExt};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// Read a header-bearing CSV file into a table.
///
/// Column types are inferred from every row, so a late decimal in an
/// otherwise integer column widens it to a float.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PreprocessingError::InputNotFound(path.to_path_buf()));
    }

    debug!("Loading dataset from: {}", path.display());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Opening {}", path.display()))?
        .finish()
        .context(format!("Parsing {}", path.display()))?;

    info!("Dataset loaded: {:?}", df.shape());
    Ok(df)
}

/// Write a table as CSV with a header row, creating parent directories.
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| PreprocessingError::Io(e).with_context(format!("Creating {}", parent.display())))?;
    }

    let mut file = File::create(path)
        .map_err(|e| PreprocessingError::Io(e).with_context(format!("Creating {}", path.display())))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
        .context(format!("Writing {}", path.display()))?;

    info!("Dataset saved: {}", path.display());
    Ok(())
}
