//! Columnar table loading.
//!
//! Parquet is the pipeline's native format; CSV is accepted so already
//! exported tables can be re-encoded. CSV cells are read as text so values
//! such as `007` survive a conversion unchanged.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Source format of a columnar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Csv,
}

impl TableFormat {
    /// Detect the format from the file extension. Unknown extensions are
    /// treated as Parquet.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => TableFormat::Csv,
            _ => TableFormat::Parquet,
        }
    }
}

/// Read a whole table into memory.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = TableFormat::from_path(path);
    let df = match format {
        TableFormat::Parquet => read_parquet(path)?,
        TableFormat::Csv => read_csv(path)?,
    };
    debug!(
        path = %path.display(),
        ?format,
        rows = df.height(),
        columns = df.width(),
        "table loaded"
    );
    Ok(df)
}

fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| table_error(path, &e))
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| table_error(path, &e))?
        .finish()
        .map_err(|e| table_error(path, &e))
}

fn table_error(path: &Path, error: &PolarsError) -> IngestError {
    IngestError::TableRead {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Column names in table order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}
