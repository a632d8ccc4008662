//! Load and schema errors for the analysis pipeline

use std::path::PathBuf;

#[derive(Debug)]
pub enum SchemaError {
    MissingColumn(String),
    UnparseableDate { row: usize, value: String },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::MissingColumn(col) => write!(f, "Missing required column: {}", col),
            SchemaError::UnparseableDate { row, value } => {
                write!(f, "Unparseable order_date at row {}: {:?}", row, value)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    Io(std::io::Error),
    Csv(csv::Error),
    Schema(SchemaError),
    Malformed { line: u64, reason: String },
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<SchemaError> for LoadError {
    fn from(err: SchemaError) -> Self {
        LoadError::Schema(err)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "Dataset not found: {}", path.display()),
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Csv(e) => write!(f, "CSV error: {}", e),
            LoadError::Schema(e) => write!(f, "Schema error: {}", e),
            LoadError::Malformed { line, reason } => {
                write!(f, "Malformed row at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for LoadError {}
