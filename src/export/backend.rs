//! Writer backend trait for analysis exports
//!
//! Defines the interface for writing a finished analysis to different file formats.

use crate::analysis_core::{AnalysisReport, CleanedTable, MonthlyRevenue};
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Serialization(serde_json::Error),
    Spreadsheet(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Csv(e) => write!(f, "CSV error: {}", e),
            ExportError::Serialization(e) => write!(f, "Serialization error: {}", e),
            ExportError::Spreadsheet(e) => write!(f, "Spreadsheet error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Everything an export may draw from
pub struct ExportBundle<'a> {
    pub report: &'a AnalysisReport,
    pub trends: &'a [MonthlyRevenue],
    pub table: &'a CleanedTable,
}

/// Output directory plus the timestamp shared by every file of one export
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub dir: PathBuf,
    pub stamp: String,
}

impl ExportTarget {
    pub fn new(dir: impl Into<PathBuf>, stamp: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stamp: stamp.into(),
        }
    }

    /// Target stamped with the current local time (`%Y%m%d_%H%M%S`)
    pub fn now(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, Local::now().format("%Y%m%d_%H%M%S").to_string())
    }

    /// `<dir>/<stem>_<stamp>.<ext>`
    pub fn file(&self, stem: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.{}", stem, self.stamp, ext))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Backend trait for writing analysis exports
#[async_trait]
pub trait ReportWriterBackend: Send {
    /// Write the bundle; returns the files created
    async fn write(&mut self, bundle: &ExportBundle<'_>) -> Result<Vec<PathBuf>, ExportError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
