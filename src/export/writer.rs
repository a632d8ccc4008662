//! Unified export interface
//!
//! Routes an export to the workbook, CSV or JSON backend based on the chosen format.

use super::backend::{ExportBundle, ExportError, ExportTarget, ReportWriterBackend};
use super::csv_writer::CsvReportWriter;
use super::excel_writer::ExcelReportWriter;
use super::json_writer::JsonReportWriter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

/// Unified writer that routes to one export backend
pub enum ReportWriter {
    Excel(ExcelReportWriter),
    Csv(CsvReportWriter),
    Json(JsonReportWriter),
}

impl ReportWriter {
    pub fn new(format: ExportFormat, target: ExportTarget) -> Self {
        match format {
            ExportFormat::Xlsx => ReportWriter::Excel(ExcelReportWriter::new(target)),
            ExportFormat::Csv => ReportWriter::Csv(CsvReportWriter::new(target)),
            ExportFormat::Json => ReportWriter::Json(JsonReportWriter::new(target)),
        }
    }

    pub async fn write(&mut self, bundle: &ExportBundle<'_>) -> Result<Vec<PathBuf>, ExportError> {
        match self {
            ReportWriter::Excel(w) => w.write(bundle).await,
            ReportWriter::Csv(w) => w.write(bundle).await,
            ReportWriter::Json(w) => w.write(bundle).await,
        }
    }

    /// Get backend type for logging
    pub fn backend_type(&self) -> &'static str {
        match self {
            ReportWriter::Excel(w) => w.backend_type(),
            ReportWriter::Csv(w) => w.backend_type(),
            ReportWriter::Json(w) => w.backend_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_routing() {
        let target = ExportTarget::new("out", "x");
        assert_eq!(ReportWriter::new(ExportFormat::Xlsx, target.clone()).backend_type(), "XLSX");
        assert_eq!(ReportWriter::new(ExportFormat::Csv, target.clone()).backend_type(), "CSV");
        assert_eq!(ReportWriter::new(ExportFormat::Json, target).backend_type(), "JSON");
    }
}
