//! JSON export of the full report

use super::backend::{ExportBundle, ExportError, ExportTarget, ReportWriterBackend};
use crate::analysis_core::{AnalysisReport, MonthlyRevenue};
use async_trait::async_trait;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(flatten)]
    report: &'a AnalysisReport,
    revenue_trends: &'a [MonthlyRevenue],
}

pub struct JsonReportWriter {
    target: ExportTarget,
}

impl JsonReportWriter {
    pub fn new(target: ExportTarget) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ReportWriterBackend for JsonReportWriter {
    async fn write(&mut self, bundle: &ExportBundle<'_>) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(self.target.dir())?;
        let path = self.target.file("analysis_report", "json");

        let document = JsonDocument {
            report: bundle.report,
            revenue_trends: bundle.trends,
        };

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        log::info!("📝 JSON report written: {}", path.display());
        Ok(vec![path])
    }

    fn backend_type(&self) -> &'static str {
        "JSON"
    }
}
