//! CSV export - one file per view plus the cleaned dataset

use super::backend::{ExportBundle, ExportError, ExportTarget, ReportWriterBackend};
use crate::analysis_core::{CleanOrderRow, Describe};
use async_trait::async_trait;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvReportWriter {
    target: ExportTarget,
}

#[derive(Serialize)]
struct DescribeRow {
    statistic: &'static str,
    purchase_frequency: Option<f64>,
    avg_order_value: Option<f64>,
    lifetime_value: Option<f64>,
}

impl CsvReportWriter {
    pub fn new(target: ExportTarget) -> Self {
        Self { target }
    }
}

fn write_rows<T, I>(path: &Path, rows: I) -> Result<(), ExportError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn describe_table(frequency: &Describe, aov: &Describe, lifetime: &Describe) -> Vec<DescribeRow> {
    let (f, a, l) = (frequency.rows(), aov.rows(), lifetime.rows());
    (0..f.len())
        .map(|i| DescribeRow {
            statistic: f[i].0,
            purchase_frequency: f[i].1,
            avg_order_value: a[i].1,
            lifetime_value: l[i].1,
        })
        .collect()
}

#[async_trait]
impl ReportWriterBackend for CsvReportWriter {
    async fn write(&mut self, bundle: &ExportBundle<'_>) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(self.target.dir())?;
        let report = bundle.report;
        let behavior = &report.customer_behavior;
        let mut files = Vec::new();

        let path = self.target.file("overview", "csv");
        // Header row plus one metric per line
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["Metric", "Value"])?;
        for (label, value) in report.overview.rows() {
            writer.write_record([label.to_string(), value.to_string()])?;
        }
        writer.flush()?;
        files.push(path);

        let path = self.target.file("product_analysis", "csv");
        write_rows(&path, &report.product_analysis)?;
        files.push(path);

        let path = self.target.file("regional_analysis", "csv");
        write_rows(&path, &report.regional_analysis)?;
        files.push(path);

        let path = self.target.file("payment_analysis", "csv");
        write_rows(&path, &report.payment_analysis)?;
        files.push(path);

        let path = self.target.file("customer_profiles", "csv");
        write_rows(&path, &behavior.profiles)?;
        files.push(path);

        let path = self.target.file("customer_behavior", "csv");
        write_rows(
            &path,
            describe_table(
                &behavior.purchase_frequency,
                &behavior.avg_order_value,
                &behavior.customer_lifetime,
            ),
        )?;
        files.push(path);

        let path = self.target.file("revenue_trends", "csv");
        write_rows(&path, bundle.trends)?;
        files.push(path);

        let path = self.target.file("raw_ecommerce_data", "csv");
        write_rows(&path, bundle.table.orders().iter().map(CleanOrderRow::from))?;
        files.push(path);

        log::info!(
            "📝 Wrote {} CSV files to {}",
            files.len(),
            self.target.dir().display()
        );
        Ok(files)
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_core::test_support::{cleaned, OrderSpec};
    use crate::analysis_core::{generate_report, revenue_trends};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_csv_files_written() {
        let dir = tempdir().unwrap();
        let table = cleaned(&[
            OrderSpec::new("C1", 250.0).product("Books").date("2023-03-04"),
            OrderSpec::new("C1", 50.0).product("Toys").date("2023-04-04"),
        ]);
        let report = generate_report(&table);
        let trends = revenue_trends(&table);
        let bundle = ExportBundle {
            report: &report,
            trends: &trends,
            table: &table,
        };

        let mut writer = CsvReportWriter::new(ExportTarget::new(dir.path(), "stamp"));
        let files = writer.write(&bundle).await.unwrap();
        assert_eq!(files.len(), 8);
        assert!(files.iter().all(|f| f.exists()));

        let products = fs::read_to_string(dir.path().join("product_analysis_stamp.csv")).unwrap();
        let mut lines = products.lines();
        assert_eq!(
            lines.next(),
            Some("Product,Total Revenue,Units Sold,Number of Orders")
        );
        assert_eq!(lines.next(), Some("Books,250.0,1,1"));

        let raw = fs::read_to_string(dir.path().join("raw_ecommerce_data_stamp.csv")).unwrap();
        assert_eq!(raw.lines().count(), 3);
        assert!(raw.lines().next().unwrap().contains("day_of_week"));
    }
}
