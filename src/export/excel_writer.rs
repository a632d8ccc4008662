//! Excel workbook export - one sheet per analysis view

use super::backend::{ExportBundle, ExportError, ExportTarget, ReportWriterBackend};
use crate::analysis_core::Describe;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use umya_spreadsheet::{Spreadsheet, Worksheet};

enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

pub struct ExcelReportWriter {
    target: ExportTarget,
}

impl ExcelReportWriter {
    pub fn new(target: ExportTarget) -> Self {
        Self { target }
    }

    fn build_workbook(bundle: &ExportBundle<'_>) -> Result<Spreadsheet, ExportError> {
        let report = bundle.report;
        let mut book = umya_spreadsheet::new_file_empty_worksheet();

        let overview: Vec<Vec<Cell>> = report
            .overview
            .rows()
            .into_iter()
            .map(|(label, value)| vec![label.into(), value.into()])
            .collect();
        write_sheet(&mut book, "Overview", &["Metric", "Value"], overview)?;

        let products = report
            .product_analysis
            .iter()
            .map(|p| {
                vec![
                    p.product.as_str().into(),
                    p.total_revenue.into(),
                    (p.units_sold as f64).into(),
                    (p.order_count as f64).into(),
                ]
            })
            .collect();
        write_sheet(
            &mut book,
            "Product Analysis",
            &["Product", "Total Revenue", "Units Sold", "Number of Orders"],
            products,
        )?;

        let regions = report
            .regional_analysis
            .iter()
            .map(|c| {
                vec![
                    c.city.as_str().into(),
                    c.total_revenue.into(),
                    c.avg_order_value.into(),
                    (c.order_count as f64).into(),
                ]
            })
            .collect();
        write_sheet(
            &mut book,
            "Regional Analysis",
            &["City", "Total Revenue", "Avg Order Value", "Number of Orders"],
            regions,
        )?;

        let payments = report
            .payment_analysis
            .iter()
            .map(|m| {
                vec![
                    m.method.as_str().into(),
                    (m.order_count as f64).into(),
                    m.total_revenue.into(),
                    m.avg_order_value.into(),
                ]
            })
            .collect();
        write_sheet(
            &mut book,
            "Payment Analysis",
            &["Payment Method", "Number of Orders", "Total Revenue", "Avg Order Value"],
            payments,
        )?;

        let behavior = &report.customer_behavior;
        write_sheet(
            &mut book,
            "Customer Behavior",
            &["Statistic", "Purchase Frequency", "Avg Order Value", "Lifetime Value"],
            describe_rows(&[
                &behavior.purchase_frequency,
                &behavior.avg_order_value,
                &behavior.customer_lifetime,
            ]),
        )?;

        let trends = bundle
            .trends
            .iter()
            .map(|m| vec![m.month.to_string().as_str().into(), m.revenue.into(), m.growth_pct.into()])
            .collect();
        write_sheet(&mut book, "Revenue Trends", &["Month", "Revenue", "Growth %"], trends)?;

        Ok(book)
    }
}

/// Side-by-side describe columns, one row per statistic
fn describe_rows(columns: &[&Describe]) -> Vec<Vec<Cell>> {
    let labels = Describe::default().rows().map(|(label, _)| label);
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row: Vec<Cell> = vec![(*label).into()];
            row.extend(columns.iter().map(|d| Cell::from(d.rows()[i].1)));
            row
        })
        .collect()
}

fn write_sheet(
    book: &mut Spreadsheet,
    name: &str,
    headers: &[&str],
    rows: Vec<Vec<Cell>>,
) -> Result<(), ExportError> {
    let sheet: &mut Worksheet = book
        .new_sheet(name)
        .map_err(|e| ExportError::Spreadsheet(format!("Failed to create sheet {}: {}", name, e)))?;

    for (col, header) in headers.iter().enumerate() {
        sheet.get_cell_mut((col as u32 + 1, 1)).set_value(*header);
    }

    for (r, row) in rows.into_iter().enumerate() {
        for (c, cell) in row.into_iter().enumerate() {
            let coord = (c as u32 + 1, r as u32 + 2);
            match cell {
                Cell::Text(text) => {
                    sheet.get_cell_mut(coord).set_value(text);
                }
                Cell::Number(n) => {
                    sheet.get_cell_mut(coord).set_value_number(n);
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(())
}

#[async_trait]
impl ReportWriterBackend for ExcelReportWriter {
    async fn write(&mut self, bundle: &ExportBundle<'_>) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(self.target.dir())?;
        let path = self.target.file("ecommerce_analysis", "xlsx");

        let book = Self::build_workbook(bundle)?;
        umya_spreadsheet::writer::xlsx::write(&book, &path)
            .map_err(|e| ExportError::Spreadsheet(format!("Failed to write workbook: {}", e)))?;

        log::info!("📝 Excel report has been generated: {}", path.display());
        Ok(vec![path])
    }

    fn backend_type(&self) -> &'static str {
        "XLSX"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_core::test_support::{cleaned, OrderSpec};
    use crate::analysis_core::{generate_report, revenue_trends};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_workbook_sheets_and_values() {
        let dir = tempdir().unwrap();
        let table = cleaned(&[
            OrderSpec::new("C1", 100.0).city("Mumbai").date("2023-01-01"),
            OrderSpec::new("C2", 40.0).city("Delhi").date("2023-02-01"),
        ]);
        let report = generate_report(&table);
        let trends = revenue_trends(&table);
        let bundle = ExportBundle {
            report: &report,
            trends: &trends,
            table: &table,
        };

        let mut writer = ExcelReportWriter::new(ExportTarget::new(dir.path(), "20230101_000000"));
        let files = writer.write(&bundle).await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("ecommerce_analysis_20230101_000000.xlsx"));

        let book = umya_spreadsheet::reader::xlsx::read(&files[0]).unwrap();
        for name in [
            "Overview",
            "Product Analysis",
            "Regional Analysis",
            "Payment Analysis",
            "Customer Behavior",
            "Revenue Trends",
        ] {
            assert!(book.get_sheet_by_name(name).is_some(), "missing sheet {}", name);
        }

        let regions = book.get_sheet_by_name("Regional Analysis").unwrap();
        assert_eq!(regions.get_value((1, 1)), "City");
        assert_eq!(regions.get_value((1, 2)), "Mumbai");
        assert_eq!(regions.get_value((2, 2)), "100");
        assert_eq!(regions.get_value((1, 3)), "Delhi");

        let trends_sheet = book.get_sheet_by_name("Revenue Trends").unwrap();
        assert_eq!(trends_sheet.get_value((1, 2)), "2023-01");
        // First month has no growth value
        assert_eq!(trends_sheet.get_value((3, 2)), "");
    }
}
