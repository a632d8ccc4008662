//! Integration tests for the load → clean → analyze → export flow
//!
//! Each test writes an order CSV into a temp directory and drives the public
//! API the binaries use.
//!
//! Key integration points tested:
//! - Regional example and sort order of every ranked view
//! - Conservation of order counts across groupings
//! - Missing dataset degrading to empty views
//! - Repeat customer counting
//! - Export backends writing readable files

#[cfg(test)]
mod analysis_integration_tests {
    use salesflow::analysis_core::{DatasetLoader, LoadError, SalesAnalyzer};
    use salesflow::export::{ExportBundle, ExportFormat, ExportTarget, ReportWriter};
    use salesflow::sample;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const HEADER: &str = "order_id,customer_id,product_name,quantity,total_price,city,payment_method,order_date";

    fn write_orders(dir: &Path, rows: &[&str]) -> PathBuf {
        let path = dir.join("orders.csv");
        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        contents.push('\n');
        fs::write(&path, contents).unwrap();
        path
    }

    fn open(path: &Path) -> SalesAnalyzer {
        let mut loader = DatasetLoader::new(path);
        SalesAnalyzer::open(&mut loader).unwrap()
    }

    #[test]
    fn test_regional_example() {
        let dir = tempdir().unwrap();
        let path = write_orders(
            dir.path(),
            &[
                "OD1,C1,Books,1,100,Mumbai,UPI,2023-01-01",
                "OD2,C2,Books,1,200,Mumbai,UPI,2023-01-02",
                "OD3,C3,Books,1,50,Delhi,COD,2023-01-03",
            ],
        );

        let regions = open(&path).regional_performance();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].city, "Mumbai");
        assert_eq!(regions[0].total_revenue, 300.0);
        assert_eq!(regions[0].avg_order_value, 150.0);
        assert_eq!(regions[0].order_count, 2);
        assert_eq!(regions[1].city, "Delhi");
        assert_eq!(regions[1].total_revenue, 50.0);
        assert_eq!(regions[1].avg_order_value, 50.0);
        assert_eq!(regions[1].order_count, 1);
    }

    #[test]
    fn test_generated_dataset_invariants() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        sample::write_table(&path, &sample::generate(500, Some(99))).unwrap();

        let analyzer = open(&path);
        let rows = analyzer.table().unwrap().len();

        let products = analyzer.top_products();
        let regions = analyzer.regional_performance();
        let payments = analyzer.payment_methods();
        let behavior = analyzer.customer_behavior();

        // Conservation
        assert_eq!(products.iter().map(|p| p.order_count).sum::<usize>(), rows);
        assert_eq!(regions.iter().map(|c| c.order_count).sum::<usize>(), rows);
        assert_eq!(payments.iter().map(|m| m.order_count).sum::<usize>(), rows);
        assert_eq!(behavior.profiles.iter().map(|p| p.order_count).sum::<usize>(), rows);

        // Sort correctness
        assert!(products.windows(2).all(|w| w[0].total_revenue >= w[1].total_revenue));
        assert!(regions.windows(2).all(|w| w[0].total_revenue >= w[1].total_revenue));
        assert!(payments.windows(2).all(|w| w[0].order_count >= w[1].order_count));

        let trends = analyzer.revenue_trends();
        assert!(trends.windows(2).all(|w| w[0].month < w[1].month));
        assert!(trends[0].growth_pct.is_none());

        // Determinism
        assert_eq!(analyzer.generate_report(), analyzer.generate_report());
    }

    #[tokio::test]
    async fn test_nonexistent_path_degrades_to_empty_views() {
        let dir = tempdir().unwrap();
        let mut loader = DatasetLoader::new(dir.path().join("absent.csv"));

        assert!(matches!(SalesAnalyzer::open(&mut loader), Err(LoadError::NotFound(_))));

        let analyzer = SalesAnalyzer::open_or_empty(&mut loader);
        assert!(analyzer.top_products().is_empty());
        assert!(analyzer.revenue_trends().is_empty());
        assert!(analyzer.regional_performance().is_empty());
        assert!(analyzer.payment_methods().is_empty());
        assert!(analyzer.customer_behavior().is_empty());
        assert!(analyzer.generate_report().is_none());

        let views = analyzer.compute_views().await.unwrap();
        assert!(views.report.is_none());
    }

    #[test]
    fn test_repeat_customers() {
        let dir = tempdir().unwrap();
        let path = write_orders(
            dir.path(),
            &[
                "OD1,C1,Books,1,10,Pune,UPI,2023-01-01",
                "OD2,C1,Books,1,10,Pune,UPI,2023-01-02",
                "OD3,C1,Books,1,10,Pune,UPI,2023-01-03",
                "OD4,C2,Books,1,10,Pune,UPI,2023-01-04",
                "OD5,C3,Books,1,10,Pune,UPI,2023-01-05",
                "OD6,C3,Books,1,10,Pune,UPI,2023-01-06",
            ],
        );

        let report = open(&path).generate_report().unwrap();
        assert_eq!(report.overview.total_customers, 3);
        assert_eq!(report.overview.repeat_customers, 2);
    }

    #[tokio::test]
    async fn test_export_every_format() {
        let dir = tempdir().unwrap();
        let path = write_orders(
            dir.path(),
            &[
                "OD1,C1,Electronics,2,1500,Mumbai,Credit Card,2023-10-05 14:30:00",
                "OD2,C2,Fashion,1,800,Delhi,UPI,2023-11-12 09:15:00",
            ],
        );

        let analyzer = open(&path);
        let views = analyzer.compute_views().await.unwrap();
        assert!(views.has_time_of_day);

        let report = views.report.as_ref().unwrap();
        let bundle = ExportBundle {
            report,
            trends: &views.trends,
            table: analyzer.table().unwrap(),
        };

        let out = dir.path().join("exports");
        let mut written = Vec::new();
        for format in [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Json] {
            let mut writer = ReportWriter::new(format, ExportTarget::new(&out, "20231201_120000"));
            written.extend(writer.write(&bundle).await.unwrap());
        }

        assert!(written.iter().all(|f| f.exists()));
        assert!(out.join("ecommerce_analysis_20231201_120000.xlsx").exists());
        assert!(out.join("raw_ecommerce_data_20231201_120000.csv").exists());

        let json = fs::read_to_string(out.join("analysis_report_20231201_120000.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["product_analysis"][0]["Product"], "Electronics");
        assert_eq!(value["overview"]["total_revenue"], 2300.0);
    }
}
