use {
    crate::analysis_core::{AnalysisReport, AnalysisViews, DatasetLoader, SalesAnalyzer},
    chrono::{DateTime, Local},
    std::path::Path,
    tokio::task::JoinError,
};

/// Dashboard tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Products,
    Regions,
    Payments,
    Customers,
    Trends,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Products,
        Tab::Regions,
        Tab::Payments,
        Tab::Customers,
        Tab::Trends,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Products => "Products",
            Tab::Regions => "Regions",
            Tab::Payments => "Payments",
            Tab::Customers => "Customers",
            Tab::Trends => "Trends",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Dashboard state: the loader, the last computed views and UI selection
///
/// Shared between the event loop and rendering behind `Arc<RwLock<_>>`.
pub struct DashboardState {
    loader: DatasetLoader,
    views: AnalysisViews,
    tab: Tab,
    currency: String,
    top_n: usize,
    loaded_at: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new(loader: DatasetLoader, currency: impl Into<String>, top_n: usize) -> Self {
        Self {
            loader,
            views: AnalysisViews::default(),
            tab: Tab::Products,
            currency: currency.into(),
            top_n,
            loaded_at: None,
        }
    }

    /// Load (from the loader cache when warm) and recompute every view
    ///
    /// A load failure is logged and leaves the dashboard in its no-data state.
    pub async fn refresh(&mut self) -> Result<(), JoinError> {
        let analyzer = SalesAnalyzer::open_or_empty(&mut self.loader);
        self.views = analyzer.compute_views().await?;
        self.loaded_at = Some(Local::now());
        log::debug!(
            "Dashboard views computed ({} orders)",
            self.report().map_or(0, |r| r.overview.total_orders)
        );
        Ok(())
    }

    /// Drop the cached table and re-read the file
    pub async fn reload(&mut self) -> Result<(), JoinError> {
        self.loader.invalidate();
        self.refresh().await
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.views.report.as_ref()
    }

    pub fn views(&self) -> &AnalysisViews {
        &self.views
    }

    pub fn has_data(&self) -> bool {
        self.report().is_some_and(|r| r.overview.total_orders > 0)
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn data_path(&self) -> &Path {
        self.loader.path()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "order_id,customer_id,product_name,quantity,total_price,city,payment_method,order_date\n";

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Products.next(), Tab::Regions);
        assert_eq!(Tab::Trends.next(), Tab::Products);
        assert_eq!(Tab::Products.prev(), Tab::Trends);
        assert_eq!(Tab::Customers.index(), 3);
    }

    #[tokio::test]
    async fn test_missing_file_gives_no_data() {
        let dir = tempdir().unwrap();
        let mut state = DashboardState::new(DatasetLoader::new(dir.path().join("none.csv")), "₹", 5);
        state.refresh().await.unwrap();

        assert!(!state.has_data());
        assert!(state.report().is_none());
        assert!(state.loaded_at().is_some());
    }

    #[tokio::test]
    async fn test_reload_picks_up_file_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, format!("{}OD1,C1,Books,1,100,Pune,UPI,2023-01-01\n", HEADER)).unwrap();

        let mut state = DashboardState::new(DatasetLoader::new(&path), "₹", 5);
        state.refresh().await.unwrap();
        assert_eq!(state.report().unwrap().overview.total_orders, 1);

        fs::write(
            &path,
            format!(
                "{}OD1,C1,Books,1,100,Pune,UPI,2023-01-01\nOD2,C2,Toys,2,50,Delhi,COD,2023-02-01\n",
                HEADER
            ),
        )
        .unwrap();

        // cached until invalidated
        state.refresh().await.unwrap();
        assert_eq!(state.report().unwrap().overview.total_orders, 1);

        state.reload().await.unwrap();
        assert_eq!(state.report().unwrap().overview.total_orders, 2);
    }
}
