//! Analysis session over one cleaned table
//!
//! The session owns an optional table: when loading or cleaning failed it is
//! empty, and every operation answers with an empty view instead of failing.

use super::cleaner::clean;
use super::customers::{customer_behavior, CustomerBehavior};
use super::error::LoadError;
use super::loader::DatasetLoader;
use super::order::CleanedTable;
use super::payments::{payment_methods, PaymentSummary};
use super::products::{top_products, ProductSummary};
use super::regional::{regional_performance, CitySummary};
use super::report::{assemble, generate_report, AnalysisReport};
use super::trends::{revenue_trends, MonthlyRevenue};
use std::sync::Arc;
use tokio::task::{spawn_blocking, JoinError};

/// Every view the presentation layers need, computed in one pass
#[derive(Debug, Clone, Default)]
pub struct AnalysisViews {
    pub report: Option<AnalysisReport>,
    pub trends: Vec<MonthlyRevenue>,
    pub has_time_of_day: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SalesAnalyzer {
    table: Option<Arc<CleanedTable>>,
}

impl SalesAnalyzer {
    pub fn new(table: Option<CleanedTable>) -> Self {
        Self {
            table: table.map(Arc::new),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load through `loader` and clean the result
    pub fn open(loader: &mut DatasetLoader) -> Result<Self, LoadError> {
        let table = loader.load()?;
        let cleaned = clean(Some(table.as_ref()))?;
        Ok(Self::new(cleaned))
    }

    /// Like `open`, but a failure is logged and yields an empty session
    pub fn open_or_empty(loader: &mut DatasetLoader) -> Self {
        match Self::open(loader) {
            Ok(analyzer) => analyzer,
            Err(e) => {
                log::error!("❌ Error loading data from {}: {}", loader.path().display(), e);
                Self::empty()
            }
        }
    }

    pub fn table(&self) -> Option<&CleanedTable> {
        self.table.as_deref()
    }

    pub fn has_data(&self) -> bool {
        self.table.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn top_products(&self) -> Vec<ProductSummary> {
        self.table().map(top_products).unwrap_or_default()
    }

    pub fn revenue_trends(&self) -> Vec<MonthlyRevenue> {
        self.table().map(revenue_trends).unwrap_or_default()
    }

    pub fn regional_performance(&self) -> Vec<CitySummary> {
        self.table().map(regional_performance).unwrap_or_default()
    }

    pub fn payment_methods(&self) -> Vec<PaymentSummary> {
        self.table().map(payment_methods).unwrap_or_default()
    }

    pub fn customer_behavior(&self) -> CustomerBehavior {
        self.table().map(customer_behavior).unwrap_or_default()
    }

    /// `None` when there is no table at all
    pub fn generate_report(&self) -> Option<AnalysisReport> {
        self.table().map(generate_report)
    }

    /// Compute all views on the blocking pool, one task per view
    ///
    /// Tasks only read the shared table.
    pub async fn compute_views(&self) -> Result<AnalysisViews, JoinError> {
        let Some(table) = self.table.clone() else {
            return Ok(AnalysisViews::default());
        };

        let products = spawn_blocking({
            let t = Arc::clone(&table);
            move || top_products(&t)
        });
        let regions = spawn_blocking({
            let t = Arc::clone(&table);
            move || regional_performance(&t)
        });
        let payments = spawn_blocking({
            let t = Arc::clone(&table);
            move || payment_methods(&t)
        });
        let customers = spawn_blocking({
            let t = Arc::clone(&table);
            move || customer_behavior(&t)
        });
        let trends = spawn_blocking({
            let t = Arc::clone(&table);
            move || revenue_trends(&t)
        });

        let (products, regions, payments, customers, trends) =
            tokio::join!(products, regions, payments, customers, trends);

        Ok(AnalysisViews {
            report: Some(assemble(&table, products?, regions?, payments?, customers?)),
            trends: trends?,
            has_time_of_day: table.has_time_of_day(),
        })
    }
}
