//! Analysis Core - order table to ranked summaries
//!
//! # Architecture
//!
//! ```text
//! CSV file → loader (DatasetLoader, memoized) → OrderTable
//!     ↓
//! cleaner (typed timestamp + month / day_of_week / hour)
//!     ↓
//! CleanedTable (immutable, shared via Arc)
//!     ↓
//! products · trends · regional · payments · customers
//!     ↓
//! report (overview + views) → export / text_report / ui
//! ```

pub mod analyzer;
pub mod cleaner;
pub mod customers;
pub mod error;
pub mod grouping;
pub mod loader;
pub mod order;
pub mod payments;
pub mod products;
pub mod regional;
pub mod report;
pub mod stats;
pub mod trends;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyzer::{AnalysisViews, SalesAnalyzer};
pub use cleaner::{clean, parse_order_date};
pub use customers::{customer_behavior, CustomerBehavior, CustomerProfile};
pub use error::{LoadError, SchemaError};
pub use loader::{load, DatasetLoader};
pub use order::{CleanOrder, CleanOrderRow, CleanedTable, Order, OrderTable, YearMonth};
pub use payments::{payment_methods, PaymentSummary};
pub use products::{top_products, ProductSummary};
pub use regional::{regional_performance, CitySummary};
pub use report::{generate_report, AnalysisReport, Overview};
pub use stats::Describe;
pub use trends::{revenue_trends, MonthlyRevenue};
