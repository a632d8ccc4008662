//! Top products by revenue

use super::grouping::{group_by, round2, sort_desc_by, Totals};
use super::order::CleanedTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: f64,
    #[serde(rename = "Units Sold")]
    pub units_sold: u64,
    #[serde(rename = "Number of Orders")]
    pub order_count: usize,
}

/// Products ranked by total revenue, highest first
pub fn top_products(table: &CleanedTable) -> Vec<ProductSummary> {
    let mut products: Vec<ProductSummary> = group_by(
        table.orders(),
        |o| o.order.product_name.clone(),
        |acc: &mut Totals, o| acc.add(o),
    )
    .into_iter()
    .map(|(product, totals)| ProductSummary {
        product,
        total_revenue: round2(totals.revenue),
        units_sold: totals.units,
        order_count: totals.orders,
    })
    .collect();

    sort_desc_by(&mut products, |p| p.total_revenue);
    products
}
