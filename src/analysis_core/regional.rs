//! City-level performance

use super::grouping::{group_by, round2, sort_desc_by, Totals};
use super::order::CleanedTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: f64,
    #[serde(rename = "Avg Order Value")]
    pub avg_order_value: f64,
    #[serde(rename = "Number of Orders")]
    pub order_count: usize,
}

/// Cities ranked by total revenue, highest first
pub fn regional_performance(table: &CleanedTable) -> Vec<CitySummary> {
    let mut cities: Vec<CitySummary> = group_by(
        table.orders(),
        |o| o.order.city.clone(),
        |acc: &mut Totals, o| acc.add(o),
    )
    .into_iter()
    .map(|(city, totals)| CitySummary {
        city,
        total_revenue: round2(totals.revenue),
        avg_order_value: round2(totals.mean_order_value()),
        order_count: totals.orders,
    })
    .collect();

    sort_desc_by(&mut cities, |c| c.total_revenue);
    cities
}
