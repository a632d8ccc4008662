//! Payment method usage

use super::grouping::{group_by, round2, sort_desc_by, Totals};
use super::order::CleanedTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    #[serde(rename = "Payment Method")]
    pub method: String,
    #[serde(rename = "Number of Orders")]
    pub order_count: usize,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: f64,
    #[serde(rename = "Avg Order Value")]
    pub avg_order_value: f64,
}

/// Payment methods ranked by number of orders, most used first
pub fn payment_methods(table: &CleanedTable) -> Vec<PaymentSummary> {
    let mut methods: Vec<PaymentSummary> = group_by(
        table.orders(),
        |o| o.order.payment_method.clone(),
        |acc: &mut Totals, o| acc.add(o),
    )
    .into_iter()
    .map(|(method, totals)| PaymentSummary {
        method,
        order_count: totals.orders,
        total_revenue: round2(totals.revenue),
        avg_order_value: round2(totals.mean_order_value()),
    })
    .collect();

    sort_desc_by(&mut methods, |m| m.order_count as f64);
    methods
}
