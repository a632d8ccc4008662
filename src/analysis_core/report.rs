//! Full report assembly

use super::customers::{customer_behavior, CustomerBehavior};
use super::grouping::round2;
use super::order::CleanedTable;
use super::payments::{payment_methods, PaymentSummary};
use super::products::{top_products, ProductSummary};
use super::regional::{regional_performance, CitySummary};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub total_customers: usize,
    pub repeat_customers: usize,
}

impl Overview {
    /// (label, value) pairs for tabular rendering
    pub fn rows(&self) -> [(&'static str, f64); 5] {
        [
            ("Total Orders", self.total_orders as f64),
            ("Total Revenue", self.total_revenue),
            ("Average Order Value", self.average_order_value),
            ("Total Customers", self.total_customers as f64),
            ("Repeat Customers", self.repeat_customers as f64),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub overview: Overview,
    pub product_analysis: Vec<ProductSummary>,
    pub regional_analysis: Vec<CitySummary>,
    pub payment_analysis: Vec<PaymentSummary>,
    pub customer_behavior: CustomerBehavior,
}

pub fn overview(table: &CleanedTable, behavior: &CustomerBehavior) -> Overview {
    let total_orders = table.len();
    let total_revenue: f64 = table.orders().iter().map(|o| o.order.total_price).sum();
    let average_order_value = if total_orders == 0 {
        0.0
    } else {
        total_revenue / total_orders as f64
    };

    Overview {
        total_orders,
        total_revenue: round2(total_revenue),
        average_order_value: round2(average_order_value),
        total_customers: behavior.profiles.len(),
        repeat_customers: behavior.repeat_customers(),
    }
}

pub fn assemble(
    table: &CleanedTable,
    product_analysis: Vec<ProductSummary>,
    regional_analysis: Vec<CitySummary>,
    payment_analysis: Vec<PaymentSummary>,
    customer_behavior: CustomerBehavior,
) -> AnalysisReport {
    AnalysisReport {
        overview: overview(table, &customer_behavior),
        product_analysis,
        regional_analysis,
        payment_analysis,
        customer_behavior,
    }
}

pub fn generate_report(table: &CleanedTable) -> AnalysisReport {
    assemble(
        table,
        top_products(table),
        regional_performance(table),
        payment_methods(table),
        customer_behavior(table),
    )
}
