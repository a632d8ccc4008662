//! Monthly revenue and month-over-month growth

use super::grouping::round2;
use super::order::{CleanedTable, YearMonth};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub month: YearMonth,
    pub revenue: f64,
    /// Percent change against the previous month present in the data.
    /// `None` for the first month, or when the previous month earned nothing.
    pub growth_pct: Option<f64>,
}

/// Revenue per month in chronological order
pub fn revenue_trends(table: &CleanedTable) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for order in table.orders() {
        *by_month.entry(order.month).or_insert(0.0) += order.order.total_price;
    }

    let mut prev: Option<f64> = None;
    by_month
        .into_iter()
        .map(|(month, revenue)| {
            let growth_pct = prev
                .filter(|p| *p != 0.0)
                .map(|p| round2((revenue - p) / p * 100.0));
            prev = Some(revenue);
            MonthlyRevenue {
                month,
                revenue: round2(revenue),
                growth_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_core::test_support::{cleaned, OrderSpec};

    #[test]
    fn test_monthly_growth() {
        let table = cleaned(&[
            OrderSpec::new("C1", 150.0).date("2023-02-10"),
            OrderSpec::new("C1", 100.0).date("2023-01-05"),
            OrderSpec::new("C2", 50.0).date("2023-02-20"),
            OrderSpec::new("C3", 100.0).date("2023-03-01"),
        ]);

        let trends = revenue_trends(&table);
        assert_eq!(trends.len(), 3);
        assert_eq!(trends[0].month, YearMonth::new(2023, 1));
        assert_eq!(trends[0].revenue, 100.0);
        assert_eq!(trends[0].growth_pct, None);
        assert_eq!(trends[1].revenue, 200.0);
        assert_eq!(trends[1].growth_pct, Some(100.0));
        assert_eq!(trends[2].growth_pct, Some(-50.0));
    }

    #[test]
    fn test_first_month_growth_is_absent_not_zero() {
        let table = cleaned(&[OrderSpec::new("C1", 100.0)]);
        let trends = revenue_trends(&table);
        assert_eq!(trends.len(), 1);
        assert!(trends[0].growth_pct.is_none());
    }

    #[test]
    fn test_growth_after_zero_revenue_month() {
        let table = cleaned(&[
            OrderSpec::new("C1", 0.0).date("2023-01-05"),
            OrderSpec::new("C1", 80.0).date("2023-02-05"),
        ]);
        let trends = revenue_trends(&table);
        assert_eq!(trends[1].growth_pct, None);
    }

    #[test]
    fn test_year_boundary_is_chronological() {
        let table = cleaned(&[
            OrderSpec::new("C1", 10.0).date("2024-01-01"),
            OrderSpec::new("C1", 20.0).date("2023-12-31"),
        ]);
        let months: Vec<String> = revenue_trends(&table).iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01"]);
    }
}
