//! Plain-text console report
//!
//! Renders the analysis views as markdown-style tables for the `report` command.

use crate::analysis_core::{AnalysisReport, Describe, MonthlyRevenue};
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Total Revenue")]
    revenue: String,
    #[tabled(rename = "Units Sold")]
    units: u64,
    #[tabled(rename = "Orders")]
    orders: usize,
}

#[derive(Tabled)]
struct CityRow {
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Total Revenue")]
    revenue: String,
    #[tabled(rename = "Avg Order Value")]
    aov: String,
    #[tabled(rename = "Orders")]
    orders: usize,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "Payment Method")]
    method: String,
    #[tabled(rename = "Orders")]
    orders: usize,
    #[tabled(rename = "Total Revenue")]
    revenue: String,
    #[tabled(rename = "Avg Order Value")]
    aov: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Customers")]
    customers: usize,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Growth")]
    growth: String,
}

/// Format with thousands separators and two decimals: `1234.5` -> `1,234.50`
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

pub fn format_currency(currency: &str, value: f64) -> String {
    format!("{}{}", currency, format_number(value))
}

pub fn format_growth(growth: Option<f64>) -> String {
    match growth {
        Some(g) => format!("{:+.2}%", g),
        None => "-".to_string(),
    }
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::markdown()).to_string()
}

fn section(out: &mut String, title: &str, body: String) {
    let _ = writeln!(out, "## {}\n", title);
    let _ = writeln!(out, "{}\n", body);
}

fn describe_table(currency: &str, frequency: &Describe, aov: &Describe, lifetime: &Describe) -> String {
    #[derive(Tabled)]
    struct StatRow {
        #[tabled(rename = "Statistic")]
        stat: &'static str,
        #[tabled(rename = "Orders / Customer")]
        frequency: String,
        #[tabled(rename = "Avg Order Value")]
        aov: String,
        #[tabled(rename = "Lifetime Value")]
        lifetime: String,
    }

    let plain = |v: Option<f64>| v.map_or("-".to_string(), format_number);
    let money = |v: Option<f64>| v.map_or("-".to_string(), |v| format_currency(currency, v));

    let (f, a, l) = (frequency.rows(), aov.rows(), lifetime.rows());
    let rows = (0..f.len())
        .map(|i| StatRow {
            stat: f[i].0,
            // count is a plain number in every column
            frequency: plain(f[i].1),
            aov: if i == 0 { plain(a[i].1) } else { money(a[i].1) },
            lifetime: if i == 0 { plain(l[i].1) } else { money(l[i].1) },
        })
        .collect();
    table(rows)
}

/// Render the full console report
///
/// A missing or empty dataset renders a short notice instead of empty tables.
pub fn render_report(
    report: Option<&AnalysisReport>,
    trends: &[MonthlyRevenue],
    currency: &str,
    top_n: usize,
) -> String {
    let mut out = String::from("# E-commerce Sales Analysis\n\n");

    let Some(report) = report.filter(|r| r.overview.total_orders > 0) else {
        out.push_str("No data available. Generate a dataset with `sample_data generate`.\n");
        return out;
    };

    let o = &report.overview;
    section(
        &mut out,
        "Overview",
        table(vec![
            MetricRow { metric: "Total Orders".into(), value: o.total_orders.to_string() },
            MetricRow { metric: "Total Revenue".into(), value: format_currency(currency, o.total_revenue) },
            MetricRow {
                metric: "Average Order Value".into(),
                value: format_currency(currency, o.average_order_value),
            },
            MetricRow { metric: "Total Customers".into(), value: o.total_customers.to_string() },
            MetricRow { metric: "Repeat Customers".into(), value: o.repeat_customers.to_string() },
        ]),
    );

    section(
        &mut out,
        &format!("Top {} Products by Revenue", top_n),
        table(
            report
                .product_analysis
                .iter()
                .take(top_n)
                .map(|p| ProductRow {
                    product: p.product.clone(),
                    revenue: format_currency(currency, p.total_revenue),
                    units: p.units_sold,
                    orders: p.order_count,
                })
                .collect(),
        ),
    );

    section(
        &mut out,
        &format!("Top {} Cities by Revenue", top_n),
        table(
            report
                .regional_analysis
                .iter()
                .take(top_n)
                .map(|c| CityRow {
                    city: c.city.clone(),
                    revenue: format_currency(currency, c.total_revenue),
                    aov: format_currency(currency, c.avg_order_value),
                    orders: c.order_count,
                })
                .collect(),
        ),
    );

    section(
        &mut out,
        "Payment Methods",
        table(
            report
                .payment_analysis
                .iter()
                .map(|m| PaymentRow {
                    method: m.method.clone(),
                    orders: m.order_count,
                    revenue: format_currency(currency, m.total_revenue),
                    aov: format_currency(currency, m.avg_order_value),
                })
                .collect(),
        ),
    );

    let behavior = &report.customer_behavior;
    section(
        &mut out,
        "Customer Behavior",
        describe_table(
            currency,
            &behavior.purchase_frequency,
            &behavior.avg_order_value,
            &behavior.customer_lifetime,
        ),
    );

    section(
        &mut out,
        &format!("Top {} Customer Cities", top_n),
        table(
            behavior
                .city_distribution
                .iter()
                .take(top_n)
                .map(|(city, n)| CountRow { value: city.clone(), customers: *n })
                .collect(),
        ),
    );

    section(
        &mut out,
        "Preferred Payment Methods",
        table(
            behavior
                .payment_preferences
                .iter()
                .map(|(method, n)| CountRow { value: method.clone(), customers: *n })
                .collect(),
        ),
    );

    section(
        &mut out,
        "Monthly Revenue",
        table(
            trends
                .iter()
                .map(|m| TrendRow {
                    month: m.month.to_string(),
                    revenue: format_currency(currency, m.revenue),
                    growth: format_growth(m.growth_pct),
                })
                .collect(),
        ),
    );

    out
}
