//! Synthetic order dataset generator
//!
//! Produces a year of orders across ten product categories, ten cities and
//! five payment methods, in the order-table CSV schema.

use crate::analysis_core::{Order, OrderTable};
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;

/// Category name and unit price range in INR
pub const CATEGORIES: [(&str, f64, f64); 10] = [
    ("Mobile Phones", 8000.0, 50000.0),
    ("Fashion", 500.0, 5000.0),
    ("Electronics", 1000.0, 80000.0),
    ("Home & Kitchen", 500.0, 15000.0),
    ("Grocery & Staples", 200.0, 3000.0),
    ("Beauty & Personal Care", 100.0, 2000.0),
    ("Books & Stationery", 200.0, 1500.0),
    ("Sports & Fitness", 500.0, 10000.0),
    ("Furniture", 2000.0, 50000.0),
    ("Appliances", 5000.0, 80000.0),
];

pub const CITIES: [&str; 10] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
];

pub const PAYMENT_METHODS: [&str; 5] = ["UPI", "Credit Card", "Debit Card", "COD", "Net Banking"];

/// Festival season (October, November) price multiplier
const FESTIVAL_DISCOUNT: f64 = 0.8;

/// Generate `records` orders dated within 2023, sorted by date
///
/// Customer ids are drawn from `1..=records/2` so most customers repeat.
/// The same seed always yields the same table.
pub fn generate(records: usize, seed: Option<u64>) -> OrderTable {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
    let customers = (records / 2).max(1);

    let mut rows: Vec<(NaiveDate, Order)> = (1..=records)
        .map(|i| {
            let (category, min_price, max_price) = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let date = start + Duration::days(rng.gen_range(0..365));
            let quantity: u32 = rng.gen_range(1..=4);

            let base_price = (rng.gen_range(min_price..max_price) / 10.0).round() * 10.0;
            let mut total_price = base_price * quantity as f64;
            if matches!(date.month(), 10 | 11) {
                total_price = (total_price * FESTIVAL_DISCOUNT * 100.0).round() / 100.0;
            }

            let order = Order {
                order_id: format!("OD{:06}", i),
                customer_id: format!("CUST{:04}", rng.gen_range(1..=customers)),
                customer_name: Some(format!("Customer {}", rng.gen_range(1..=customers))),
                product_id: None,
                product_name: category.to_string(),
                category: None,
                quantity,
                total_price,
                city: pick(&mut rng, &CITIES),
                payment_method: pick(&mut rng, &PAYMENT_METHODS),
                order_date: date.format("%Y-%m-%d").to_string(),
            };
            (date, order)
        })
        .collect();

    rows.sort_by_key(|(date, _)| *date);
    OrderTable::new(rows.into_iter().map(|(_, order)| order).collect())
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

/// Write an order table as CSV, creating the parent directory if needed
pub fn write_table(path: &Path, table: &OrderTable) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for order in &table.orders {
        writer.serialize(order)?;
    }
    writer.flush()?;
    Ok(())
}
