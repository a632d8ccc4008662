//! Olist (Brazilian e-commerce) dataset preparation
//!
//! Joins the public Olist CSV files into the order-table schema, one row per
//! order item.

use crate::analysis_core::{Order, OrderTable};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const ORDERS_FILE: &str = "olist_orders_dataset.csv";
pub const ITEMS_FILE: &str = "olist_order_items_dataset.csv";
pub const CUSTOMERS_FILE: &str = "olist_customers_dataset.csv";
pub const PRODUCTS_FILE: &str = "olist_products_dataset.csv";
pub const PAYMENTS_FILE: &str = "olist_order_payments_dataset.csv";

const UNKNOWN: &str = "unknown";

#[derive(Debug)]
pub enum PrepareError {
    MissingFile(PathBuf),
    Csv(csv::Error),
}

impl From<csv::Error> for PrepareError {
    fn from(err: csv::Error) -> Self {
        PrepareError::Csv(err)
    }
}

impl std::fmt::Display for PrepareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrepareError::MissingFile(path) => write!(f, "Missing dataset file: {}", path.display()),
            PrepareError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for PrepareError {}

#[derive(Debug, Deserialize)]
struct OlistOrder {
    order_id: String,
    customer_id: String,
    order_purchase_timestamp: String,
}

#[derive(Debug, Deserialize)]
struct OlistItem {
    order_id: String,
    product_id: String,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct OlistCustomer {
    customer_id: String,
    customer_unique_id: String,
    customer_city: String,
}

#[derive(Debug, Deserialize)]
struct OlistProduct {
    product_id: String,
    #[serde(default)]
    product_category_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OlistPayment {
    order_id: String,
    payment_sequential: u32,
    payment_type: String,
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, PrepareError> {
    if !path.exists() {
        return Err(PrepareError::MissingFile(path.to_path_buf()));
    }
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// First payment type per order, by `payment_sequential`
fn first_payments(payments: Vec<OlistPayment>) -> HashMap<String, String> {
    let mut first: HashMap<String, (u32, String)> = HashMap::new();
    for p in payments {
        let earlier = first
            .get(&p.order_id)
            .map_or(true, |(seq, _)| p.payment_sequential < *seq);
        if earlier {
            first.insert(p.order_id, (p.payment_sequential, p.payment_type));
        }
    }
    first.into_iter().map(|(id, (_, kind))| (id, kind)).collect()
}

/// Build the order table from the Olist files in `source`
///
/// Items whose order, customer or product is missing are dropped (inner
/// join). The payments file is optional.
pub fn prepare(source: &Path) -> Result<OrderTable, PrepareError> {
    let orders: Vec<OlistOrder> = read_rows(&source.join(ORDERS_FILE))?;
    let items: Vec<OlistItem> = read_rows(&source.join(ITEMS_FILE))?;
    let customers: HashMap<String, OlistCustomer> = read_rows::<OlistCustomer>(&source.join(CUSTOMERS_FILE))?
        .into_iter()
        .map(|c| (c.customer_id.clone(), c))
        .collect();
    let products: HashMap<String, OlistProduct> = read_rows::<OlistProduct>(&source.join(PRODUCTS_FILE))?
        .into_iter()
        .map(|p| (p.product_id.clone(), p))
        .collect();

    let payments_path = source.join(PAYMENTS_FILE);
    let payments = if payments_path.exists() {
        first_payments(read_rows(&payments_path)?)
    } else {
        log::warn!("⚠️  {} not found, payment methods will be '{}'", PAYMENTS_FILE, UNKNOWN);
        HashMap::new()
    };

    let mut items_by_order: HashMap<&str, Vec<&OlistItem>> = HashMap::new();
    for item in &items {
        items_by_order.entry(item.order_id.as_str()).or_default().push(item);
    }

    let mut rows = Vec::new();
    for order in &orders {
        let Some(customer) = customers.get(&order.customer_id) else {
            continue;
        };
        let Some(order_items) = items_by_order.get(order.order_id.as_str()) else {
            continue;
        };

        for item in order_items {
            let Some(product) = products.get(&item.product_id) else {
                continue;
            };
            let category = product
                .product_category_name
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(UNKNOWN);

            rows.push(Order {
                order_id: order.order_id.clone(),
                customer_id: order.customer_id.clone(),
                customer_name: Some(customer.customer_unique_id.clone()),
                product_id: Some(item.product_id.clone()),
                product_name: category.to_string(),
                category: None,
                quantity: 1,
                total_price: item.price,
                city: if customer.customer_city.is_empty() {
                    UNKNOWN.to_string()
                } else {
                    customer.customer_city.clone()
                },
                payment_method: payments
                    .get(&order.order_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                order_date: order.order_purchase_timestamp.clone(),
            });
        }
    }

    log::info!(
        "🔗 Prepared {} order items from {} orders in {}",
        rows.len(),
        orders.len(),
        source.display()
    );
    Ok(OrderTable::new(rows))
}
