//! CSV dataset loader with an explicit, caller-owned cache
//!
//! `load` reads the whole file into memory. Any malformed row fails the whole
//! load.

use super::error::{LoadError, SchemaError};
use super::order::{Order, OrderTable, REQUIRED_COLUMNS};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Row exactly as it appears on disk; numeric fields are validated afterwards
#[derive(Debug, Deserialize)]
struct RawOrderRow {
    order_id: String,
    customer_id: String,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    product_id: Option<String>,
    product_name: String,
    #[serde(default)]
    category: Option<String>,
    quantity: String,
    total_price: String,
    city: String,
    payment_method: String,
    order_date: String,
}

/// Load the order table at `path`
pub fn load(path: impl AsRef<Path>) -> Result<OrderTable, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = rdr.headers()?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SchemaError::MissingColumn(column.to_string()).into());
        }
    }

    let mut orders = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LoadError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw: RawOrderRow = record
            .deserialize(Some(&headers))
            .map_err(|e| LoadError::Malformed { line, reason: e.to_string() })?;

        orders.push(validate_row(raw).map_err(|reason| LoadError::Malformed { line, reason })?);
    }

    let duplicates = duplicate_order_ids(&orders);
    if duplicates > 0 {
        log::warn!("⚠️  {} rows in {} repeat an earlier order_id", duplicates, path.display());
    }

    log::info!("📥 Loaded {} orders from {}", orders.len(), path.display());
    Ok(OrderTable::new(orders))
}

/// Rows whose `order_id` already appeared earlier in the table
fn duplicate_order_ids(orders: &[Order]) -> usize {
    let mut seen = HashSet::with_capacity(orders.len());
    orders.iter().filter(|o| !seen.insert(o.order_id.as_str())).count()
}

fn validate_row(raw: RawOrderRow) -> Result<Order, String> {
    let keys = [
        ("order_id", &raw.order_id),
        ("customer_id", &raw.customer_id),
        ("product_name", &raw.product_name),
        ("city", &raw.city),
        ("payment_method", &raw.payment_method),
    ];
    if let Some((field, _)) = keys.iter().find(|(_, value)| value.is_empty()) {
        return Err(format!("empty {}", field));
    }

    let quantity = parse_quantity(&raw.quantity)
        .ok_or_else(|| format!("quantity must be a positive integer, got {:?}", raw.quantity))?;

    let total_price = raw
        .total_price
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| format!("total_price must be a non-negative number, got {:?}", raw.total_price))?;

    Ok(Order {
        order_id: raw.order_id,
        customer_id: raw.customer_id,
        customer_name: non_empty(raw.customer_name),
        product_id: non_empty(raw.product_id),
        product_name: raw.product_name,
        category: non_empty(raw.category),
        quantity,
        total_price,
        city: raw.city,
        payment_method: raw.payment_method,
        order_date: raw.order_date,
    })
}

/// Accepts "3" as well as "3.0", which spreadsheet round-trips tend to produce
fn parse_quantity(value: &str) -> Option<u32> {
    let quantity = match value.parse::<u32>() {
        Ok(q) => q,
        Err(_) => {
            let f = value.parse::<f64>().ok()?;
            if f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
                return None;
            }
            f as u32
        }
    };
    (quantity > 0).then_some(quantity)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Memoized loader owned by the caller
///
/// Reads the file on first use and hands out the shared table afterwards.
/// Nothing is re-read until `invalidate` is called.
pub struct DatasetLoader {
    path: PathBuf,
    cached: Option<Arc<OrderTable>>,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&mut self) -> Result<Arc<OrderTable>, LoadError> {
        if let Some(table) = &self.cached {
            log::debug!("Using cached dataset for {}", self.path.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load(&self.path)?);
        self.cached = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table so the next `load` re-reads the file
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            log::info!("🔄 Dataset cache invalidated: {}", self.path.display());
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}
