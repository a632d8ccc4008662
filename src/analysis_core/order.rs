//! Order rows as read from the dataset, and their cleaned counterparts

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns every dataset must carry
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "order_id",
    "customer_id",
    "product_name",
    "quantity",
    "total_price",
    "city",
    "payment_method",
    "order_date",
];

/// One row of the order table, as loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: u32,
    pub total_price: f64,
    pub city: String,
    pub payment_method: String,
    pub order_date: String,
}

/// Loaded order table, before any date handling
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderTable {
    pub orders: Vec<Order>,
}

impl OrderTable {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Year-month bucket used for revenue trends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Full weekday name ("Monday", ...)
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// An order with its normalized timestamp and derived calendar fields
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOrder {
    pub order: Order,
    pub timestamp: NaiveDateTime,
    pub month: YearMonth,
    pub day_of_week: Weekday,
    /// `None` when the source date carried no time of day
    pub hour: Option<u32>,
}

impl CleanOrder {
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// Immutable cleaned table shared by every aggregation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    orders: Vec<CleanOrder>,
}

impl CleanedTable {
    pub(crate) fn from_orders(orders: Vec<CleanOrder>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[CleanOrder] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// True if at least one source date carried a time of day
    pub fn has_time_of_day(&self) -> bool {
        self.orders.iter().any(|o| o.hour.is_some())
    }

    /// Canonical row form: every `order_date` rewritten from its parsed value
    pub fn to_order_table(&self) -> OrderTable {
        OrderTable::new(self.orders.iter().map(|o| o.order.clone()).collect())
    }
}

/// Serialized form of a cleaned row, used by the raw dataset export
#[derive(Debug, Serialize)]
pub struct CleanOrderRow<'a> {
    pub order_id: &'a str,
    pub customer_id: &'a str,
    pub customer_name: Option<&'a str>,
    pub product_id: Option<&'a str>,
    pub product_name: &'a str,
    pub category: Option<&'a str>,
    pub quantity: u32,
    pub total_price: f64,
    pub city: &'a str,
    pub payment_method: &'a str,
    pub order_date: &'a str,
    pub month: String,
    pub day_of_week: &'static str,
    pub hour: Option<u32>,
}

impl<'a> From<&'a CleanOrder> for CleanOrderRow<'a> {
    fn from(o: &'a CleanOrder) -> Self {
        Self {
            order_id: &o.order.order_id,
            customer_id: &o.order.customer_id,
            customer_name: o.order.customer_name.as_deref(),
            product_id: o.order.product_id.as_deref(),
            product_name: &o.order.product_name,
            category: o.order.category.as_deref(),
            quantity: o.order.quantity,
            total_price: o.order.total_price,
            city: &o.order.city,
            payment_method: &o.order.payment_method,
            order_date: &o.order.order_date,
            month: o.month.to_string(),
            day_of_week: o.day_name(),
            hour: o.hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_ordering_and_display() {
        let jan = YearMonth::new(2023, 1);
        let dec_prev = YearMonth::new(2022, 12);
        assert!(dec_prev < jan);
        assert_eq!(jan.to_string(), "2023-01");
        assert_eq!(serde_json::to_string(&jan).unwrap(), "\"2023-01\"");
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }
}
