//! Date normalization and derived calendar fields

use super::error::SchemaError;
use super::order::{CleanOrder, CleanedTable, Order, OrderTable, YearMonth};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Canonical form written back into `order_date`
const CANONICAL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
const CANONICAL_DATE: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse an `order_date` value
///
/// Returns the timestamp and whether the value carried a time of day.
pub fn parse_order_date(value: &str) -> Option<(NaiveDateTime, bool)> {
    let value = value.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some((ts, true));
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some((ts.naive_local(), true));
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some((date.and_hms_opt(0, 0, 0)?, false));
        }
    }

    None
}

/// Clean a loaded table
///
/// Absent input is a no-op. Every `order_date` must parse; the first one that
/// does not is reported and no table is produced.
pub fn clean(table: Option<&OrderTable>) -> Result<Option<CleanedTable>, SchemaError> {
    let Some(table) = table else {
        log::debug!("No table to clean");
        return Ok(None);
    };

    let orders = table
        .orders
        .iter()
        .enumerate()
        .map(|(row, order)| clean_order(row, order))
        .collect::<Result<Vec<_>, _>>()?;

    let cleaned = CleanedTable::from_orders(orders);
    if !cleaned.is_empty() && !cleaned.has_time_of_day() {
        log::warn!("order_date carries no time of day; hour-based breakdowns are unavailable");
    }
    log::info!("🧹 Data cleaning completed: {} orders", cleaned.len());

    Ok(Some(cleaned))
}

fn clean_order(row: usize, order: &Order) -> Result<CleanOrder, SchemaError> {
    let (timestamp, has_time) =
        parse_order_date(&order.order_date).ok_or_else(|| SchemaError::UnparseableDate {
            row,
            value: order.order_date.clone(),
        })?;

    let mut normalized = order.clone();
    normalized.order_date = if has_time {
        timestamp.format(CANONICAL_DATETIME).to_string()
    } else {
        timestamp.format(CANONICAL_DATE).to_string()
    };

    Ok(CleanOrder {
        order: normalized,
        timestamp,
        month: YearMonth::new(timestamp.year(), timestamp.month()),
        day_of_week: timestamp.weekday(),
        hour: has_time.then(|| timestamp.hour()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn order(id: &str, date: &str) -> Order {
        Order {
            order_id: id.to_string(),
            customer_id: "C1".to_string(),
            customer_name: None,
            product_id: None,
            product_name: "Fashion".to_string(),
            category: None,
            quantity: 1,
            total_price: 10.0,
            city: "Mumbai".to_string(),
            payment_method: "UPI".to_string(),
            order_date: date.to_string(),
        }
    }

    #[test]
    fn test_parse_formats() {
        let (ts, has_time) = parse_order_date("2023-03-15 14:30:00").unwrap();
        assert!(has_time);
        assert_eq!(ts.hour(), 14);

        let (ts, has_time) = parse_order_date("2023-03-15T08:05:00").unwrap();
        assert!(has_time);
        assert_eq!(ts.hour(), 8);

        let (ts, has_time) = parse_order_date("2023-03-15T08:05:00+05:30").unwrap();
        assert!(has_time);
        assert_eq!(ts.hour(), 8);

        let (ts, has_time) = parse_order_date("2023-03-15").unwrap();
        assert!(!has_time);
        assert_eq!(ts.day(), 15);

        let (ts, _) = parse_order_date("03/15/2023").unwrap();
        assert_eq!(ts.month(), 3);

        assert!(parse_order_date("not a date").is_none());
        assert!(parse_order_date("").is_none());
    }

    #[test]
    fn test_fractional_seconds() {
        let (ts, has_time) = parse_order_date("2023-01-01 10:00:00.123").unwrap();
        assert!(has_time);
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.nanosecond(), 123_000_000);

        let (ts, _) = parse_order_date("2023-01-01T23:59:59.5").unwrap();
        assert_eq!(ts.second(), 59);

        let table = OrderTable::new(vec![order("OD1", "2023-01-01 10:00:00.123")]);
        let cleaned = clean(Some(&table)).unwrap().unwrap();
        assert_eq!(cleaned.orders()[0].hour, Some(10));
    }

    #[test]
    fn test_derived_fields() {
        let table = OrderTable::new(vec![order("OD1", "2023-01-02 09:15:00")]);
        let cleaned = clean(Some(&table)).unwrap().unwrap();
        let o = &cleaned.orders()[0];

        assert_eq!(o.month, YearMonth::new(2023, 1));
        assert_eq!(o.day_of_week, Weekday::Mon);
        assert_eq!(o.day_name(), "Monday");
        assert_eq!(o.hour, Some(9));
        assert!(cleaned.has_time_of_day());
    }

    #[test]
    fn test_date_only_has_no_hour() {
        let table = OrderTable::new(vec![order("OD1", "2023-01-02")]);
        let cleaned = clean(Some(&table)).unwrap().unwrap();

        assert_eq!(cleaned.orders()[0].hour, None);
        assert!(!cleaned.has_time_of_day());
    }

    #[test]
    fn test_absent_table_is_noop() {
        assert!(clean(None).unwrap().is_none());
    }

    #[test]
    fn test_unparseable_date_is_schema_error() {
        let table = OrderTable::new(vec![order("OD1", "2023-01-02"), order("OD2", "someday")]);
        match clean(Some(&table)).unwrap_err() {
            SchemaError::UnparseableDate { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let table = OrderTable::new(vec![
            order("OD1", "03/15/2023"),
            order("OD2", "2023-07-01T23:59:59"),
            order("OD3", "2023-12-31 00:00:00"),
        ]);

        let once = clean(Some(&table)).unwrap().unwrap();
        let twice = clean(Some(&once.to_order_table())).unwrap().unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.orders()[0].order.order_date, "2023-03-15");
        assert_eq!(once.orders()[2].hour, Some(0));
    }
}
