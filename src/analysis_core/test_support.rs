//! Table builders for unit tests

use super::cleaner::clean;
use super::order::{CleanedTable, Order, OrderTable};

#[derive(Debug, Clone)]
pub struct OrderSpec {
    customer_id: String,
    total_price: f64,
    product: String,
    quantity: u32,
    city: String,
    payment: String,
    date: String,
}

impl OrderSpec {
    pub fn new(customer_id: &str, total_price: f64) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            total_price,
            product: "Fashion".to_string(),
            quantity: 1,
            city: "Mumbai".to_string(),
            payment: "UPI".to_string(),
            date: "2023-01-15".to_string(),
        }
    }

    pub fn product(mut self, product: &str) -> Self {
        self.product = product.to_string();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = city.to_string();
        self
    }

    pub fn payment(mut self, payment: &str) -> Self {
        self.payment = payment.to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }
}

pub fn order_table(specs: &[OrderSpec]) -> OrderTable {
    OrderTable::new(
        specs
            .iter()
            .enumerate()
            .map(|(i, s)| Order {
                order_id: format!("OD{:06}", i + 1),
                customer_id: s.customer_id.clone(),
                customer_name: None,
                product_id: None,
                product_name: s.product.clone(),
                category: None,
                quantity: s.quantity,
                total_price: s.total_price,
                city: s.city.clone(),
                payment_method: s.payment.clone(),
                order_date: s.date.clone(),
            })
            .collect(),
    )
}

pub fn cleaned(specs: &[OrderSpec]) -> CleanedTable {
    clean(Some(&order_table(specs)))
        .expect("test dates are valid")
        .expect("table is present")
}
