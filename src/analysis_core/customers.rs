//! Customer purchasing behavior
//!
//! Per-customer profiles (frequency, average order value, lifetime value,
//! preferred city and payment method) and their distribution across the
//! customer population.

use super::grouping::{group_by, most_frequent, round2, value_counts};
use super::order::{CleanOrder, CleanedTable};
use super::stats::Describe;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerProfile {
    pub customer_id: String,
    pub order_count: usize,
    pub avg_order_value: f64,
    pub lifetime_value: f64,
    pub preferred_city: String,
    pub preferred_payment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerBehavior {
    #[serde(skip)]
    pub profiles: Vec<CustomerProfile>,
    pub purchase_frequency: Describe,
    pub avg_order_value: Describe,
    pub customer_lifetime: Describe,
    /// Customers per preferred city, most common first
    #[serde(serialize_with = "ranked_map")]
    pub city_distribution: Vec<(String, usize)>,
    /// Customers per preferred payment method, most common first
    #[serde(serialize_with = "ranked_map")]
    pub payment_preferences: Vec<(String, usize)>,
}

impl CustomerBehavior {
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Customers with more than one order
    pub fn repeat_customers(&self) -> usize {
        self.profiles.iter().filter(|p| p.order_count > 1).count()
    }
}

/// Serialize ranked counts as a `value -> count` map, keeping rank order
fn ranked_map<S: Serializer>(counts: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(counts.iter().map(|(value, count)| (value, count)))
}

/// Rows of a single customer, in table order
#[derive(Default)]
struct CustomerRows<'a> {
    rows: Vec<&'a CleanOrder>,
}

fn profile(customer_id: String, rows: &[&CleanOrder]) -> CustomerProfile {
    let lifetime: f64 = rows.iter().map(|o| o.order.total_price).sum();
    let order_count = rows.len();

    let cities = value_counts(rows.iter().map(|o| o.order.city.as_str()));
    let payments = value_counts(rows.iter().map(|o| o.order.payment_method.as_str()));

    CustomerProfile {
        customer_id,
        order_count,
        avg_order_value: lifetime / order_count as f64,
        lifetime_value: lifetime,
        preferred_city: most_frequent(&cities).unwrap_or_default().to_string(),
        preferred_payment: most_frequent(&payments).unwrap_or_default().to_string(),
    }
}

/// Sort (value, count) pairs by count descending; ties stay in first-seen order
fn ranked(mut counts: Vec<(String, usize)>) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn customer_behavior(table: &CleanedTable) -> CustomerBehavior {
    let profiles: Vec<CustomerProfile> = group_by::<_, CustomerRows, _, _>(
        table.orders(),
        |o| o.order.customer_id.clone(),
        |acc, o| acc.rows.push(o),
    )
    .into_iter()
    .map(|(id, acc)| profile(id, &acc.rows))
    .collect();

    if profiles.is_empty() {
        return CustomerBehavior::default();
    }

    let frequency: Vec<f64> = profiles.iter().map(|p| p.order_count as f64).collect();
    let aov: Vec<f64> = profiles.iter().map(|p| p.avg_order_value).collect();
    let lifetime: Vec<f64> = profiles.iter().map(|p| p.lifetime_value).collect();

    let city_distribution = ranked(value_counts(profiles.iter().map(|p| p.preferred_city.as_str())));
    let payment_preferences =
        ranked(value_counts(profiles.iter().map(|p| p.preferred_payment.as_str())));

    log::debug!("Profiled {} customers", profiles.len());

    CustomerBehavior {
        purchase_frequency: Describe::of(&frequency),
        avg_order_value: Describe::of(&aov),
        customer_lifetime: Describe::of(&lifetime),
        city_distribution,
        payment_preferences,
        profiles: profiles
            .into_iter()
            .map(|p| CustomerProfile {
                avg_order_value: round2(p.avg_order_value),
                lifetime_value: round2(p.lifetime_value),
                ..p
            })
            .collect(),
    }
}
