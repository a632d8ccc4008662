//! First-seen ordered grouping shared by every aggregation
//!
//! Groups keep the order in which their key first appears in the table, so
//! stable sorts over the result tie-break on first appearance.

use super::order::CleanOrder;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Running sums for one group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub revenue: f64,
    pub units: u64,
    pub orders: usize,
}

impl Totals {
    pub fn add(&mut self, order: &CleanOrder) {
        self.revenue += order.order.total_price;
        self.units += u64::from(order.order.quantity);
        self.orders += 1;
    }

    pub fn mean_order_value(&self) -> f64 {
        if self.orders == 0 {
            0.0
        } else {
            self.revenue / self.orders as f64
        }
    }
}

/// Group `orders` by `key`, folding each row into the group's accumulator
pub fn group_by<'a, K, A, FK, FA>(orders: &'a [CleanOrder], key: FK, mut fold: FA) -> Vec<(K, A)>
where
    K: Eq + Hash + Clone,
    A: Default,
    FK: Fn(&'a CleanOrder) -> K,
    FA: FnMut(&mut A, &'a CleanOrder),
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, A)> = Vec::new();

    for order in orders {
        let k = key(order);
        let slot = match index.get(&k) {
            Some(&slot) => slot,
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, A::default()));
                groups.len() - 1
            }
        };
        fold(&mut groups[slot].1, order);
    }

    groups
}

/// Count occurrences of each value, in first-seen order
pub fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    counts
}

/// Most frequent value; ties go to the value that appears first in the table
///
/// `counts` must be in first-seen order, as produced by `value_counts`.
pub fn most_frequent(counts: &[(String, usize)]) -> Option<&str> {
    let mut best: Option<&(String, usize)> = None;
    for entry in counts {
        if best.map_or(true, |b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(value, _)| value.as_str())
}

/// Stable descending sort on a float metric
pub fn sort_desc_by<T, F>(items: &mut [T], metric: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| metric(b).partial_cmp(&metric(a)).unwrap_or(Ordering::Equal));
}

/// Round a monetary value to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
