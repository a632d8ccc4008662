//! Salesflow - e-commerce order analytics
//!
//! Loads an order table from CSV, derives calendar fields and computes ranked
//! product, regional, payment, customer and monthly revenue views. Results are
//! presented as a text report, exported to xlsx / CSV / JSON, or browsed in a
//! terminal dashboard.

pub mod analysis_core;
pub mod config;
pub mod export;
pub mod olist;
pub mod sample;
pub mod state;
pub mod text_report;
pub mod ui;
