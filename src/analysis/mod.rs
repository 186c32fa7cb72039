//! Aggregation modules.
//!
//! Turns discovered per-object metrics files into sorted summary tables
//! with macro-average rows.

pub mod aggregator;

pub use aggregator::*;
