//! Stats module - Metric summaries

mod calculator;

pub use calculator::{MetricSummary, StatsCalculator};
