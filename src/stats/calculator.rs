//! Statistics Calculator Module
//! Descriptive statistics for the ranking metrics.

use crate::data::{DataProcessor, ProcessorError, RankingMetric};
use polars::prelude::DataFrame;
use statrs::statistics::{Data, Distribution, Max, Median, Min, OrderStatistics};

/// Descriptive statistics for one metric column.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub metric: RankingMetric,
    /// Rows with a value present.
    pub count: usize,
    /// Rows where the metric is absent.
    pub missing: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
}

impl MetricSummary {
    fn empty(metric: RankingMetric, missing: usize) -> Self {
        Self {
            metric,
            count: 0,
            missing,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Computes metric summaries shown next to the ranking charts.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(
        metric: RankingMetric,
        values: &[Option<f64>],
    ) -> MetricSummary {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let missing = values.len() - present.len();
        let n = present.len();
        if n == 0 {
            return MetricSummary::empty(metric, missing);
        }

        let mut data = Data::new(present);
        let mean = data.mean().unwrap_or(f64::NAN);
        // Sample deviation is undefined for a single value
        let std = if n > 1 {
            data.std_dev().unwrap_or(f64::NAN)
        } else {
            0.0
        };
        let p95 = data.percentile(95);

        MetricSummary {
            metric,
            count: n,
            missing,
            mean,
            median: data.median(),
            std,
            min: Min::min(&data),
            max: Max::max(&data),
            p95,
        }
    }

    /// Summaries for both ranking metrics, in selector order.
    pub fn summarize_metrics(df: &DataFrame) -> Result<Vec<MetricSummary>, ProcessorError> {
        RankingMetric::ALL
            .iter()
            .map(|&metric| {
                let values = DataProcessor::metric_values(df, metric)?;
                Ok(Self::compute_descriptive_stats(metric, &values))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_rows;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn descriptive_stats_skip_missing_values() {
        let values = [Some(1.0), None, Some(3.0), Some(2.0), Some(4.0)];
        let summary = StatsCalculator::compute_descriptive_stats(RankingMetric::Subscribers, &values);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.missing, 1);
        assert_close(summary.mean, 2.5);
        assert_close(summary.median, 2.5);
        assert_close(summary.min, 1.0);
        assert_close(summary.max, 4.0);
        // Sample standard deviation of 1..=4
        assert_close(summary.std, (5.0f64 / 3.0).sqrt());
    }

    #[test]
    fn single_value_has_zero_spread() {
        let summary = StatsCalculator::compute_descriptive_stats(RankingMetric::VideoViews, &[Some(7.0)]);
        assert_eq!(summary.count, 1);
        assert_close(summary.std, 0.0);
        assert_close(summary.median, 7.0);
    }

    #[test]
    fn all_missing_yields_nan_summary() {
        let summary = StatsCalculator::compute_descriptive_stats(RankingMetric::VideoViews, &[None, None]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.missing, 2);
        assert!(summary.mean.is_nan());
    }

    #[test]
    fn summarizes_both_metrics_in_order() {
        let table = table_from_rows(&[
            ("A", Some("Music"), "1,000", "500"),
            ("B", Some("Gaming"), "2,000", "3,000"),
        ]);
        let summaries = StatsCalculator::summarize_metrics(table.dataframe()).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].metric, RankingMetric::Subscribers);
        assert_close(summaries[0].mean, 1500.0);
        assert_eq!(summaries[1].metric, RankingMetric::VideoViews);
        assert_close(summaries[1].max, 3000.0);
    }
}
