//! Data Processor Module
//! Category filtering, metric ranking, aggregation and CSV export over the channel table.

use super::loader::{COL_CATEGORY, COL_SUBSCRIBERS, COL_VIDEO_VIEWS, COL_YOUTUBER};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// MIME type attached to CSV downloads.
pub const CSV_MIME: &str = "text/csv";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Numeric column used to rank channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMetric {
    Subscribers,
    VideoViews,
}

impl Default for RankingMetric {
    fn default() -> Self {
        RankingMetric::Subscribers
    }
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 2] = [RankingMetric::Subscribers, RankingMetric::VideoViews];

    pub fn column_name(self) -> &'static str {
        match self {
            RankingMetric::Subscribers => COL_SUBSCRIBERS,
            RankingMetric::VideoViews => COL_VIDEO_VIEWS,
        }
    }

    /// Title-cased name for axes and headings.
    pub fn display_name(self) -> &'static str {
        match self {
            RankingMetric::Subscribers => "Subscribers",
            RankingMetric::VideoViews => "Video Views",
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Explorer category selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Only(category) => category,
        }
    }

    /// Selector options: the "All" sentinel followed by each category.
    pub fn options(categories: &[String]) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(categories.iter().cloned().map(CategoryFilter::Only))
            .collect()
    }
}

/// Number of channels in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// One bar of a ranking chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedChannel {
    pub name: String,
    pub value: f64,
}

/// In-memory downloadable file.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

impl ExportArtifact {
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, &self.bytes)
    }
}

/// Stateless helpers over channel frames. Every function returns a new frame
/// or value and leaves its input untouched.
pub struct DataProcessor;

impl DataProcessor {
    /// Unique non-null categories, sorted, truncated to `limit`.
    ///
    /// The truncation mirrors the filter dropdown of the dashboard this was
    /// modelled on; categories past the limit are not selectable.
    pub fn distinct_categories(df: &DataFrame, limit: usize) -> Result<Vec<String>, ProcessorError> {
        let categories = Self::category_values(df)?;
        let unique: BTreeSet<String> = categories.into_iter().flatten().collect();
        Ok(unique.into_iter().take(limit).collect())
    }

    /// Channels per non-null category, most common first, ties by name.
    pub fn category_counts(df: &DataFrame) -> Result<Vec<CategoryCount>, ProcessorError> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for category in Self::category_values(df)?.into_iter().flatten() {
            *counts.entry(category).or_default() += 1;
        }

        let mut counts: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
        Ok(counts)
    }

    /// Rows matching the selection; `All` returns every row.
    pub fn filter_by_category(
        df: &DataFrame,
        filter: &CategoryFilter,
    ) -> Result<DataFrame, ProcessorError> {
        match filter {
            CategoryFilter::All => Ok(df.clone()),
            CategoryFilter::Only(category) => {
                let filtered = df
                    .clone()
                    .lazy()
                    .filter(col(COL_CATEGORY).eq(lit(category.clone())))
                    .collect()?;
                Ok(filtered)
            }
        }
    }

    /// Stable descending sort by the metric, nulls last.
    pub fn sort_by_metric(df: &DataFrame, metric: RankingMetric) -> Result<DataFrame, ProcessorError> {
        let sorted = df.sort(
            [metric.column_name()],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )?;
        Ok(sorted)
    }

    /// Ranking table: 1-based rank, channel name and the metric.
    pub fn ranking_table(df: &DataFrame, metric: RankingMetric) -> Result<DataFrame, ProcessorError> {
        let ranked = Self::sort_by_metric(df, metric)?
            .select([COL_YOUTUBER, metric.column_name()])?
            .with_row_index("rank".into(), Some(1))?;
        Ok(ranked)
    }

    /// First `n` channels by the metric; fewer when the frame is shorter.
    pub fn top_n(
        df: &DataFrame,
        metric: RankingMetric,
        n: usize,
    ) -> Result<Vec<RankedChannel>, ProcessorError> {
        let top = Self::sort_by_metric(df, metric)?.head(Some(n));
        let names = Self::name_values(&top)?;
        let values = Self::metric_values(&top, metric)?;

        Ok(names
            .into_iter()
            .zip(values)
            .filter_map(|(name, value)| {
                value.map(|value| RankedChannel {
                    name: name.unwrap_or_default(),
                    value,
                })
            })
            .collect())
    }

    /// `[subscribers, video views]` pairs for rows where both are present.
    pub fn scatter_points(df: &DataFrame) -> Result<Vec<[f64; 2]>, ProcessorError> {
        let subscribers = Self::metric_values(df, RankingMetric::Subscribers)?;
        let views = Self::metric_values(df, RankingMetric::VideoViews)?;

        Ok(subscribers
            .into_iter()
            .zip(views)
            .filter_map(|pair| match pair {
                (Some(x), Some(y)) => Some([x, y]),
                _ => None,
            })
            .collect())
    }

    pub fn metric_values(
        df: &DataFrame,
        metric: RankingMetric,
    ) -> Result<Vec<Option<f64>>, ProcessorError> {
        let column = df.column(metric.column_name())?.cast(&DataType::Float64)?;
        let values = column.as_materialized_series().f64()?.into_iter().collect();
        Ok(values)
    }

    /// Serialize the frame as a CSV download with a header row.
    pub fn to_csv_artifact(df: &DataFrame, file_name: &str) -> Result<ExportArtifact, ProcessorError> {
        let mut out = df.clone();
        let mut bytes: Vec<u8> = Vec::new();
        CsvWriter::new(&mut bytes)
            .include_header(true)
            .finish(&mut out)?;

        Ok(ExportArtifact {
            file_name: file_name.to_string(),
            mime: CSV_MIME,
            bytes,
            rows: df.height(),
        })
    }

    fn category_values(df: &DataFrame) -> Result<Vec<Option<String>>, ProcessorError> {
        Self::text_values(df, COL_CATEGORY)
    }

    fn name_values(df: &DataFrame) -> Result<Vec<Option<String>>, ProcessorError> {
        Self::text_values(df, COL_YOUTUBER)
    }

    fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::table_from_rows;

    fn three_channels() -> DataFrame {
        table_from_rows(&[
            ("A", Some("Music"), "1,000", "500"),
            ("B", Some("Gaming"), "2,000", "3,000"),
        ])
        .dataframe()
        .clone()
    }

    fn channels() -> DataFrame {
        table_from_rows(&[
            ("Alpha", Some("Music"), "300", "10"),
            ("Bravo", Some("Gaming"), "100", "50"),
            ("Charlie", Some("Music"), "300", "20"),
            ("Delta", None, "200", "40"),
            ("Echo", Some("Education"), "", "30"),
            ("Foxtrot", Some("Music"), "300", "5"),
        ])
        .dataframe()
        .clone()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        DataProcessor::name_values(df)
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or_default())
            .collect()
    }

    #[test]
    fn sorts_three_channels_by_subscribers() {
        let df = three_channels();
        let sorted = DataProcessor::sort_by_metric(&df, RankingMetric::Subscribers).unwrap();
        assert_eq!(names(&sorted), vec!["B", "A"]);

        let gaming = DataProcessor::filter_by_category(
            &df,
            &CategoryFilter::Only("Gaming".to_string()),
        )
        .unwrap();
        assert_eq!(names(&gaming), vec!["B"]);
    }

    #[test]
    fn distinct_categories_are_sorted_unique_and_capped() {
        let rows: Vec<(String, String)> = (0..14)
            .map(|i| (format!("ch{i}"), format!("cat{:02}", 13 - i)))
            .collect();
        let mut borrowed: Vec<(&str, Option<&str>, &str, &str)> = rows
            .iter()
            .map(|(n, c)| (n.as_str(), Some(c.as_str()), "1", "1"))
            .collect();
        borrowed.push(("dup", Some("cat00"), "1", "1"));
        let table = table_from_rows(&borrowed);

        let categories = DataProcessor::distinct_categories(table.dataframe(), 10).unwrap();
        assert_eq!(categories.len(), 10);
        assert_eq!(categories.first().map(String::as_str), Some("cat00"));
        assert_eq!(categories.last().map(String::as_str), Some("cat09"));
        assert!(categories.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn distinct_categories_skip_missing() {
        let categories = DataProcessor::distinct_categories(&channels(), 10).unwrap();
        assert_eq!(categories, vec!["Education", "Gaming", "Music"]);
    }

    #[test]
    fn category_counts_order_by_frequency() {
        let counts = DataProcessor::category_counts(&channels()).unwrap();
        let pairs: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect();
        assert_eq!(pairs, vec![("Music", 3), ("Education", 1), ("Gaming", 1)]);
    }

    #[test]
    fn filter_all_returns_full_table() {
        let df = channels();
        let all = DataProcessor::filter_by_category(&df, &CategoryFilter::All).unwrap();
        assert!(all.equals_missing(&df));
    }

    #[test]
    fn filter_is_exact_and_idempotent() {
        let df = channels();
        let music = CategoryFilter::Only("Music".to_string());

        let once = DataProcessor::filter_by_category(&df, &music).unwrap();
        assert_eq!(names(&once), vec!["Alpha", "Charlie", "Foxtrot"]);

        let twice = DataProcessor::filter_by_category(&once, &music).unwrap();
        assert!(twice.equals_missing(&once));
    }

    #[test]
    fn filter_without_matches_is_empty() {
        let df = channels();
        let none = DataProcessor::filter_by_category(
            &df,
            &CategoryFilter::Only("Comedy".to_string()),
        )
        .unwrap();
        assert_eq!(none.height(), 0);
        assert_eq!(none.width(), df.width());
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let sorted = DataProcessor::sort_by_metric(&channels(), RankingMetric::Subscribers).unwrap();
        // Ties keep file order, the missing value goes last
        assert_eq!(
            names(&sorted),
            vec!["Alpha", "Charlie", "Foxtrot", "Delta", "Bravo", "Echo"]
        );

        let values = DataProcessor::metric_values(&sorted, RankingMetric::Subscribers).unwrap();
        let present: Vec<f64> = values.into_iter().flatten().collect();
        assert!(present.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn top_n_never_exceeds_rows() {
        let df = three_channels();
        let top = DataProcessor::top_n(&df, RankingMetric::VideoViews, 10).unwrap();
        assert_eq!(
            top,
            vec![
                RankedChannel { name: "B".to_string(), value: 3000.0 },
                RankedChannel { name: "A".to_string(), value: 500.0 },
            ]
        );

        let top = DataProcessor::top_n(&channels(), RankingMetric::VideoViews, 3).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].name, "Bravo");
    }

    #[test]
    fn ranking_table_has_rank_column() {
        let ranked =
            DataProcessor::ranking_table(&three_channels(), RankingMetric::Subscribers).unwrap();
        let columns: Vec<String> = ranked
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(columns, vec!["rank", COL_YOUTUBER, COL_SUBSCRIBERS]);
        assert_eq!(names(&ranked), vec!["B", "A"]);
    }

    #[test]
    fn scatter_skips_incomplete_rows() {
        let points = DataProcessor::scatter_points(&channels()).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], [300.0, 10.0]);
    }

    #[test]
    fn csv_artifact_has_header_and_mime() {
        let gaming = DataProcessor::filter_by_category(
            &three_channels(),
            &CategoryFilter::Only("Gaming".to_string()),
        )
        .unwrap();
        let artifact = DataProcessor::to_csv_artifact(&gaming, "filtered_data.csv").unwrap();

        assert_eq!(artifact.file_name, "filtered_data.csv");
        assert_eq!(artifact.mime, "text/csv");
        assert_eq!(artifact.rows, 1);

        let text = String::from_utf8(artifact.bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Youtuber,category,subscribers,video views"));
        assert!(lines.next().unwrap().starts_with("B,Gaming,2000"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn category_options_start_with_all() {
        let options = CategoryFilter::options(&["Gaming".to_string(), "Music".to_string()]);
        let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
        assert_eq!(labels, vec!["All", "Gaming", "Music"]);
    }
}
