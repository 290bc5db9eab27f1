//! Channel Data Loader Module
//! Reads the channel statistics CSV with Polars and normalises the metric columns.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub const COL_YOUTUBER: &str = "Youtuber";
pub const COL_CATEGORY: &str = "category";
pub const COL_SUBSCRIBERS: &str = "subscribers";
pub const COL_VIDEO_VIEWS: &str = "video views";

const REQUIRED_COLUMNS: [&str; 4] = [COL_YOUTUBER, COL_CATEGORY, COL_SUBSCRIBERS, COL_VIDEO_VIEWS];
const METRIC_COLUMNS: [&str; 2] = [COL_SUBSCRIBERS, COL_VIDEO_VIEWS];

#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("Data file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("Failed to read CSV: {0}")]
    Unreadable(#[from] PolarsError),
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
    #[error("Malformed value '{value}' in column '{column}' at row {row}")]
    MalformedValue {
        column: String,
        row: usize,
        value: String,
    },
}

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Immutable channel table with numeric metric columns.
///
/// Each table gets a process-unique id so derived results can be memoised per table.
#[derive(Debug)]
pub struct ChannelTable {
    id: u64,
    df: DataFrame,
}

impl ChannelTable {
    /// Validate required columns and normalise a raw, text-typed frame.
    pub fn from_raw(mut df: DataFrame) -> Result<Self, DataFormatError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|n| n == required) {
                return Err(DataFormatError::MissingColumn(required.to_string()));
            }
        }

        // Categories are compared as text regardless of what the CSV looked like
        let category = df.column(COL_CATEGORY)?.cast(&DataType::String)?;
        df.with_column(category)?;

        for metric in METRIC_COLUMNS {
            let normalized = normalize_metric(&df, metric)?;
            df.with_column(normalized)?;
        }

        Ok(Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            df,
        })
    }

    /// Identity used as the memoisation key for derived data.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Parse a metric cell such as `"1,234,567"`.
///
/// Returns `None` for anything that is not a finite, non-negative number once
/// the thousands separators are stripped.
pub fn parse_metric(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Convert a text column to `Float64`, keeping blank cells as nulls.
fn normalize_metric(df: &DataFrame, name: &str) -> Result<Column, DataFormatError> {
    let as_text = df.column(name)?.cast(&DataType::String)?;
    let text = as_text.as_materialized_series().str()?;

    let mut values: Vec<Option<f64>> = Vec::with_capacity(text.len());
    for (row, cell) in text.into_iter().enumerate() {
        let value = match cell {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(parse_metric(raw).ok_or_else(|| {
                DataFormatError::MalformedValue {
                    column: name.to_string(),
                    row,
                    value: raw.to_string(),
                }
            })?),
        };
        values.push(value);
    }

    Ok(Column::new(name.into(), values))
}

/// Reads channel CSV files into [`ChannelTable`]s.
pub struct ChannelLoader;

impl ChannelLoader {
    /// Load a CSV file using Polars.
    ///
    /// Every column is read as text first so the thousands separators survive
    /// until [`ChannelTable::from_raw`] strips them.
    pub fn load_csv(path: &Path) -> Result<ChannelTable, DataFormatError> {
        if !path.is_file() {
            return Err(DataFormatError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let table = ChannelTable::from_raw(df)?;
        log::info!(
            "Loaded {} rows, {} columns from {}",
            table.height(),
            table.column_names().len(),
            path.display()
        );
        Ok(table)
    }
}

/// Explicit per-session cache of the loaded table.
///
/// The source file is static for the lifetime of the process, so a loaded
/// table is never invalidated.
pub struct DataCache {
    path: PathBuf,
    table: Option<Arc<ChannelTable>>,
}

impl DataCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: None,
        }
    }

    /// Return the cached table, loading it on first use.
    pub fn get_or_load(&mut self) -> Result<Arc<ChannelTable>, DataFormatError> {
        if let Some(table) = &self.table {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(ChannelLoader::load_csv(&self.path)?);
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Build a normalised table from `(name, category, subscribers, video views)` rows.
#[cfg(test)]
pub(crate) fn table_from_rows(rows: &[(&str, Option<&str>, &str, &str)]) -> ChannelTable {
    let names: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let categories: Vec<Option<&str>> = rows.iter().map(|r| r.1).collect();
    let subscribers: Vec<&str> = rows.iter().map(|r| r.2).collect();
    let views: Vec<&str> = rows.iter().map(|r| r.3).collect();

    let df = df!(
        COL_YOUTUBER => names,
        COL_CATEGORY => categories,
        COL_SUBSCRIBERS => subscribers,
        COL_VIDEO_VIEWS => views
    )
    .unwrap();
    ChannelTable::from_raw(df).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "rank,Youtuber,subscribers,video views,category,started\n";

    fn write_csv(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("channels.csv");
        fs::write(&path, format!("{HEADER}{body}")).unwrap();
        path
    }

    fn metric(table: &ChannelTable, name: &str) -> Vec<Option<f64>> {
        table
            .dataframe()
            .column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn strips_thousands_separators() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "1,A,\"1,000\",500,Music,2006\n2,B,\"2,000\",\"3,000\",Gaming,2012\n",
        );

        let table = ChannelLoader::load_csv(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(metric(&table, COL_SUBSCRIBERS), vec![Some(1000.0), Some(2000.0)]);
        assert_eq!(metric(&table, COL_VIDEO_VIEWS), vec![Some(500.0), Some(3000.0)]);
    }

    #[test]
    fn metrics_are_non_negative_after_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "1,T-Series,\"222,000,000\",\"198,459,090,822\",Music,2006\n\
             2,Cocomelon,\"140,000,000\",\"135,481,339,848\",Education,2006\n\
             3,Quiet,,\"12\",,2019\n",
        );

        let table = ChannelLoader::load_csv(&path).unwrap();
        for name in METRIC_COLUMNS {
            for value in metric(&table, name).into_iter().flatten() {
                assert!(value.is_finite() && value >= 0.0);
            }
        }
        // Blank subscriber cell stays explicitly absent
        assert_eq!(metric(&table, COL_SUBSCRIBERS)[2], None);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChannelLoader::load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataFormatError::FileNotFound { .. }));
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.csv");
        fs::write(&path, "Youtuber,subscribers,video views\nA,1,2\n").unwrap();

        let err = ChannelLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, DataFormatError::MissingColumn(ref c) if c == COL_CATEGORY));
    }

    #[test]
    fn malformed_value_names_column_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "1,A,\"1,000\",500,Music,2006\n2,B,lots,10,Music,2010\n");

        match ChannelLoader::load_csv(&path).unwrap_err() {
            DataFormatError::MalformedValue { column, row, value } => {
                assert_eq!(column, COL_SUBSCRIBERS);
                assert_eq!(row, 1);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_metric_rejects_negative_and_non_finite() {
        assert_eq!(parse_metric("1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_metric(" 42 "), Some(42.0));
        assert_eq!(parse_metric("-5"), None);
        assert_eq!(parse_metric("NaN"), None);
        assert_eq!(parse_metric("inf"), None);
        assert_eq!(parse_metric("12k"), None);
    }

    #[test]
    fn cache_loads_once_and_shares_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "1,A,\"1,000\",500,Music,2006\n");

        let mut cache = DataCache::new(&path);
        let first = cache.get_or_load().unwrap();

        // A cached table survives the file disappearing
        fs::remove_file(&path).unwrap();
        let second = cache.get_or_load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn tables_get_distinct_ids() {
        let a = table_from_rows(&[("A", Some("Music"), "1", "2")]);
        let b = table_from_rows(&[("A", Some("Music"), "1", "2")]);
        assert_ne!(a.id(), b.id());
    }
}
