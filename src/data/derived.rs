//! Derived Data Cache
//! Memoises the category list, category counts and metric summaries per table.

use super::loader::ChannelTable;
use super::processor::{CategoryCount, DataProcessor, ProcessorError};
use crate::stats::{MetricSummary, StatsCalculator};

/// Aggregates computed from one table.
#[derive(Debug, Clone)]
pub struct DerivedData {
    pub table_id: u64,
    pub categories: Vec<String>,
    pub counts: Vec<CategoryCount>,
    pub summaries: Vec<MetricSummary>,
}

/// Recomputes only when it is handed a table with a different identity.
pub struct DerivedCache {
    category_limit: usize,
    data: Option<DerivedData>,
}

impl DerivedCache {
    pub fn new(category_limit: usize) -> Self {
        Self {
            category_limit,
            data: None,
        }
    }

    pub fn get_or_compute(&mut self, table: &ChannelTable) -> Result<&DerivedData, ProcessorError> {
        let data = match self.data.take() {
            Some(data) if data.table_id == table.id() => data,
            _ => {
                log::debug!("Computing derived data for table {}", table.id());
                let df = table.dataframe();
                DerivedData {
                    table_id: table.id(),
                    categories: DataProcessor::distinct_categories(df, self.category_limit)?,
                    counts: DataProcessor::category_counts(df)?,
                    summaries: StatsCalculator::summarize_metrics(df)?,
                }
            }
        };
        Ok(self.data.insert(data))
    }
}
