//! Data module - CSV loading, caching and processing

mod derived;
mod loader;
mod processor;

pub use derived::{DerivedCache, DerivedData};
pub use loader::{ChannelTable, DataCache};
pub use processor::{
    CategoryCount, CategoryFilter, DataProcessor, ProcessorError, RankedChannel, RankingMetric,
};

#[cfg(test)]
pub(crate) use loader::table_from_rows;
