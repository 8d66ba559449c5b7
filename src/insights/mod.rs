//! Industry insights: static keyword and trend lookups plus the benchmark
//! page scrape.

mod benchmarks;
mod keywords;
mod trends;

pub use benchmarks::{BenchmarkFetcher, DATA_NOT_AVAILABLE, extract_cpc};
pub use keywords::{KeywordReport, lookup_keywords};
pub use trends::{Metric, NOT_AVAILABLE, TrendReport, lookup_trends};
