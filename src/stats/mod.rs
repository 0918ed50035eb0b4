//! Stats module - Descriptive statistics and correlation

mod calculator;
pub mod describe;

pub use calculator::{ColumnSummary, CorrelationMatrix, HistogramBin, StatsCalculator};
