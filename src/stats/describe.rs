//! Console inspection of a frame: columns, dtypes, head rows, summaries, missing counts.

use crate::data::loader::is_numeric;
use crate::stats::{ColumnSummary, StatsCalculator};
use polars::prelude::*;
use std::fmt::Write as _;

const SEPARATOR: &str = "----------------";

/// Per-column null counts, in frame order.
pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect()
}

/// Descriptive statistics for every numeric column, in frame order.
pub fn summarize_numeric(df: &DataFrame) -> PolarsResult<Vec<ColumnSummary>> {
    df.get_columns()
        .iter()
        .filter(|c| is_numeric(c.dtype()))
        .map(|c| {
            let as_f64 = c.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = as_f64.f64()?.into_iter().collect();
            Ok(StatsCalculator::compute_descriptive_stats(
                c.name().as_str(),
                &values,
            ))
        })
        .collect()
}

/// Summary statistics laid out like `describe()`: one row per statistic.
pub fn summary_frame(summaries: &[ColumnSummary]) -> PolarsResult<DataFrame> {
    let mut columns = vec![Column::new(
        "statistic".into(),
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"],
    )];
    for s in summaries {
        columns.push(Column::new(
            s.name.as_str().into(),
            [
                s.count as f64,
                s.mean,
                s.std,
                s.min,
                s.p25,
                s.median,
                s.p75,
                s.max,
            ],
        ));
    }
    DataFrame::new(columns)
}

pub fn render_columns(df: &DataFrame) -> String {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| format!("'{}'", s))
        .collect();
    format!("[{}]", names.join(", "))
}

pub fn render_dtypes(df: &DataFrame) -> String {
    let width = df
        .get_column_names()
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for column in df.get_columns() {
        let _ = writeln!(out, "{:<width$}  {}", column.name().as_str(), column.dtype());
    }
    out
}

pub fn render_missing(df: &DataFrame) -> String {
    let counts = missing_counts(df);
    let width = counts.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (name, count) in counts {
        let _ = writeln!(out, "{:<width$}  {}", name, count);
    }
    out
}

/// Column list, dtypes and the first `head_rows` rows.
pub fn print_overview(df: &DataFrame, head_rows: usize) {
    println!("Available columns in the DataFrame:");
    println!("{}", render_columns(df));
    println!("Data types in the DataFrame:");
    print!("{}", render_dtypes(df));
    println!("First few rows of the DataFrame:");
    println!("{}", df.head(Some(head_rows)));
}

pub fn print_missing(df: &DataFrame, heading: &str) {
    println!("{}", heading);
    print!("{}", render_missing(df));
}

/// Full console description used by the reporter.
pub fn describe(df: &DataFrame, head_rows: usize) -> PolarsResult<()> {
    print_overview(df, head_rows);
    println!("{}", SEPARATOR);

    let summaries = summarize_numeric(df)?;
    println!("Summary statistics for numeric columns:");
    println!("{}", summary_frame(&summaries)?);

    print_missing(df, "Missing data in the DataFrame:");
    println!("{}", SEPARATOR);
    Ok(())
}
