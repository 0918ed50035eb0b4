//! Fetch / clean / persist stage.

use crate::config::PipelineConfig;
use crate::data::{
    frame, parse, persist, CleanError, CleaningReport, DataCleaner, Fetcher, NetworkError,
    ParseError, PersistError,
};
use crate::stats::describe;
use log::info;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("Failed to build inspection frame: {0}")]
    Frame(#[from] PolarsError),
}

/// Download the dataset and run it through [`process`].
pub fn run(config: &PipelineConfig) -> Result<CleaningReport, EtlError> {
    let payload = Fetcher::new()?.fetch(&config.source_url)?;
    process(&payload, config)
}

/// Parse, clean and persist an already downloaded payload.
///
/// Nothing is written unless every earlier step succeeds.
pub fn process(payload: &[u8], config: &PipelineConfig) -> Result<CleaningReport, EtlError> {
    let raw = parse(payload)?;

    let raw_df = frame::raw_frame(&raw)?;
    describe::print_overview(&raw_df, config.head_rows);
    describe::print_missing(&raw_df, "Missing data in the DataFrame before cleaning:");

    let clean = DataCleaner::clean(raw, &config.fill_defaults)?;

    let clean_df = frame::clean_frame(&clean.records)?;
    describe::print_missing(&clean_df, "Missing data in the DataFrame after cleaning:");
    print_cleaning_report(&clean.report);

    persist(&clean.records, &config.snapshot_path)?;
    println!(
        "Cleaned data saved to '{}'.",
        config.snapshot_path.display()
    );
    info!("ETL finished: {} rows", clean.report.rows_out);

    Ok(clean.report)
}

fn print_cleaning_report(report: &CleaningReport) {
    println!("Cleaning summary:");
    println!("  rows read:              {}", report.rows_in);
    println!("  rows dropped:           {}", report.rows_dropped);
    println!("  rows kept:              {}", report.rows_out);
    println!("  nontaxable column seen: {}", report.dropped_column);
    println!("  cells filled:           {}", report.total_filled());
    println!("  values truncated:       {}", report.truncated);
    println!("  malformed values:       {}", report.malformed_values);
    println!("  duplicate keys:         {}", report.duplicate_keys);
}
