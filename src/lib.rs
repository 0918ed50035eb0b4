//! NY Tax Statistics - dataset download, cleaning & exploratory reporting
//!
//! Two independent stages share one CSV snapshot: `tax-etl` fetches and cleans
//! the XML export, `tax-report` summarizes the snapshot and shows its charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod etl;
pub mod gui;
pub mod report;
pub mod stats;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use log::{error, LevelFilter};

use crate::config::{PipelineConfig, ReportConfig};
use crate::report::Reporter;

static LOGGER: OnceLock<()> = OnceLock::new();

pub fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("ny_tax_stats", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// Entry point of `tax-etl`.
pub fn run_etl() -> Result<()> {
    init_logging();
    let config = PipelineConfig::default();
    etl::run(&config)
        .inspect_err(|e| error!("ETL aborted: {}", e))
        .with_context(|| format!("Building snapshot from {}", config.source_url))?;
    Ok(())
}

/// Entry point of `tax-report`.
pub fn run_report() -> Result<()> {
    init_logging();
    let config = ReportConfig::default();
    let path = config.snapshot_path.clone();
    Reporter::new(config)
        .run()
        .inspect_err(|e| error!("Report aborted: {}", e))
        .with_context(|| format!("Reporting on {}", path.display()))?;
    Ok(())
}
