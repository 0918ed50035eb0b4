//! Pipeline constants and the configuration structs built from them.

use crate::data::schema::FillDefaults;
use std::path::PathBuf;

/// NY State personal income tax filers summary dataset, XML export.
pub const SOURCE_URL: &str = "https://data.ny.gov/api/views/nacg-rg66/rows.xml?accessType=DOWNLOAD";

/// File shared by the two stages.
pub const SNAPSHOT_FILE: &str = "tax_data_cleaned_v6.csv";

pub const HEAD_ROWS: usize = 5;

pub const HISTOGRAM_COLUMN: &str = "Year";

/// Settings for the fetch / clean / persist stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_url: String,
    pub snapshot_path: PathBuf,
    pub head_rows: usize,
    pub fill_defaults: FillDefaults,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_string(),
            snapshot_path: PathBuf::from(SNAPSHOT_FILE),
            head_rows: HEAD_ROWS,
            fill_defaults: FillDefaults::standard(),
        }
    }
}

/// One scatter plot: title and the two display columns it compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterSpec {
    pub title: String,
    pub x: String,
    pub y: String,
}

impl ScatterSpec {
    pub fn new(title: &str, x: &str, y: &str) -> Self {
        Self {
            title: title.to_string(),
            x: x.to_string(),
            y: y.to_string(),
        }
    }
}

/// Settings for the load / summarize / visualize stage.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub snapshot_path: PathBuf,
    pub head_rows: usize,
    pub histogram_column: String,
    pub scatter_plots: Vec<ScatterSpec>,
    /// Open the figure window; off when only the console report is wanted.
    pub show_figures: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(SNAPSHOT_FILE),
            head_rows: HEAD_ROWS,
            histogram_column: HISTOGRAM_COLUMN.to_string(),
            scatter_plots: vec![
                ScatterSpec::new(
                    "Average AGI vs. Average Tax for Taxable Returns",
                    "Average AGI (Taxable Returns)",
                    "Average Tax (Taxable Returns)",
                ),
                ScatterSpec::new(
                    "Taxable AGI vs Non-Taxable AGI",
                    "Taxable AGI (Thousands)",
                    "Non-Taxable AGI (Thousands)",
                ),
            ],
            show_figures: true,
        }
    }
}
