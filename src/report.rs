//! Load / summarize / visualize stage.

use crate::charts::Figure;
use crate::config::ReportConfig;
use crate::data::schema::DISPLAY_LABELS;
use crate::data::{DataLoader, LoaderError, MissingColumnError};
use crate::gui;
use crate::stats::describe;
use log::info;
use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Failed to summarize snapshot: {0}")]
    Describe(#[from] PolarsError),
    #[error("Failed to open figure window: {0}")]
    Display(String),
}

impl ReportError {
    pub fn missing_column(&self) -> Option<&MissingColumnError> {
        match self {
            ReportError::Load(LoaderError::MissingColumn(e)) => Some(e),
            _ => None,
        }
    }
}

/// Runs the reporter steps against one snapshot.
pub struct Reporter {
    config: ReportConfig,
    loader: DataLoader,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            loader: DataLoader::new(),
        }
    }

    pub fn load(&mut self) -> Result<&DataFrame, ReportError> {
        let df = self.loader.load_csv(&self.config.snapshot_path)?;
        info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            self.config.snapshot_path.display()
        );
        Ok(df)
    }

    /// Apply the display labels; fails before renaming anything if a column is absent.
    pub fn rename(&mut self) -> Result<(), ReportError> {
        self.loader.rename_columns(&DISPLAY_LABELS)?;
        Ok(())
    }

    pub fn describe(&self) -> Result<(), ReportError> {
        let df = self.loader.get_dataframe().ok_or(LoaderError::NoData)?;
        println!("DataFrame loaded successfully.");
        describe::describe(df, self.config.head_rows)?;
        Ok(())
    }

    /// Histogram, correlation heatmap, then the configured scatter plots.
    pub fn figures(&self) -> Result<Vec<Figure>, ReportError> {
        let column = &self.config.histogram_column;
        let mut figures = vec![
            Figure::histogram(&self.loader, column, "Distribution of Tax Years")?,
            Figure::correlation_heatmap(&self.loader, "Correlation Matrix")?,
        ];
        for spec in &self.config.scatter_plots {
            figures.push(Figure::scatter(&self.loader, &spec.x, &spec.y, &spec.title)?);
        }
        Ok(figures)
    }

    /// Load, rename, describe, build every figure, then display them.
    pub fn run(&mut self) -> Result<Vec<Figure>, ReportError> {
        self.load()?;
        self.rename()?;
        self.describe()?;

        let figures = self.figures()?;
        if self.config.show_figures {
            gui::show_figures(figures.clone()).map_err(|e| ReportError::Display(e.to_string()))?;
        }
        Ok(figures)
    }
}
