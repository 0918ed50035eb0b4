//! Figure Builders
//! Turns the loaded snapshot into the data behind each exploratory chart.

use crate::data::{DataLoader, LoaderError};
use crate::stats::{CorrelationMatrix, HistogramBin, StatsCalculator};
use log::debug;

/// Chart payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureKind {
    Histogram(Vec<HistogramBin>),
    Heatmap(CorrelationMatrix),
    Scatter(Vec<[f64; 2]>),
}

/// A titled chart, ready for the figure window.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: FigureKind,
}

impl Figure {
    /// Frequency of each integer value of `column`, one bin per unit.
    pub fn histogram(loader: &DataLoader, column: &str, title: &str) -> Result<Self, LoaderError> {
        let values = loader.column_values(column)?;
        let bins = StatsCalculator::unit_histogram(&values);
        debug!("Histogram of {}: {} bins", column, bins.len());

        Ok(Self {
            title: title.to_string(),
            x_label: column.to_string(),
            y_label: "Frequency".to_string(),
            kind: FigureKind::Histogram(bins),
        })
    }

    /// Pearson correlation between all numeric columns.
    pub fn correlation_heatmap(loader: &DataLoader, title: &str) -> Result<Self, LoaderError> {
        let columns = loader
            .get_numeric_columns()
            .into_iter()
            .map(|name| {
                let values = loader.column_values(&name)?;
                Ok((name, values))
            })
            .collect::<Result<Vec<_>, LoaderError>>()?;
        let matrix = StatsCalculator::correlation_matrix(&columns);
        debug!("Correlation matrix over {} columns", matrix.len());

        Ok(Self {
            title: title.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            kind: FigureKind::Heatmap(matrix),
        })
    }

    /// Points of `x` against `y`; rows with a null on either side are skipped.
    pub fn scatter(
        loader: &DataLoader,
        x: &str,
        y: &str,
        title: &str,
    ) -> Result<Self, LoaderError> {
        let xs = loader.column_values(x)?;
        let ys = loader.column_values(y)?;
        let points: Vec<[f64; 2]> = xs
            .iter()
            .zip(ys.iter())
            .filter_map(|(a, b)| Some([(*a)?, (*b)?]))
            .collect();

        Ok(Self {
            title: title.to_string(),
            x_label: x.to_string(),
            y_label: y.to_string(),
            kind: FigureKind::Scatter(points),
        })
    }
}
