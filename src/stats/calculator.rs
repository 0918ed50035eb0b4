//! Statistics Calculator Module
//! Descriptive summaries, Pearson correlation and unit-width histograms.

use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Summary of one numeric column, nulls excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Pairwise correlations between named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` squared entries.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(f64::NAN)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One `[start, start + 1)` histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBin {
    pub start: i64,
    pub count: usize,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for a column, skipping nulls.
    pub fn compute_descriptive_stats(name: &str, values: &[Option<f64>]) -> ColumnSummary {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let n = present.len();
        if n == 0 {
            return ColumnSummary {
                name: name.to_string(),
                ..Default::default()
            };
        }

        let mut sorted = present.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        ColumnSummary {
            name: name.to_string(),
            count: n,
            mean: present.iter().mean(),
            // Sample deviation; NaN for a single value.
            std: present.iter().std_dev(),
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Pearson correlation over rows where both values are present.
    /// NaN with fewer than two pairs or a constant side.
    pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y.iter())
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip();
        if xs.len() < 2 {
            return f64::NAN;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }

        let r = xs.iter().covariance(ys.iter()) / (sx * sy);
        r.clamp(-1.0, 1.0)
    }

    /// Correlation matrix of the given columns, rows computed in parallel.
    pub fn correlation_matrix(columns: &[(String, Vec<Option<f64>>)]) -> CorrelationMatrix {
        let values = columns
            .par_iter()
            .map(|(_, x)| {
                columns
                    .iter()
                    .map(|(_, y)| Self::pearson(x, y))
                    .collect::<Vec<f64>>()
            })
            .collect();

        CorrelationMatrix {
            labels: columns.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }

    /// Count values into unit-width bins from the minimum to the maximum, inclusive.
    pub fn unit_histogram(values: &[Option<f64>]) -> Vec<HistogramBin> {
        let floors: Vec<i64> = values
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .map(|v| v.floor() as i64)
            .collect();

        let (Some(&min), Some(&max)) = (Iterator::min(floors.iter()), Iterator::max(floors.iter()))
        else {
            return Vec::new();
        };

        let mut bins: Vec<HistogramBin> = (min..=max)
            .map(|start| HistogramBin { start, count: 0 })
            .collect();
        for v in floors {
            bins[(v - min) as usize].count += 1;
        }
        bins
    }
}
