//! Snapshot Loader Module
//! Loads the cleaned CSV with Polars and exposes column-level access.

use crate::data::schema::{Column, MissingColumnError};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    MissingColumn(#[from] MissingColumnError),
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
    #[error("No data loaded")]
    NoData,
}

/// Returns true for the integer and floating point dtypes.
pub fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Holds the loaded snapshot frame.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
        }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get list of numeric column names, in frame order.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    fn require(&self, name: &str) -> Result<&DataFrame, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        if df.get_column_index(name).is_none() {
            return Err(MissingColumnError::new(name).into());
        }
        Ok(df)
    }

    /// Rename columns from raw identifiers to display labels.
    ///
    /// Every source column is checked first; on a miss nothing is renamed.
    pub fn rename_columns(&mut self, labels: &[(Column, &str)]) -> Result<(), LoaderError> {
        for (column, _) in labels {
            self.require(column.name())?;
        }

        let df = self.df.as_mut().ok_or(LoaderError::NoData)?;
        for (column, label) in labels {
            df.rename(column.name(), (*label).into())?;
        }
        Ok(())
    }

    /// Values of a numeric column as `f64`, nulls preserved.
    pub fn column_values(&self, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let df = self.require(name)?;
        let column = df.column(name)?;
        if !is_numeric(column.dtype()) {
            return Err(LoaderError::NotNumeric(name.to_string()));
        }

        let as_f64 = column.cast(&DataType::Float64)?;
        let values = as_f64.f64()?.into_iter().collect();
        Ok(values)
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Set DataFrame directly.
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> DataLoader {
        let df = df!(
            "tax_year" => [2019i64, 2020, 2020],
            "state" => ["New York", "unknown", "New York"],
            "average_tax_of_taxable_returns" => [1.5f64, 2.5, 3.5],
        )
        .expect("frame");
        let mut loader = DataLoader::new();
        loader.set_dataframe(df);
        loader
    }

    #[test]
    fn numeric_columns_skip_text() {
        assert_eq!(
            loader().get_numeric_columns(),
            vec!["tax_year", "average_tax_of_taxable_returns"]
        );
    }

    #[test]
    fn rename_is_all_or_nothing() {
        let mut loader = loader();
        let err = loader
            .rename_columns(&[
                (Column::TaxYear, "Year"),
                (Column::NumberOfAllReturns, "Total Returns"),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MissingColumn(ref e) if e.column == "number_of_all_returns"
        ));
        assert!(loader.get_columns().contains(&"tax_year".to_string()));

        loader
            .rename_columns(&[(Column::TaxYear, "Year")])
            .expect("rename");
        assert_eq!(loader.get_columns()[0], "Year");
    }

    #[test]
    fn column_values_cast_to_float() {
        let loader = loader();
        assert_eq!(
            loader.column_values("tax_year").expect("values"),
            vec![Some(2019.0), Some(2020.0), Some(2020.0)]
        );
        assert!(matches!(
            loader.column_values("state"),
            Err(LoaderError::NotNumeric(_))
        ));
        assert!(matches!(
            loader.column_values("Year"),
            Err(LoaderError::MissingColumn(_))
        ));
    }
}
