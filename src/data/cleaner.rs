//! Data Cleaner Module
//! Turns raw parsed rows into complete, integer-typed snapshot records.

use crate::data::record::{RawTable, RawTaxRecord, TaxRecord};
use crate::data::schema::{Column, ColumnKind, FillDefaults, FillValue};
use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CleanError {
    #[error("No fill default for column '{0}'")]
    MissingDefault(Column),
    #[error("Fill default for column '{0}' does not match its type")]
    DefaultKind(Column),
}

/// What the cleaning pass did to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_dropped: usize,
    pub rows_out: usize,
    pub dropped_column: bool,
    /// Cells filled from defaults, per column.
    pub filled: BTreeMap<Column, usize>,
    /// Numeric cells that lost a fractional part.
    pub truncated: usize,
    pub malformed_values: usize,
    /// Rows sharing a (year, residency, jurisdiction) key with an earlier row.
    pub duplicate_keys: usize,
}

impl CleaningReport {
    pub fn total_filled(&self) -> usize {
        self.filled.values().sum()
    }
}

/// Cleaned records plus the report of how they were produced.
#[derive(Debug, Clone, Default)]
pub struct CleanTable {
    pub records: Vec<TaxRecord>,
    pub report: CleaningReport,
}

/// Handles the drop / fill / coerce pass.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a raw table:
    /// 1. drop the nontaxable liability column,
    /// 2. drop rows missing a required column,
    /// 3. fill remaining gaps from `defaults`,
    /// 4. truncate every numeric column to an integer.
    pub fn clean(raw: RawTable, defaults: &FillDefaults) -> Result<CleanTable, CleanError> {
        Self::validate_defaults(defaults)?;

        let mut report = CleaningReport {
            rows_in: raw.rows.len(),
            dropped_column: raw.has_column(Column::DROPPED),
            malformed_values: raw.malformed_values,
            ..Default::default()
        };
        if report.dropped_column {
            info!("Dropping column {}", Column::DROPPED);
        }

        let mut records = Vec::with_capacity(raw.rows.len());
        let mut keys = HashSet::new();

        for row in raw.rows {
            if Column::REQUIRED.iter().any(|c| row.is_missing(*c)) {
                report.rows_dropped += 1;
                continue;
            }

            let record = Filler {
                defaults,
                report: &mut report,
            }
            .fill(row)?;

            let key = (
                record.tax_year,
                record.resident_type.clone(),
                record.place_of_residence.clone(),
                record.country.clone(),
                record.state.clone(),
                record.county.clone(),
            );
            if !keys.insert(key) {
                report.duplicate_keys += 1;
            }
            records.push(record);
        }

        report.rows_out = records.len();
        if report.duplicate_keys > 0 {
            warn!("{} rows repeat an earlier year/location key", report.duplicate_keys);
        }
        if report.rows_dropped > 0 {
            warn!(
                "Dropped {} of {} rows missing {} or {}",
                report.rows_dropped,
                report.rows_in,
                Column::REQUIRED[0],
                Column::REQUIRED[1]
            );
        }
        info!(
            "Cleaned {} rows ({} cells filled, {} values truncated)",
            report.rows_out,
            report.total_filled(),
            report.truncated
        );

        Ok(CleanTable { records, report })
    }

    fn validate_defaults(defaults: &FillDefaults) -> Result<(), CleanError> {
        for column in Column::ALL {
            if let Some(value) = defaults.get(column) {
                if value.kind() != column.kind() {
                    return Err(CleanError::DefaultKind(column));
                }
            }
        }
        Ok(())
    }
}

/// Truncate toward zero; out-of-range values saturate.
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

struct Filler<'a> {
    defaults: &'a FillDefaults,
    report: &'a mut CleaningReport,
}

impl<'a> Filler<'a> {
    fn fill(&mut self, row: RawTaxRecord) -> Result<TaxRecord, CleanError> {
        Ok(TaxRecord {
            tax_year: self.integer(Column::TaxYear, row.tax_year)?,
            resident_type: self.text(Column::ResidentType, row.resident_type)?,
            place_of_residence: self.text(Column::PlaceOfResidence, row.place_of_residence)?,
            country: self.text(Column::Country, row.country)?,
            state: self.text(Column::State, row.state)?,
            county: self.text(Column::County, row.county)?,
            number_of_all_returns: self
                .integer(Column::NumberOfAllReturns, row.number_of_all_returns)?,
            ny_agi_of_all_returns_in_thousands: self.integer(
                Column::NyAgiOfAllReturns,
                row.ny_agi_of_all_returns_in_thousands,
            )?,
            tax_liability_of_all_returns_in_thousands: self.integer(
                Column::TaxLiabilityOfAllReturns,
                row.tax_liability_of_all_returns_in_thousands,
            )?,
            number_of_taxable_returns: self
                .integer(Column::NumberOfTaxableReturns, row.number_of_taxable_returns)?,
            ny_agi_of_taxable_returns_in_thousands: self.integer(
                Column::NyAgiOfTaxableReturns,
                row.ny_agi_of_taxable_returns_in_thousands,
            )?,
            tax_liability_of_taxable_returns_in_thousands: self.integer(
                Column::TaxLiabilityOfTaxableReturns,
                row.tax_liability_of_taxable_returns_in_thousands,
            )?,
            number_of_nontaxable_returns: self.integer(
                Column::NumberOfNontaxableReturns,
                row.number_of_nontaxable_returns,
            )?,
            ny_agi_of_nontaxable_returns_in_thousands: self.integer(
                Column::NyAgiOfNontaxableReturns,
                row.ny_agi_of_nontaxable_returns_in_thousands,
            )?,
            average_ny_agi_of_all_returns: self.integer(
                Column::AverageNyAgiOfAllReturns,
                row.average_ny_agi_of_all_returns,
            )?,
            average_tax_of_all_returns: self
                .integer(Column::AverageTaxOfAllReturns, row.average_tax_of_all_returns)?,
            average_ny_agi_of_taxable_returns: self.integer(
                Column::AverageNyAgiOfTaxableReturns,
                row.average_ny_agi_of_taxable_returns,
            )?,
            average_tax_of_taxable_returns: self.integer(
                Column::AverageTaxOfTaxableReturns,
                row.average_tax_of_taxable_returns,
            )?,
            average_ny_agi_of_nontaxable_returns: self.integer(
                Column::AverageNyAgiOfNontaxableReturns,
                row.average_ny_agi_of_nontaxable_returns,
            )?,
            county_sort_order: self.integer(Column::CountySortOrder, row.county_sort_order)?,
        })
    }

    fn text(&mut self, column: Column, value: Option<String>) -> Result<String, CleanError> {
        debug_assert_eq!(column.kind(), ColumnKind::Text);
        match value {
            Some(v) => Ok(v),
            None => match self.default_for(column)? {
                FillValue::Text(s) => Ok(s.clone()),
                FillValue::Integer(_) => Err(CleanError::DefaultKind(column)),
            },
        }
    }

    fn integer(&mut self, column: Column, value: Option<f64>) -> Result<i64, CleanError> {
        debug_assert_eq!(column.kind(), ColumnKind::Integer);
        match value {
            Some(v) => {
                if v.fract() != 0.0 {
                    self.report.truncated += 1;
                }
                Ok(truncate(v))
            }
            None => match self.default_for(column)? {
                FillValue::Integer(i) => Ok(*i),
                FillValue::Text(_) => Err(CleanError::DefaultKind(column)),
            },
        }
    }

    fn default_for(&mut self, column: Column) -> Result<&'a FillValue, CleanError> {
        let value = self
            .defaults
            .get(column)
            .ok_or(CleanError::MissingDefault(column))?;
        *self.report.filled.entry(column).or_insert(0) += 1;
        Ok(value)
    }
}
