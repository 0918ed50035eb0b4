//! Record Types
//! One typed shape for a parsed XML row and one for a cleaned snapshot row.

use crate::data::schema::Column;
use serde::{Deserialize, Serialize};

/// A row as parsed from the XML payload; any field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTaxRecord {
    pub tax_year: Option<f64>,
    pub resident_type: Option<String>,
    pub place_of_residence: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub county: Option<String>,
    pub number_of_all_returns: Option<f64>,
    pub ny_agi_of_all_returns_in_thousands: Option<f64>,
    pub tax_liability_of_all_returns_in_thousands: Option<f64>,
    pub number_of_taxable_returns: Option<f64>,
    pub ny_agi_of_taxable_returns_in_thousands: Option<f64>,
    pub tax_liability_of_taxable_returns_in_thousands: Option<f64>,
    pub number_of_nontaxable_returns: Option<f64>,
    pub ny_agi_of_nontaxable_returns_in_thousands: Option<f64>,
    pub tax_liability_of_nontaxable_returns_in_thousands: Option<f64>,
    pub average_ny_agi_of_all_returns: Option<f64>,
    pub average_tax_of_all_returns: Option<f64>,
    pub average_ny_agi_of_taxable_returns: Option<f64>,
    pub average_tax_of_taxable_returns: Option<f64>,
    pub average_ny_agi_of_nontaxable_returns: Option<f64>,
    pub county_sort_order: Option<f64>,
}

/// Borrowed view of one raw cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

impl RawValue<'_> {
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Text(v) => v.is_none(),
            RawValue::Number(v) => v.is_none(),
        }
    }
}

impl RawTaxRecord {
    fn text_slot(&mut self, column: Column) -> Option<&mut Option<String>> {
        match column {
            Column::ResidentType => Some(&mut self.resident_type),
            Column::PlaceOfResidence => Some(&mut self.place_of_residence),
            Column::Country => Some(&mut self.country),
            Column::State => Some(&mut self.state),
            Column::County => Some(&mut self.county),
            _ => None,
        }
    }

    fn number_slot(&mut self, column: Column) -> Option<&mut Option<f64>> {
        match column {
            Column::TaxYear => Some(&mut self.tax_year),
            Column::NumberOfAllReturns => Some(&mut self.number_of_all_returns),
            Column::NyAgiOfAllReturns => Some(&mut self.ny_agi_of_all_returns_in_thousands),
            Column::TaxLiabilityOfAllReturns => {
                Some(&mut self.tax_liability_of_all_returns_in_thousands)
            }
            Column::NumberOfTaxableReturns => Some(&mut self.number_of_taxable_returns),
            Column::NyAgiOfTaxableReturns => {
                Some(&mut self.ny_agi_of_taxable_returns_in_thousands)
            }
            Column::TaxLiabilityOfTaxableReturns => {
                Some(&mut self.tax_liability_of_taxable_returns_in_thousands)
            }
            Column::NumberOfNontaxableReturns => Some(&mut self.number_of_nontaxable_returns),
            Column::NyAgiOfNontaxableReturns => {
                Some(&mut self.ny_agi_of_nontaxable_returns_in_thousands)
            }
            Column::TaxLiabilityOfNontaxableReturns => {
                Some(&mut self.tax_liability_of_nontaxable_returns_in_thousands)
            }
            Column::AverageNyAgiOfAllReturns => Some(&mut self.average_ny_agi_of_all_returns),
            Column::AverageTaxOfAllReturns => Some(&mut self.average_tax_of_all_returns),
            Column::AverageNyAgiOfTaxableReturns => {
                Some(&mut self.average_ny_agi_of_taxable_returns)
            }
            Column::AverageTaxOfTaxableReturns => Some(&mut self.average_tax_of_taxable_returns),
            Column::AverageNyAgiOfNontaxableReturns => {
                Some(&mut self.average_ny_agi_of_nontaxable_returns)
            }
            Column::CountySortOrder => Some(&mut self.county_sort_order),
            _ => None,
        }
    }

    /// Store a text cell. Returns false if `column` is numeric.
    pub fn set_text(&mut self, column: Column, value: Option<String>) -> bool {
        match self.text_slot(column) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Store a numeric cell. Returns false if `column` is textual.
    pub fn set_number(&mut self, column: Column, value: Option<f64>) -> bool {
        match self.number_slot(column) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn value(&self, column: Column) -> RawValue<'_> {
        match column {
            Column::TaxYear => RawValue::Number(self.tax_year),
            Column::ResidentType => RawValue::Text(self.resident_type.as_deref()),
            Column::PlaceOfResidence => RawValue::Text(self.place_of_residence.as_deref()),
            Column::Country => RawValue::Text(self.country.as_deref()),
            Column::State => RawValue::Text(self.state.as_deref()),
            Column::County => RawValue::Text(self.county.as_deref()),
            Column::NumberOfAllReturns => RawValue::Number(self.number_of_all_returns),
            Column::NyAgiOfAllReturns => {
                RawValue::Number(self.ny_agi_of_all_returns_in_thousands)
            }
            Column::TaxLiabilityOfAllReturns => {
                RawValue::Number(self.tax_liability_of_all_returns_in_thousands)
            }
            Column::NumberOfTaxableReturns => RawValue::Number(self.number_of_taxable_returns),
            Column::NyAgiOfTaxableReturns => {
                RawValue::Number(self.ny_agi_of_taxable_returns_in_thousands)
            }
            Column::TaxLiabilityOfTaxableReturns => {
                RawValue::Number(self.tax_liability_of_taxable_returns_in_thousands)
            }
            Column::NumberOfNontaxableReturns => {
                RawValue::Number(self.number_of_nontaxable_returns)
            }
            Column::NyAgiOfNontaxableReturns => {
                RawValue::Number(self.ny_agi_of_nontaxable_returns_in_thousands)
            }
            Column::TaxLiabilityOfNontaxableReturns => {
                RawValue::Number(self.tax_liability_of_nontaxable_returns_in_thousands)
            }
            Column::AverageNyAgiOfAllReturns => {
                RawValue::Number(self.average_ny_agi_of_all_returns)
            }
            Column::AverageTaxOfAllReturns => RawValue::Number(self.average_tax_of_all_returns),
            Column::AverageNyAgiOfTaxableReturns => {
                RawValue::Number(self.average_ny_agi_of_taxable_returns)
            }
            Column::AverageTaxOfTaxableReturns => {
                RawValue::Number(self.average_tax_of_taxable_returns)
            }
            Column::AverageNyAgiOfNontaxableReturns => {
                RawValue::Number(self.average_ny_agi_of_nontaxable_returns)
            }
            Column::CountySortOrder => RawValue::Number(self.county_sort_order),
        }
    }

    pub fn is_missing(&self, column: Column) -> bool {
        self.value(column).is_missing()
    }
}

/// A cleaned snapshot row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRecord {
    pub tax_year: i64,
    pub resident_type: String,
    pub place_of_residence: String,
    pub country: String,
    pub state: String,
    pub county: String,
    pub number_of_all_returns: i64,
    pub ny_agi_of_all_returns_in_thousands: i64,
    pub tax_liability_of_all_returns_in_thousands: i64,
    pub number_of_taxable_returns: i64,
    pub ny_agi_of_taxable_returns_in_thousands: i64,
    pub tax_liability_of_taxable_returns_in_thousands: i64,
    pub number_of_nontaxable_returns: i64,
    pub ny_agi_of_nontaxable_returns_in_thousands: i64,
    pub average_ny_agi_of_all_returns: i64,
    pub average_tax_of_all_returns: i64,
    pub average_ny_agi_of_taxable_returns: i64,
    pub average_tax_of_taxable_returns: i64,
    pub average_ny_agi_of_nontaxable_returns: i64,
    pub county_sort_order: i64,
}

/// Borrowed view of one cleaned cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanValue<'a> {
    Text(&'a str),
    Integer(i64),
}

impl TaxRecord {
    /// Cell for `column`; `None` only for the dropped column.
    pub fn value(&self, column: Column) -> Option<CleanValue<'_>> {
        let value = match column {
            Column::TaxYear => CleanValue::Integer(self.tax_year),
            Column::ResidentType => CleanValue::Text(&self.resident_type),
            Column::PlaceOfResidence => CleanValue::Text(&self.place_of_residence),
            Column::Country => CleanValue::Text(&self.country),
            Column::State => CleanValue::Text(&self.state),
            Column::County => CleanValue::Text(&self.county),
            Column::NumberOfAllReturns => CleanValue::Integer(self.number_of_all_returns),
            Column::NyAgiOfAllReturns => {
                CleanValue::Integer(self.ny_agi_of_all_returns_in_thousands)
            }
            Column::TaxLiabilityOfAllReturns => {
                CleanValue::Integer(self.tax_liability_of_all_returns_in_thousands)
            }
            Column::NumberOfTaxableReturns => CleanValue::Integer(self.number_of_taxable_returns),
            Column::NyAgiOfTaxableReturns => {
                CleanValue::Integer(self.ny_agi_of_taxable_returns_in_thousands)
            }
            Column::TaxLiabilityOfTaxableReturns => {
                CleanValue::Integer(self.tax_liability_of_taxable_returns_in_thousands)
            }
            Column::NumberOfNontaxableReturns => {
                CleanValue::Integer(self.number_of_nontaxable_returns)
            }
            Column::NyAgiOfNontaxableReturns => {
                CleanValue::Integer(self.ny_agi_of_nontaxable_returns_in_thousands)
            }
            Column::TaxLiabilityOfNontaxableReturns => return None,
            Column::AverageNyAgiOfAllReturns => {
                CleanValue::Integer(self.average_ny_agi_of_all_returns)
            }
            Column::AverageTaxOfAllReturns => CleanValue::Integer(self.average_tax_of_all_returns),
            Column::AverageNyAgiOfTaxableReturns => {
                CleanValue::Integer(self.average_ny_agi_of_taxable_returns)
            }
            Column::AverageTaxOfTaxableReturns => {
                CleanValue::Integer(self.average_tax_of_taxable_returns)
            }
            Column::AverageNyAgiOfNontaxableReturns => {
                CleanValue::Integer(self.average_ny_agi_of_nontaxable_returns)
            }
            Column::CountySortOrder => CleanValue::Integer(self.county_sort_order),
        };
        Some(value)
    }
}

/// Parsed payload: rows plus the columns the payload actually carried.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Observed columns, in order of first appearance.
    pub columns: Vec<Column>,
    pub rows: Vec<RawTaxRecord>,
    /// Numeric cells whose text was not a finite number.
    pub malformed_values: usize,
}

impl RawTable {
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn observe(&mut self, column: Column) {
        if !self.has_column(column) {
            self.columns.push(column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_respect_column_kind() {
        let mut record = RawTaxRecord::default();
        assert!(record.set_text(Column::State, Some("NY".to_string())));
        assert!(!record.set_text(Column::TaxYear, Some("2020".to_string())));
        assert!(record.set_number(Column::TaxYear, Some(2020.0)));
        assert!(!record.set_number(Column::County, Some(1.0)));

        assert_eq!(record.value(Column::State), RawValue::Text(Some("NY")));
        assert_eq!(record.value(Column::TaxYear), RawValue::Number(Some(2020.0)));
        assert!(record.is_missing(Column::County));
    }

    #[test]
    fn observe_keeps_first_seen_order() {
        let mut table = RawTable::default();
        table.observe(Column::State);
        table.observe(Column::TaxYear);
        table.observe(Column::State);
        assert_eq!(table.columns, vec![Column::State, Column::TaxYear]);
    }
}
