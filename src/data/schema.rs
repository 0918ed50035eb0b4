//! Column Schema Module
//! Closed set of dataset columns, their target kinds, fill defaults and display labels.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A column the downstream code expects but the table does not carry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing column: '{column}'")]
pub struct MissingColumnError {
    pub column: String,
}

impl MissingColumnError {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// Target type of a column after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
}

/// Every column of the tax statistics dataset, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    TaxYear,
    ResidentType,
    PlaceOfResidence,
    Country,
    State,
    County,
    NumberOfAllReturns,
    NyAgiOfAllReturns,
    TaxLiabilityOfAllReturns,
    NumberOfTaxableReturns,
    NyAgiOfTaxableReturns,
    TaxLiabilityOfTaxableReturns,
    NumberOfNontaxableReturns,
    NyAgiOfNontaxableReturns,
    TaxLiabilityOfNontaxableReturns,
    AverageNyAgiOfAllReturns,
    AverageTaxOfAllReturns,
    AverageNyAgiOfTaxableReturns,
    AverageTaxOfTaxableReturns,
    AverageNyAgiOfNontaxableReturns,
    CountySortOrder,
}

impl Column {
    pub const ALL: [Column; 21] = [
        Column::TaxYear,
        Column::ResidentType,
        Column::PlaceOfResidence,
        Column::Country,
        Column::State,
        Column::County,
        Column::NumberOfAllReturns,
        Column::NyAgiOfAllReturns,
        Column::TaxLiabilityOfAllReturns,
        Column::NumberOfTaxableReturns,
        Column::NyAgiOfTaxableReturns,
        Column::TaxLiabilityOfTaxableReturns,
        Column::NumberOfNontaxableReturns,
        Column::NyAgiOfNontaxableReturns,
        Column::TaxLiabilityOfNontaxableReturns,
        Column::AverageNyAgiOfAllReturns,
        Column::AverageTaxOfAllReturns,
        Column::AverageNyAgiOfTaxableReturns,
        Column::AverageTaxOfTaxableReturns,
        Column::AverageNyAgiOfNontaxableReturns,
        Column::CountySortOrder,
    ];

    /// Rows missing any of these are dropped rather than filled.
    pub const REQUIRED: [Column; 2] = [
        Column::TaxLiabilityOfTaxableReturns,
        Column::AverageTaxOfTaxableReturns,
    ];

    /// Mostly absent upstream; removed outright during cleaning.
    pub const DROPPED: Column = Column::TaxLiabilityOfNontaxableReturns;

    /// Raw identifier as it appears in the XML payload and the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            Column::TaxYear => "tax_year",
            Column::ResidentType => "resident_type",
            Column::PlaceOfResidence => "place_of_residence",
            Column::Country => "country",
            Column::State => "state",
            Column::County => "county",
            Column::NumberOfAllReturns => "number_of_all_returns",
            Column::NyAgiOfAllReturns => "ny_agi_of_all_returns_in_thousands",
            Column::TaxLiabilityOfAllReturns => "tax_liability_of_all_returns_in_thousands",
            Column::NumberOfTaxableReturns => "number_of_taxable_returns",
            Column::NyAgiOfTaxableReturns => "ny_agi_of_taxable_returns_in_thousands",
            Column::TaxLiabilityOfTaxableReturns => {
                "tax_liability_of_taxable_returns_in_thousands"
            }
            Column::NumberOfNontaxableReturns => "number_of_nontaxable_returns",
            Column::NyAgiOfNontaxableReturns => "ny_agi_of_nontaxable_returns_in_thousands",
            Column::TaxLiabilityOfNontaxableReturns => {
                "tax_liability_of_nontaxable_returns_in_thousands"
            }
            Column::AverageNyAgiOfAllReturns => "average_ny_agi_of_all_returns",
            Column::AverageTaxOfAllReturns => "average_tax_of_all_returns",
            Column::AverageNyAgiOfTaxableReturns => "average_ny_agi_of_taxable_returns",
            Column::AverageTaxOfTaxableReturns => "average_tax_of_taxable_returns",
            Column::AverageNyAgiOfNontaxableReturns => "average_ny_agi_of_nontaxable_returns",
            Column::CountySortOrder => "county_sort_order",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::ResidentType
            | Column::PlaceOfResidence
            | Column::Country
            | Column::State
            | Column::County => ColumnKind::Text,
            _ => ColumnKind::Integer,
        }
    }

    /// Columns that survive cleaning, in snapshot order.
    pub fn cleaned() -> impl Iterator<Item = Column> {
        Column::ALL.into_iter().filter(|c| *c != Column::DROPPED)
    }

    pub fn is_required(self) -> bool {
        Column::REQUIRED.contains(&self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value substituted for a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FillValue {
    Text(String),
    Integer(i64),
}

impl FillValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            FillValue::Text(_) => ColumnKind::Text,
            FillValue::Integer(_) => ColumnKind::Integer,
        }
    }
}

/// Per-column defaults used to fill missing values.
#[derive(Debug, Clone, Default)]
pub struct FillDefaults {
    values: HashMap<Column, FillValue>,
}

impl FillDefaults {
    /// Empty map; every needed default must be set explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text columns fall back to "unknown", numeric columns to 0.
    /// The required columns and the dropped column get no default.
    pub fn standard() -> Self {
        let mut defaults = Self::new();
        for column in Column::cleaned().filter(|c| !c.is_required()) {
            let value = match column.kind() {
                ColumnKind::Text => FillValue::Text(UNKNOWN.to_string()),
                ColumnKind::Integer => FillValue::Integer(0),
            };
            defaults.set(column, value);
        }
        defaults
    }

    pub fn set(&mut self, column: Column, value: FillValue) -> &mut Self {
        self.values.insert(column, value);
        self
    }

    pub fn get(&self, column: Column) -> Option<&FillValue> {
        self.values.get(&column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sentinel for a missing categorical value.
pub const UNKNOWN: &str = "unknown";

/// Raw identifier to human readable label, applied by the reporter.
pub const DISPLAY_LABELS: [(Column, &str); 14] = [
    (Column::TaxYear, "Year"),
    (Column::NumberOfAllReturns, "Total Returns"),
    (Column::NyAgiOfAllReturns, "Total AGI (Thousands)"),
    (
        Column::TaxLiabilityOfAllReturns,
        "Total Tax Liability (Thousands)",
    ),
    (Column::NumberOfTaxableReturns, "Taxable Returns"),
    (Column::NyAgiOfTaxableReturns, "Taxable AGI (Thousands)"),
    (
        Column::TaxLiabilityOfTaxableReturns,
        "Taxable Tax Liability (Thousands)",
    ),
    (Column::NumberOfNontaxableReturns, "Non-Taxable Returns"),
    (Column::NyAgiOfNontaxableReturns, "Non-Taxable AGI (Thousands)"),
    (Column::AverageNyAgiOfAllReturns, "Average AGI (All Returns)"),
    (Column::AverageTaxOfAllReturns, "Average Tax (All Returns)"),
    (
        Column::AverageNyAgiOfTaxableReturns,
        "Average AGI (Taxable Returns)",
    ),
    (
        Column::AverageTaxOfTaxableReturns,
        "Average Tax (Taxable Returns)",
    ),
    (
        Column::AverageNyAgiOfNontaxableReturns,
        "Average AGI (Non-Taxable Returns)",
    ),
];
