//! DataFrame views of the typed tables, used for console inspection.

use crate::data::record::{RawTable, RawValue, TaxRecord};
use crate::data::schema::{Column, ColumnKind};
use polars::prelude::{Column as FrameColumn, DataFrame, PolarsResult};

/// Raw table as a frame: only the columns the payload carried, nulls kept.
pub fn raw_frame(table: &RawTable) -> PolarsResult<DataFrame> {
    let columns = table
        .columns
        .iter()
        .map(|&column| match column.kind() {
            ColumnKind::Text => {
                let values: Vec<Option<String>> = table
                    .rows
                    .iter()
                    .map(|row| match row.value(column) {
                        RawValue::Text(v) => v.map(str::to_string),
                        RawValue::Number(_) => None,
                    })
                    .collect();
                FrameColumn::new(column.name().into(), values)
            }
            ColumnKind::Integer => {
                let values: Vec<Option<f64>> = table
                    .rows
                    .iter()
                    .map(|row| match row.value(column) {
                        RawValue::Number(v) => v,
                        RawValue::Text(_) => None,
                    })
                    .collect();
                FrameColumn::new(column.name().into(), values)
            }
        })
        .collect();

    DataFrame::new(columns)
}

/// Cleaned records as a frame, in snapshot column order.
pub fn clean_frame(records: &[TaxRecord]) -> PolarsResult<DataFrame> {
    use crate::data::record::CleanValue;

    let columns = Column::cleaned()
        .map(|column| match column.kind() {
            ColumnKind::Text => {
                let values: Vec<&str> = records
                    .iter()
                    .map(|r| match r.value(column) {
                        Some(CleanValue::Text(s)) => s,
                        _ => "",
                    })
                    .collect();
                FrameColumn::new(column.name().into(), values)
            }
            ColumnKind::Integer => {
                let values: Vec<i64> = records
                    .iter()
                    .map(|r| match r.value(column) {
                        Some(CleanValue::Integer(i)) => i,
                        _ => 0,
                    })
                    .collect();
                FrameColumn::new(column.name().into(), values)
            }
        })
        .collect();

    DataFrame::new(columns)
}
