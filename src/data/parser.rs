//! XML Payload Parser
//! Streams the row-per-record export into a `RawTable`.

use crate::data::record::{RawTable, RawTaxRecord};
use crate::data::schema::{Column, ColumnKind};
use log::{debug, info, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use thiserror::Error;

/// Element name of a record; also used by the export for the outer container.
const ROW_TAG: &[u8] = b"row";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Error reading XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Error reading XML: document ended inside <{0}>")]
    Truncated(String),
    #[error("Error reading XML: no <row> records found")]
    NoRecords,
}

enum Frame {
    Row { record: RawTaxRecord, fields: usize },
    Field { column: Option<Column>, text: String },
    Other,
}

/// Parse an XML payload into raw records.
///
/// A record is a `<row>` element holding leaf fields. A `<row>` whose only
/// children are other `<row>` elements is treated as a container.
pub fn parse(payload: &[u8]) -> Result<RawTable, ParseError> {
    let mut reader = Reader::from_reader(payload);
    reader.config_mut().trim_text(true);

    let mut table = RawTable::default();
    let mut stack: Vec<Frame> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut unknown: HashSet<String> = HashSet::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let frame = if name.as_ref() == ROW_TAG {
                    Frame::Row {
                        record: RawTaxRecord::default(),
                        fields: 0,
                    }
                } else if matches!(stack.last(), Some(Frame::Row { .. })) {
                    let column = lookup_column(name.as_ref(), &mut unknown);
                    Frame::Field {
                        column,
                        text: String::new(),
                    }
                } else {
                    Frame::Other
                };
                names.push(String::from_utf8_lossy(name.as_ref()).into_owned());
                stack.push(frame);
            }
            Event::Empty(e) => {
                let name = e.name();
                if name.as_ref() == ROW_TAG {
                    continue;
                }
                if let Some(Frame::Row { fields, .. }) = stack.last_mut() {
                    if let Some(column) = lookup_column(name.as_ref(), &mut unknown) {
                        table.observe(column);
                    }
                    *fields += 1;
                }
            }
            Event::Text(t) => {
                if let Some(Frame::Field { text, .. }) = stack.last_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(Frame::Field { text, .. }) = stack.last_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(_) => {
                names.pop();
                match stack.pop() {
                    Some(Frame::Field { column, text }) => {
                        if let Some(Frame::Row { record, fields }) = stack.last_mut() {
                            *fields += 1;
                            if let Some(column) = column {
                                table.observe(column);
                                assign(record, column, &text, &mut table.malformed_values);
                            }
                        }
                    }
                    Some(Frame::Row { record, fields }) if fields > 0 => {
                        table.rows.push(record);
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = names.pop() {
        return Err(ParseError::Truncated(open));
    }
    if table.rows.is_empty() {
        return Err(ParseError::NoRecords);
    }

    info!(
        "Parsed {} rows with {} columns",
        table.rows.len(),
        table.columns.len()
    );
    Ok(table)
}

fn lookup_column(name: &[u8], unknown: &mut HashSet<String>) -> Option<Column> {
    let name = String::from_utf8_lossy(name);
    let column = Column::from_name(&name);
    if column.is_none() && unknown.insert(name.to_string()) {
        debug!("Ignoring unknown field <{}>", name);
    }
    column
}

fn assign(record: &mut RawTaxRecord, column: Column, text: &str, malformed: &mut usize) {
    let text = text.trim();
    match column.kind() {
        ColumnKind::Text => {
            let value = (!text.is_empty()).then(|| text.to_string());
            record.set_text(column, value);
        }
        ColumnKind::Integer => {
            let value = if text.is_empty() {
                None
            } else {
                match text.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(v),
                    _ => {
                        warn!("Malformed value '{}' in column {}", text, column);
                        *malformed += 1;
                        None
                    }
                }
            };
            record.set_number(column, value);
        }
    }
}
