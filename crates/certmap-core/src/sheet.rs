// crates/certmap-core/src/sheet.rs

//! # Sheet parsing seam
//!
//! The pipeline does not care which spreadsheet library produced its
//! rows; it only needs "an ordered sequence of header -> cell mappings".
//! [`SheetParser`] is that capability, and [`CsvSheetParser`] is the
//! concrete adapter shipped with the crate.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::error::Result;

/// One cell value as the parser natively returns it.
///
/// Numbers stay numeric (e.g. a certification year), text stays text.
/// No further validation happens at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    /// Text view of the cell. Integral numbers render without a
    /// fractional part (`2021`, not `2021.0`) so string comparisons
    /// against facet values behave.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(s) => Cow::Borrowed(s),
            Cell::Number(n) => Cow::Owned(format_number(*n)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// One parsed sheet row: header name -> cell. Headers absent from a row
/// are simply missing keys; blank cells are never stored.
pub type SheetRecord = HashMap<String, Cell>;

/// Capability interface for the spreadsheet library.
///
/// Implementations parse a tabular byte buffer into records of the
/// first sheet, in on-disk order.
pub trait SheetParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<SheetRecord>>;
}

/// CSV-backed [`SheetParser`].
///
/// Cells are trimmed; blank cells are dropped (the projection step maps
/// them to the null sentinel); cells that parse as a number are stored
/// as [`Cell::Number`], mirroring a typed spreadsheet cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvSheetParser;

impl SheetParser for CsvSheetParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<SheetRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        let mut records = Vec::new();

        for row in reader.records() {
            let row = row?;
            let mut record = SheetRecord::new();
            for (i, header) in headers.iter().enumerate() {
                let header = header.trim();
                if header.is_empty() {
                    continue;
                }
                let Some(raw) = row.get(i) else { continue };
                let value = raw.trim();
                if value.is_empty() {
                    continue;
                }
                record.insert(header.to_string(), parse_cell(value));
            }
            records.push(record);
        }

        Ok(records)
    }
}

fn parse_cell(value: &str) -> Cell {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(value.to_string()),
    }
}
