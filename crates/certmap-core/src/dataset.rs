// crates/certmap-core/src/dataset.rs

//! # Dataset loader
//!
//! Handles the physical layer (file read, optional HTTP fetch) and
//! delegates payload parsing to a [`SheetParser`]. Dataset failure is
//! FATAL: the pipeline never renders on a partial dataset, so every
//! function here returns `Result` and the caller aborts on `Err`.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{MapError, Result};
use crate::model::Row;
use crate::sheet::SheetParser;

/// Parse a dataset byte buffer into rows, preserving sheet order.
pub fn load_rows(bytes: &[u8], parser: &dyn SheetParser) -> Result<Vec<Row>> {
    let records = parser.parse(bytes)?;
    let rows: Vec<Row> = records.iter().map(Row::from_record).collect();
    info!(rows = rows.len(), "dataset loaded");
    Ok(rows)
}

/// Read the dataset resource from disk and parse it.
pub fn load_rows_from_path(path: impl AsRef<Path>, parser: &dyn SheetParser) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        MapError::InvalidData(format!("dataset not found at {}: {}", path.display(), e))
    })?;
    load_rows(&bytes, parser)
}

/// Fetch the dataset resource over HTTP and parse it. A non-success
/// status is fatal, same as an unreadable file.
#[cfg(feature = "fetch")]
pub fn fetch_rows(url: &str, parser: &dyn SheetParser) -> Result<Vec<Row>> {
    let response = reqwest::blocking::get(url).map_err(|e| MapError::Http(e.to_string()))?;
    if !response.status().is_success() {
        return Err(MapError::Http(format!(
            "dataset fetch returned {} for {url}",
            response.status()
        )));
    }
    let bytes = response.bytes().map_err(|e| MapError::Http(e.to_string()))?;
    load_rows(&bytes, parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Cell, CsvSheetParser};

    #[test]
    fn loads_rows_in_sheet_order() {
        let bytes = b"City,Status\nPune,Completed\nUnknownville,Hold\n";
        let rows = load_rows(bytes, &CsvSheetParser).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].city, Some(Cell::Text("Pune".into())));
        assert_eq!(rows[1].status, Some(Cell::Text("Hold".into())));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_rows_from_path("/definitely/not/here.csv", &CsvSheetParser);
        assert!(err.is_err());
    }
}
