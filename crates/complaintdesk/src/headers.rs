//! Header row guard.

use tracing::{debug, info};

use crate::error::Result;
use crate::record::{header_row, HEADERS};
use crate::storage::Sheet;

/// Make sure row 1 of the sheet is the canonical header row.
///
/// An empty sheet, or one whose first row differs in any cell, gets the
/// header inserted at position 1. Existing rows are never rewritten, so a
/// mismatched first row moves down to row 2. Returns whether a row was
/// inserted.
///
/// # Errors
///
/// Returns an error if the sheet cannot be read or written.
pub fn ensure_headers<S: Sheet + ?Sized>(sheet: &mut S) -> Result<bool> {
    let rows = sheet.read_all_rows()?;
    if rows.first().is_some_and(|first| first.iter().eq(HEADERS.iter())) {
        debug!("Header row present");
        return Ok(false);
    }

    if rows.is_empty() {
        info!("Sheet is empty, writing header row");
    } else {
        info!("First row is not the header row, inserting header above it");
    }
    sheet.insert_row(&header_row(), 1)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySheet;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_sheet_gets_header() {
        let mut sheet = MemorySheet::new();
        assert!(ensure_headers(&mut sheet).unwrap());
        assert_eq!(sheet.rows(), &[header_row()]);
    }

    #[test]
    fn test_twice_is_idempotent() {
        let mut sheet = MemorySheet::new();
        assert!(ensure_headers(&mut sheet).unwrap());
        assert!(!ensure_headers(&mut sheet).unwrap());
        assert_eq!(sheet.rows().len(), 1);
    }

    #[test]
    fn test_existing_header_untouched() {
        let data = row(&["2025-01-01 10:00:00", "Cc012501", "P", "High", "1", "D", ""]);
        let mut sheet = MemorySheet::with_rows(vec![header_row(), data.clone()]);

        assert!(!ensure_headers(&mut sheet).unwrap());
        assert_eq!(sheet.rows(), &[header_row(), data]);
    }

    #[test]
    fn test_mismatched_first_row_pushed_down() {
        let stray = row(&["Date", "ID"]);
        let mut sheet = MemorySheet::with_rows(vec![stray.clone()]);

        assert!(ensure_headers(&mut sheet).unwrap());
        assert_eq!(sheet.rows(), &[header_row(), stray]);
    }

    #[test]
    fn test_header_with_extra_column_is_mismatch() {
        let mut longer = header_row();
        longer.push("Notes".to_string());
        let mut sheet = MemorySheet::with_rows(vec![longer]);

        assert!(ensure_headers(&mut sheet).unwrap());
        assert_eq!(sheet.rows()[0], header_row());
    }

    #[test]
    fn test_header_case_sensitive() {
        let mut lower = header_row();
        lower[0] = "date submitted".to_string();
        let mut sheet = MemorySheet::with_rows(vec![lower]);

        assert!(ensure_headers(&mut sheet).unwrap());
        assert_eq!(sheet.rows().len(), 2);
    }
}
