//! In-memory sheet.

use tracing::debug;

use super::Sheet;
use crate::error::{Error, Result};

/// A sheet held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySheet {
    rows: Vec<Vec<String>>,
}

impl MemorySheet {
    /// Create an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet holding the given rows.
    #[must_use]
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Borrow the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl Sheet for MemorySheet {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    fn append_row(&mut self, row: &[String]) -> Result<()> {
        self.rows.push(row.to_vec());
        debug!("Appended row {}", self.rows.len());
        Ok(())
    }

    fn insert_row(&mut self, row: &[String], position: usize) -> Result<()> {
        let max = self.rows.len() + 1;
        if position == 0 || position > max {
            return Err(Error::InvalidRowPosition { position, max });
        }
        self.rows.insert(position - 1, row.to_vec());
        debug!("Inserted row at {}", position);
        Ok(())
    }

    fn row_count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_append_and_read() {
        let mut sheet = MemorySheet::new();
        sheet.append_row(&row(&["a"])).unwrap();
        sheet.append_row(&row(&["b"])).unwrap();
        assert_eq!(sheet.read_all_rows().unwrap(), vec![row(&["a"]), row(&["b"])]);
        assert_eq!(sheet.row_count().unwrap(), 2);
    }

    #[test]
    fn test_insert_at_top_shifts_rows() {
        let mut sheet = MemorySheet::with_rows(vec![row(&["x"])]);
        sheet.insert_row(&row(&["h"]), 1).unwrap();
        assert_eq!(sheet.rows(), &[row(&["h"]), row(&["x"])]);
    }

    #[test]
    fn test_insert_after_last() {
        let mut sheet = MemorySheet::with_rows(vec![row(&["x"])]);
        sheet.insert_row(&row(&["y"]), 2).unwrap();
        assert_eq!(sheet.rows(), &[row(&["x"]), row(&["y"])]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut sheet = MemorySheet::new();
        assert!(matches!(
            sheet.insert_row(&row(&["y"]), 0),
            Err(Error::InvalidRowPosition { position: 0, max: 1 })
        ));
        assert!(matches!(
            sheet.insert_row(&row(&["y"]), 3),
            Err(Error::InvalidRowPosition { position: 3, max: 1 })
        ));
        assert!(sheet.rows().is_empty());
    }

    #[test]
    fn test_read_all_records_uses_header() {
        let sheet = MemorySheet::with_rows(vec![row(&["Name"]), row(&["Ada"])]);
        let records = sheet.read_all_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Name"], "Ada");
    }
}
