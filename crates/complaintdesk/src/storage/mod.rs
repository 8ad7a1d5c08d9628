//! Tabular store for complaint rows.
//!
//! Everything above this module talks to a [`Sheet`]: an ordered grid of
//! string rows with 1-based positions, the way a spreadsheet tab behaves.
//! [`Workbook`] keeps sheets in a `SQLite` file shared by every process that
//! opens it; [`MemorySheet`] keeps one in memory.

mod memory;
pub mod migrations;
pub mod schema;
mod workbook;

pub use memory::MemorySheet;
pub use workbook::{Workbook, WorkbookStats};

use crate::error::Result;
use crate::record::Record;

/// A spreadsheet-like grid of rows.
///
/// Positions are 1-based. Row 1 is the header row when one is present.
pub trait Sheet {
    /// Every row in position order, header included.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Every row after the first, keyed by the first row's cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn read_all_records(&self) -> Result<Vec<Record>> {
        Ok(records_from_rows(&self.read_all_rows()?))
    }

    /// Add a row after the last one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn append_row(&mut self, row: &[String]) -> Result<()>;

    /// Insert a row at `position`, shifting that row and those below it down.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRowPosition`] unless
    /// `1 <= position <= row_count + 1`, or an error if the store cannot be
    /// written.
    fn insert_row(&mut self, row: &[String], position: usize) -> Result<()>;

    /// Number of rows, header included.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn row_count(&self) -> Result<usize> {
        Ok(self.read_all_rows()?.len())
    }
}

/// Key every row after the first by the first row's cells.
///
/// Short rows are padded with empty cells; cells beyond the header are
/// dropped.
#[must_use]
pub fn records_from_rows(rows: &[Vec<String>]) -> Vec<Record> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };
    data.iter()
        .map(|row| {
            header
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}
