//! Admin-only record viewer.
//!
//! Access is decided by an [`AccessGate`]. The shipped gate compares against
//! one shared password; nothing else in the crate depends on how the
//! decision is made.

use tracing::{debug, info};

use crate::error::Result;
use crate::record::{ComplaintRecord, Record};
use crate::storage::Sheet;

/// Result of checking an admin credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credential entered; the admin section stays hidden.
    Hidden,
    /// Credential accepted.
    Granted,
    /// Credential entered but wrong.
    Denied,
}

/// Decides whether a credential unlocks the record view.
pub trait AccessGate {
    /// Check `credential`. An empty credential must yield [`Access::Hidden`].
    fn check(&self, credential: &str) -> Access;
}

/// Gate that accepts exactly one shared password.
///
/// Only the BLAKE3 digest of the password is kept, and digests are compared
/// in constant time.
#[derive(Clone)]
pub struct SharedPasswordGate {
    digest: blake3::Hash,
}

impl SharedPasswordGate {
    /// Create a gate for `password`.
    #[must_use]
    pub fn new(password: &str) -> Self {
        Self {
            digest: blake3::hash(password.as_bytes()),
        }
    }
}

impl std::fmt::Debug for SharedPasswordGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPasswordGate").finish_non_exhaustive()
    }
}

impl AccessGate for SharedPasswordGate {
    fn check(&self, credential: &str) -> Access {
        if credential.is_empty() {
            Access::Hidden
        } else if blake3::hash(credential.as_bytes()) == self.digest {
            Access::Granted
        } else {
            Access::Denied
        }
    }
}

/// All stored complaints, laid out under the sheet's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    /// Column names, taken from row 1.
    pub columns: Vec<String>,
    /// Data rows, each exactly `columns.len()` cells wide.
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// Build a table from a raw grid whose first row is the header.
    ///
    /// Returns `None` when the grid holds no data rows. Short rows are padded
    /// with empty cells and long rows truncated to the header width.
    #[must_use]
    pub fn from_grid(grid: Vec<Vec<String>>) -> Option<Self> {
        let mut grid = grid.into_iter();
        let columns = grid.next()?;
        let width = columns.len();
        let rows: Vec<Vec<String>> = grid
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        if rows.is_empty() {
            return None;
        }
        Some(Self { columns, rows })
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows as complaint records, keyed by column name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedRecord`] if a row holds an unknown
    /// severity.
    pub fn to_records(&self) -> Result<Vec<ComplaintRecord>> {
        self.rows
            .iter()
            .map(|row| {
                let record: Record = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                ComplaintRecord::from_record(&record)
            })
            .collect()
    }

    /// Render as an aligned text table with a rule under the header.
    #[must_use]
    pub fn render_aligned(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| {
                    let pad = width - cell.chars().count();
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let rule = widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut out = vec![line(self.columns.as_slice()), rule];
        out.extend(self.rows.iter().map(|row| line(row.as_slice())));
        out.join("\n")
    }

    /// Render as tab-separated lines, header first.
    #[must_use]
    pub fn render_plain(&self) -> String {
        std::iter::once(&self.columns)
            .chain(&self.rows)
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// What the admin section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordView {
    /// Nothing: no credential was entered.
    Hidden,
    /// Wrong credential; no data is exposed.
    Denied,
    /// Credential accepted, but only the header row exists.
    Empty,
    /// Credential accepted and complaints exist.
    Table(RecordTable),
}

impl RecordView {
    /// The notice shown for non-table views.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Hidden | Self::Table(_) => None,
            Self::Denied => Some("Incorrect password!"),
            Self::Empty => Some("No complaints yet."),
        }
    }
}

/// Load the record view for `credential`.
///
/// The sheet is only read when the gate grants access.
///
/// # Errors
///
/// Returns an error if the sheet cannot be read.
pub fn view_records<S, G>(sheet: &S, gate: &G, credential: &str) -> Result<RecordView>
where
    S: Sheet + ?Sized,
    G: AccessGate + ?Sized,
{
    match gate.check(credential) {
        Access::Hidden => Ok(RecordView::Hidden),
        Access::Denied => {
            info!("Rejected admin credential");
            Ok(RecordView::Denied)
        }
        Access::Granted => {
            let grid = sheet.read_all_rows()?;
            debug!("Admin view loaded {} rows", grid.len());
            Ok(RecordTable::from_grid(grid).map_or(RecordView::Empty, RecordView::Table))
        }
    }
}
