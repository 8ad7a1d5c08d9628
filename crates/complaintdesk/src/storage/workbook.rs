//! `SQLite`-backed workbook of shared spreadsheets.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{migrations, Sheet};
use crate::credentials::CredentialSource;
use crate::error::{Error, Result};

/// Path reported for in-memory workbooks.
const IN_MEMORY: &str = ":memory:";

/// Handle to one spreadsheet inside a workbook file.
///
/// Opening checks that the spreadsheet exists and that the service account
/// holds a grant on it. Every process opening the same file sees the same
/// rows; nothing serialises writers beyond `SQLite`'s own locking.
#[derive(Debug)]
pub struct Workbook {
    /// Path to the workbook file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
    /// Key of the spreadsheet this handle reads and writes.
    key: String,
}

impl Workbook {
    /// Open the spreadsheet named by `source` in the workbook at `path`.
    ///
    /// Creates the workbook file if needed, but never the spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpreadsheetNotFound`] or [`Error::AccessDenied`] if
    /// the service account cannot reach the spreadsheet, or an error if the
    /// workbook cannot be opened.
    pub fn open(path: impl AsRef<Path>, source: &CredentialSource) -> Result<Self> {
        let (path, conn) = Self::connect(path.as_ref())?;
        authorize(&conn, &source.spreadsheet_id, source.client_email())?;

        info!(
            "Opened spreadsheet '{}' in {}",
            source.spreadsheet_id,
            path.display()
        );
        Ok(Self {
            path,
            conn,
            key: source.spreadsheet_id.clone(),
        })
    }

    /// Create the spreadsheet named by `source` if it does not exist and
    /// grant the service account access to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook cannot be opened or written.
    pub fn provision(
        path: impl AsRef<Path>,
        source: &CredentialSource,
        title: &str,
    ) -> Result<Self> {
        let (path, conn) = Self::connect(path.as_ref())?;
        let workbook = Self {
            path,
            conn,
            key: source.spreadsheet_id.clone(),
        };
        workbook.create_and_grant(source, title)?;
        Ok(workbook)
    }

    /// Create a provisioned in-memory workbook for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory(source: &CredentialSource) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(IN_MEMORY),
            source,
        })?;
        migrations::initialize_schema(&conn)?;

        let workbook = Self {
            path: PathBuf::from(IN_MEMORY),
            conn,
            key: source.spreadsheet_id.clone(),
        };
        workbook.create_and_grant(source, "Complaints")?;
        Ok(workbook)
    }

    fn connect(path: &Path) -> Result<(PathBuf, Connection)> {
        let path = path.to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening workbook at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        Ok((path, conn))
    }

    fn create_and_grant(&self, source: &CredentialSource, title: &str) -> Result<()> {
        let created = self.conn.execute(
            "INSERT OR IGNORE INTO spreadsheets (key, title) VALUES (?1, ?2)",
            params![self.key, title],
        )?;
        if created > 0 {
            info!("Created spreadsheet '{}' ({})", self.key, title);
        }

        let granted = self.conn.execute(
            "INSERT OR IGNORE INTO grants (spreadsheet_key, client_email) VALUES (?1, ?2)",
            params![self.key, source.client_email()],
        )?;
        if granted > 0 {
            info!(
                "Shared spreadsheet '{}' with {}",
                self.key,
                source.client_email()
            );
        }
        Ok(())
    }

    /// Get the path to the workbook file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key of the open spreadsheet.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get statistics about the open spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<WorkbookStats> {
        let (title, created_at): (String, String) = self.conn.query_row(
            "SELECT title, created_at FROM spreadsheets WHERE key = ?1",
            [&self.key],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT client_email FROM grants WHERE spreadsheet_key = ?1 ORDER BY client_email",
        )?;
        let shared_with = stmt
            .query_map([&self.key], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        let db_size_bytes = if self.path.as_os_str() == IN_MEMORY {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(WorkbookStats {
            title,
            created_at,
            row_count: self.row_count()?,
            shared_with,
            db_size_bytes,
        })
    }
}

/// Check `client_email` may open spreadsheet `key`.
fn authorize(conn: &Connection, key: &str, client_email: &str) -> Result<()> {
    let exists = conn
        .query_row("SELECT 1 FROM spreadsheets WHERE key = ?1", [key], |_| Ok(()))
        .optional()?
        .is_some();
    if !exists {
        return Err(Error::SpreadsheetNotFound {
            key: key.to_string(),
        });
    }

    let granted = conn
        .query_row(
            "SELECT 1 FROM grants WHERE spreadsheet_key = ?1 AND client_email = ?2",
            [key, client_email],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !granted {
        return Err(Error::AccessDenied {
            client_email: client_email.to_string(),
            key: key.to_string(),
        });
    }
    Ok(())
}

fn position_to_sql(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}

impl Sheet for Workbook {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        let mut stmt = self.conn.prepare(
            "SELECT cells FROM sheet_rows WHERE spreadsheet_key = ?1 ORDER BY position",
        )?;
        let encoded = stmt
            .query_map([&self.key], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Read {} rows from '{}'", encoded.len(), self.key);
        encoded
            .iter()
            .map(|cells| serde_json::from_str(cells).map_err(Error::from))
            .collect()
    }

    fn append_row(&mut self, row: &[String]) -> Result<()> {
        let cells = serde_json::to_string(row)?;
        self.conn.execute(
            r"
            INSERT INTO sheet_rows (spreadsheet_key, position, cells)
            SELECT ?1, COALESCE(MAX(position), 0) + 1, ?2
            FROM sheet_rows WHERE spreadsheet_key = ?1
            ",
            params![self.key, cells],
        )?;
        debug!("Appended row to '{}'", self.key);
        Ok(())
    }

    fn insert_row(&mut self, row: &[String], position: usize) -> Result<()> {
        let cells = serde_json::to_string(row)?;
        let tx = self.conn.transaction()?;

        let count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM sheet_rows WHERE spreadsheet_key = ?1",
            [&self.key],
            |row| row.get(0),
        )?;
        let max = usize::try_from(count).unwrap_or(usize::MAX).saturating_add(1);
        if position == 0 || position > max {
            return Err(Error::InvalidRowPosition { position, max });
        }
        let at = position_to_sql(position);

        // Two passes keep (spreadsheet_key, position) unique while shifting.
        tx.execute(
            "UPDATE sheet_rows SET position = -(position + 1) WHERE spreadsheet_key = ?1 AND position >= ?2",
            params![self.key, at],
        )?;
        tx.execute(
            "UPDATE sheet_rows SET position = -position WHERE spreadsheet_key = ?1 AND position < 0",
            params![self.key],
        )?;
        tx.execute(
            "INSERT INTO sheet_rows (spreadsheet_key, position, cells) VALUES (?1, ?2, ?3)",
            params![self.key, at, cells],
        )?;
        tx.commit()?;

        debug!("Inserted row at {} in '{}'", position, self.key);
        Ok(())
    }

    fn row_count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sheet_rows WHERE spreadsheet_key = ?1",
            [&self.key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

/// Statistics about an open spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookStats {
    /// Human-readable spreadsheet title.
    pub title: String,
    /// When the spreadsheet was created (UTC, `SQLite` datetime format).
    pub created_at: String,
    /// Number of rows, header included.
    pub row_count: usize,
    /// Service accounts holding a grant.
    pub shared_with: Vec<String>,
    /// Size of the workbook file in bytes.
    pub db_size_bytes: u64,
}
