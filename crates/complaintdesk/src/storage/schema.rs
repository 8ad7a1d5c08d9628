//! `SQLite` schema definitions for the workbook.
//!
//! A workbook holds any number of spreadsheets. Each spreadsheet is a grid of
//! rows stored as JSON arrays of cells, ordered by a 1-based `position`.

/// SQL statement to create the spreadsheets table.
pub const CREATE_SPREADSHEETS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS spreadsheets (
    key TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the access grants table.
pub const CREATE_GRANTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS grants (
    spreadsheet_key TEXT NOT NULL REFERENCES spreadsheets(key),
    client_email TEXT NOT NULL,
    granted_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (spreadsheet_key, client_email)
)
";

/// SQL statement to create the rows table.
pub const CREATE_ROWS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS sheet_rows (
    spreadsheet_key TEXT NOT NULL REFERENCES spreadsheets(key),
    position INTEGER NOT NULL,
    cells TEXT NOT NULL,
    PRIMARY KEY (spreadsheet_key, position)
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_SPREADSHEETS_TABLE,
    CREATE_GRANTS_TABLE,
    CREATE_ROWS_TABLE,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_rows_table_keyed_by_position() {
        assert!(CREATE_ROWS_TABLE.contains("position INTEGER NOT NULL"));
        assert!(CREATE_ROWS_TABLE.contains("PRIMARY KEY (spreadsheet_key, position)"));
    }

    #[test]
    fn test_grants_table_structure() {
        assert!(CREATE_GRANTS_TABLE.contains("client_email TEXT NOT NULL"));
        assert!(CREATE_GRANTS_TABLE.contains("PRIMARY KEY (spreadsheet_key, client_email)"));
    }
}
