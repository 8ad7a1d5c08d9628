//! Error types for complaintdesk.
//!
//! Only infrastructure and data-corruption failures are errors. Missing form
//! fields and a wrong admin password are ordinary outcomes, see
//! [`crate::intake::SubmitOutcome`] and [`crate::admin::RecordView`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for complaintdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Workbook Errors ===
    /// Failed to open or create the workbook database.
    #[error("failed to open workbook at {path}: {source}")]
    DatabaseOpen {
        /// Path to the workbook file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A workbook query failed.
    #[error("workbook query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run workbook migrations.
    #[error("workbook migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The requested spreadsheet does not exist in the workbook.
    #[error("spreadsheet '{key}' not found (run `complaintdesk sheet init`)")]
    SpreadsheetNotFound {
        /// The spreadsheet key.
        key: String,
    },

    /// The service account has no grant on the spreadsheet.
    #[error("service account {client_email} has no access to spreadsheet '{key}'")]
    AccessDenied {
        /// The service account identity.
        client_email: String,
        /// The spreadsheet key.
        key: String,
    },

    /// A row position outside the sheet was requested.
    #[error("row position {position} is outside the sheet (1..={max})")]
    InvalidRowPosition {
        /// The requested 1-based position.
        position: usize,
        /// The largest valid position.
        max: usize,
    },

    // === Record Errors ===
    /// A stored complaint ID carries an unparseable serial suffix.
    #[error("malformed complaint ID in store: {id:?}")]
    MalformedComplaintId {
        /// The offending ID.
        id: String,
    },

    /// Every two-digit serial for the month is already taken.
    #[error("no complaint serials left for {prefix} (maximum is 99 per month)")]
    SerialExhausted {
        /// The month/year prefix that ran out.
        prefix: String,
    },

    /// A stored row could not be read back as a complaint record.
    #[error("malformed record: {message}")]
    MalformedRecord {
        /// Description of the problem.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A required secret was not supplied.
    #[error("missing required setting '{name}'")]
    MissingSecret {
        /// Dotted configuration key of the secret.
        name: &'static str,
    },

    /// The credential bundle could not be read.
    #[error("failed to read credentials at {path}: {source}")]
    CredentialsRead {
        /// Path to the credential file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The credential bundle is not a usable service-account key.
    #[error("invalid credentials: {message}")]
    CredentialsInvalid {
        /// Description of the problem.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for complaintdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a malformed record error.
    #[must_use]
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }

    /// Create an invalid credentials error.
    #[must_use]
    pub fn credentials_invalid(message: impl Into<String>) -> Self {
        Self::CredentialsInvalid {
            message: message.into(),
        }
    }

    /// Check if this error is a startup configuration problem.
    #[must_use]
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigLoad(_)
                | Self::ConfigValidation { .. }
                | Self::MissingSecret { .. }
                | Self::CredentialsRead { .. }
                | Self::CredentialsInvalid { .. }
        )
    }

    /// Check if the store refused the service account.
    #[must_use]
    pub fn is_store_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied { .. } | Self::SpreadsheetNotFound { .. }
        )
    }

    /// Process exit status for this error.
    ///
    /// Startup configuration problems exit with 2, a spreadsheet the service
    /// account cannot reach with 3, everything else with 1.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.is_startup_error() {
            2
        } else if self.is_store_auth_error() {
            3
        } else {
            1
        }
    }
}
