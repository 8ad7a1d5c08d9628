//! `complaintdesk` - Complaint intake backed by a shared spreadsheet
//!
//! Complaints are appended as rows to a spreadsheet whose first row is a fixed
//! header. Each complaint is numbered `CcMMYYNN` from a scan of the existing
//! rows, and a shared admin password unlocks a table of everything stored.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod admin;
pub mod cli;
pub mod clock;
pub mod complaint_id;
pub mod config;
pub mod credentials;
pub mod error;
pub mod form;
pub mod headers;
pub mod intake;
pub mod logging;
pub mod record;
pub mod storage;

pub use admin::{view_records, Access, AccessGate, RecordTable, RecordView, SharedPasswordGate};
pub use clock::{Clock, FixedClock, SystemClock};
pub use complaint_id::generate_complaint_id;
pub use config::Config;
pub use credentials::{CredentialSource, ServiceAccountKey};
pub use error::{Error, Result};
pub use form::FormPage;
pub use headers::ensure_headers;
pub use intake::{submit, ComplaintForm, SubmitOutcome};
pub use logging::init_logging;
pub use record::{ComplaintRecord, Severity, HEADERS};
pub use storage::{MemorySheet, Sheet, Workbook};
