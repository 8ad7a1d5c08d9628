//! Complaint record types.
//!
//! A complaint is stored as one row of seven string cells, in the order given
//! by [`HEADERS`]. The first row of every complaint sheet is that header row.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column heading of the submission timestamp.
pub const DATE_SUBMITTED: &str = "Date Submitted";
/// Column heading of the complaint ID.
pub const COMPLAINT_ID: &str = "Complaint ID";
/// Column heading of the product name.
pub const PRODUCT_NAME: &str = "Product Name";
/// Column heading of the severity.
pub const SEVERITY: &str = "Severity";
/// Column heading of the contact number.
pub const CONTACT_NUMBER: &str = "Contact Number";
/// Column heading of the complaint details.
pub const DETAILS: &str = "Details";
/// Column heading of the submitter's name.
pub const SUBMITTED_BY: &str = "Submitted By";

/// The canonical header row, in storage order.
pub const HEADERS: [&str; 7] = [
    DATE_SUBMITTED,
    COMPLAINT_ID,
    PRODUCT_NAME,
    SEVERITY,
    CONTACT_NUMBER,
    DETAILS,
    SUBMITTED_BY,
];

/// `strftime` format of the `Date Submitted` cell.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A header-keyed view of one data row.
pub type Record = HashMap<String, String>;

/// Format a timestamp the way it is stored in the sheet.
#[must_use]
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The canonical header row as owned cells.
#[must_use]
pub fn header_row() -> Vec<String> {
    HEADERS.iter().map(ToString::to_string).collect()
}

/// How serious a complaint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    /// Urgent, needs attention first.
    #[default]
    High,
    /// Normal priority.
    Medium,
    /// Can wait.
    Low,
}

impl Severity {
    /// All severities in the order they are offered on the form.
    pub const ALL: [Severity; 3] = [Self::High, Self::Medium, Self::Low];

    /// The label stored in the sheet.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(Error::malformed_record(format!(
                "unknown severity: {other:?}"
            ))),
        }
    }
}

/// One submitted complaint.
///
/// Serializes as an object keyed by the sheet headers, in [`HEADERS`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    /// When the complaint was submitted, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "Date Submitted")]
    pub date_submitted: String,
    /// The generated `CcMMYYNN` identifier.
    #[serde(rename = "Complaint ID")]
    pub complaint_id: String,
    /// Product the complaint is about.
    #[serde(rename = "Product Name")]
    pub product_name: String,
    /// How serious the complaint is.
    #[serde(rename = "Severity")]
    pub severity: Severity,
    /// How to reach the complainant.
    #[serde(rename = "Contact Number")]
    pub contact_number: String,
    /// Free-form description.
    #[serde(rename = "Details")]
    pub details: String,
    /// Optional submitter name, empty when not given.
    #[serde(rename = "Submitted By")]
    pub submitted_by: String,
}

impl ComplaintRecord {
    /// The record as a sheet row, in [`HEADERS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date_submitted.clone(),
            self.complaint_id.clone(),
            self.product_name.clone(),
            self.severity.to_string(),
            self.contact_number.clone(),
            self.details.clone(),
            self.submitted_by.clone(),
        ]
    }

    /// Read a record back from a header-keyed row.
    ///
    /// Missing cells read as empty strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the severity cell is not a known severity.
    pub fn from_record(record: &Record) -> Result<Self> {
        let cell = |name: &str| record.get(name).cloned().unwrap_or_default();
        Ok(Self {
            date_submitted: cell(DATE_SUBMITTED),
            complaint_id: cell(COMPLAINT_ID),
            product_name: cell(PRODUCT_NAME),
            severity: cell(SEVERITY).parse()?,
            contact_number: cell(CONTACT_NUMBER),
            details: cell(DETAILS),
            submitted_by: cell(SUBMITTED_BY),
        })
    }
}
