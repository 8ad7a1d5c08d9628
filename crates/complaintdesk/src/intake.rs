//! Complaint submission.
//!
//! A submission either appends exactly one row or, when a required field is
//! blank, appends nothing and reports which fields were missing.

use serde::Serialize;
use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::record::{
    format_timestamp, ComplaintRecord, Severity, CONTACT_NUMBER, DETAILS, PRODUCT_NAME,
};
use crate::storage::Sheet;

/// Values entered on the complaint form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintForm {
    /// Product the complaint is about.
    pub product: String,
    /// Selected severity.
    pub severity: Severity,
    /// How to reach the complainant.
    pub contact_number: String,
    /// Free-form description.
    pub details: String,
    /// Optional submitter name.
    pub submitted_by: Option<String>,
}

/// A form field that must not be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequiredField {
    /// Product name.
    ProductName,
    /// Contact number.
    ContactNumber,
    /// Complaint details.
    Details,
}

impl RequiredField {
    /// The column heading of this field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ProductName => PRODUCT_NAME,
            Self::ContactNumber => CONTACT_NUMBER,
            Self::Details => DETAILS,
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl ComplaintForm {
    /// Required fields left blank, in form order.
    ///
    /// Whitespace-only values count as blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        [
            (RequiredField::ProductName, &self.product),
            (RequiredField::ContactNumber, &self.contact_number),
            (RequiredField::Details, &self.details),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Build the stored record for this form.
    #[must_use]
    pub fn into_record(self, complaint_id: String, date_submitted: String) -> ComplaintRecord {
        ComplaintRecord {
            date_submitted,
            complaint_id,
            product_name: self.product,
            severity: self.severity,
            contact_number: self.contact_number,
            details: self.details,
            submitted_by: self.submitted_by.unwrap_or_default(),
        }
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The complaint was stored.
    Accepted {
        /// The ID the complaint was stored under.
        complaint_id: String,
        /// The stored submission timestamp.
        date_submitted: String,
    },
    /// Required fields were blank; nothing was stored.
    Rejected {
        /// The blank fields.
        missing: Vec<RequiredField>,
    },
}

impl SubmitOutcome {
    /// Whether the complaint was stored.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The message shown to the person submitting.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Accepted {
                complaint_id,
                date_submitted,
            } => format!(
                "Complaint submitted successfully with number {complaint_id} at {date_submitted}!"
            ),
            Self::Rejected { missing } => {
                let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
                format!(
                    "Please fill in all required fields! Missing: {}",
                    names.join(", ")
                )
            }
        }
    }
}

/// Validate `form` and append it under `complaint_id`.
///
/// `complaint_id` is the ID shown on the rendered form; the timestamp is
/// taken from `clock` at submission time.
///
/// # Errors
///
/// Returns an error only if the sheet cannot be written. Blank required
/// fields produce [`SubmitOutcome::Rejected`].
pub fn submit<S, C>(
    sheet: &mut S,
    clock: &C,
    complaint_id: &str,
    form: ComplaintForm,
) -> Result<SubmitOutcome>
where
    S: Sheet + ?Sized,
    C: Clock + ?Sized,
{
    let missing = form.missing_fields();
    if !missing.is_empty() {
        info!(
            complaint_id,
            ?missing,
            "Rejected submission with blank required fields"
        );
        return Ok(SubmitOutcome::Rejected { missing });
    }

    let date_submitted = format_timestamp(clock.now());
    let record = form.into_record(complaint_id.to_string(), date_submitted.clone());
    sheet.append_row(&record.to_row())?;

    info!(complaint_id, %date_submitted, severity = %record.severity, "Complaint stored");
    Ok(SubmitOutcome::Accepted {
        complaint_id: complaint_id.to_string(),
        date_submitted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::record::{header_row, COMPLAINT_ID, SUBMITTED_BY};
    use crate::storage::MemorySheet;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 1, 14)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    fn filled_form() -> ComplaintForm {
        ComplaintForm {
            product: "Kettle".to_string(),
            severity: Severity::High,
            contact_number: "0501234567".to_string(),
            details: "Lid does not close".to_string(),
            submitted_by: None,
        }
    }

    fn sheet_with_header() -> MemorySheet {
        MemorySheet::with_rows(vec![header_row()])
    }

    #[test]
    fn test_blank_product_rejected_without_write() {
        crate::logging::init_test_logging();
        let mut sheet = sheet_with_header();
        let form = ComplaintForm {
            product: String::new(),
            ..filled_form()
        };

        let outcome = submit(&mut sheet, &clock(), "Cc012501", form).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                missing: vec![RequiredField::ProductName]
            }
        );
        assert_eq!(sheet.rows().len(), 1);
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let form = ComplaintForm {
            contact_number: "   ".to_string(),
            details: "\n".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.missing_fields(),
            vec![RequiredField::ContactNumber, RequiredField::Details]
        );
    }

    #[test]
    fn test_all_blank_lists_every_field() {
        let form = ComplaintForm::default();
        assert_eq!(form.missing_fields().len(), 3);
    }

    #[test]
    fn test_accepted_appends_one_row() {
        let mut sheet = sheet_with_header();

        let outcome = submit(&mut sheet, &clock(), "Cc012501", filled_form()).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                complaint_id: "Cc012501".to_string(),
                date_submitted: "2025-01-14 09:30:00".to_string(),
            }
        );

        let records = sheet.read_all_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0][COMPLAINT_ID], "Cc012501");
        assert_eq!(records[0][SUBMITTED_BY], "");
    }

    #[test]
    fn test_row_layout() {
        let mut sheet = sheet_with_header();
        let form = ComplaintForm {
            submitted_by: Some("Layla".to_string()),
            severity: Severity::Low,
            ..filled_form()
        };
        submit(&mut sheet, &clock(), "Cc012507", form).unwrap();

        assert_eq!(
            sheet.rows()[1],
            vec![
                "2025-01-14 09:30:00",
                "Cc012507",
                "Kettle",
                "Low",
                "0501234567",
                "Lid does not close",
                "Layla",
            ]
        );
    }

    #[test]
    fn test_optional_name_may_be_empty_string() {
        let mut sheet = sheet_with_header();
        let form = ComplaintForm {
            submitted_by: Some(String::new()),
            ..filled_form()
        };
        assert!(submit(&mut sheet, &clock(), "Cc012501", form)
            .unwrap()
            .is_accepted());
    }

    #[test]
    fn test_messages() {
        let accepted = SubmitOutcome::Accepted {
            complaint_id: "Cc012501".to_string(),
            date_submitted: "2025-01-14 09:30:00".to_string(),
        };
        assert!(accepted.message().contains("Cc012501"));
        assert!(accepted.message().contains("2025-01-14 09:30:00"));

        let rejected = SubmitOutcome::Rejected {
            missing: vec![RequiredField::ProductName, RequiredField::Details],
        };
        assert!(rejected.message().contains("Product Name, Details"));
        assert!(!rejected.is_accepted());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let rejected = SubmitOutcome::Rejected {
            missing: vec![RequiredField::Details],
        };
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["missing"][0], "Details");
    }
}
