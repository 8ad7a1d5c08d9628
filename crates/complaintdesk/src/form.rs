//! The complaint form page.
//!
//! Every interaction renders the page afresh: the header row is checked, the
//! sheet is scanned, and a new complaint ID is derived. Submitting stores the
//! complaint under the ID that page showed.

use serde::Serialize;

use crate::clock::Clock;
use crate::complaint_id::generate_complaint_id;
use crate::config::FormConfig;
use crate::error::Result;
use crate::headers::ensure_headers;
use crate::intake::{self, ComplaintForm, SubmitOutcome};
use crate::record::{
    Severity, COMPLAINT_ID, CONTACT_NUMBER, DETAILS, PRODUCT_NAME, SEVERITY, SUBMITTED_BY,
};
use crate::storage::Sheet;

/// How a form field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Shown but not editable.
    ReadOnly,
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// One of a fixed set of options.
    Select,
}

/// One field on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Column the value is stored under.
    pub name: &'static str,
    /// How the value is entered.
    pub kind: FieldKind,
    /// Whether submission fails when blank.
    pub required: bool,
    /// Pre-filled value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Field {
    fn input(name: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            kind,
            required,
            value: None,
        }
    }
}

/// A rendered complaint form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormPage {
    /// Page title.
    pub title: String,
    /// Heading above the fields.
    pub header: String,
    /// Image shown beside the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// The ID the next complaint will be stored under.
    pub complaint_id: String,
    /// Fields in display order.
    pub fields: Vec<Field>,
    /// Choices offered for the severity field.
    pub severity_options: Vec<Severity>,
}

impl FormPage {
    /// Render the page against the current sheet contents.
    ///
    /// Repairs the header row if needed, then derives the next complaint ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be read or written, or if the
    /// next ID cannot be generated.
    pub fn render<S, C>(sheet: &mut S, clock: &C, settings: &FormConfig) -> Result<Self>
    where
        S: Sheet + ?Sized,
        C: Clock + ?Sized,
    {
        ensure_headers(sheet)?;
        let records = sheet.read_all_records()?;
        let complaint_id = generate_complaint_id(clock.now(), &records)?;

        Ok(Self {
            title: settings.title.clone(),
            header: settings.header.clone(),
            image_url: settings.image_url.clone(),
            fields: vec![
                Field {
                    value: Some(complaint_id.clone()),
                    ..Field::input(COMPLAINT_ID, FieldKind::ReadOnly, false)
                },
                Field::input(PRODUCT_NAME, FieldKind::Text, true),
                Field::input(SEVERITY, FieldKind::Select, true),
                Field::input(CONTACT_NUMBER, FieldKind::Text, true),
                Field::input(DETAILS, FieldKind::TextArea, true),
                Field::input(SUBMITTED_BY, FieldKind::Text, false),
            ],
            complaint_id,
            severity_options: Severity::ALL.to_vec(),
        })
    }

    /// Submit `form` under the ID this page displayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be written.
    pub fn submit<S, C>(
        &self,
        sheet: &mut S,
        clock: &C,
        form: ComplaintForm,
    ) -> Result<SubmitOutcome>
    where
        S: Sheet + ?Sized,
        C: Clock + ?Sized,
    {
        intake::submit(sheet, clock, &self.complaint_id, form)
    }

    /// Render the page as text.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = vec![self.title.clone()];
        if let Some(url) = &self.image_url {
            out.push(format!("[image: {url}]"));
        }
        out.push(String::new());
        out.push(self.header.clone());

        let options: Vec<&str> = self.severity_options.iter().map(|s| s.as_str()).collect();
        for field in &self.fields {
            let detail = match (field.kind, &field.value) {
                (FieldKind::ReadOnly, Some(value)) => format!("{value} (automatic)"),
                (FieldKind::Select, _) => format!("one of {}", options.join(" / ")),
                (_, _) if field.required => "required".to_string(),
                _ => "optional".to_string(),
            };
            out.push(format!("  {:<16} {detail}", format!("{}:", field.name)));
        }
        out.join("\n")
    }
}
