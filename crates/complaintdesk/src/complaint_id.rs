//! Complaint ID generation.
//!
//! IDs have the form `Cc{MM}{YY}{NN}`: a month/year prefix followed by a
//! two-digit serial that restarts at `01` every month. The next serial is
//! derived by scanning every stored record, so two submissions racing on the
//! same scan can receive the same ID.

use chrono::{Datelike, NaiveDateTime};
use tracing::trace;

use crate::error::{Error, Result};
use crate::record::{Record, COMPLAINT_ID};

/// Literal that opens every complaint ID.
pub const ID_LEAD: &str = "Cc";

/// Largest serial that fits the two-digit suffix.
pub const MAX_SERIAL: u32 = 99;

/// The `Cc{MM}{YY}` prefix for the month containing `now`.
#[must_use]
pub fn prefix_for(now: NaiveDateTime) -> String {
    format!("{ID_LEAD}{:02}{:02}", now.month(), now.year().rem_euclid(100))
}

/// Parse the serial of an ID that starts with `prefix`.
///
/// Returns `Ok(None)` for IDs from other months.
///
/// # Errors
///
/// Returns [`Error::MalformedComplaintId`] when the text after the prefix is
/// not exactly two ASCII digits.
pub fn serial_of(id: &str, prefix: &str) -> Result<Option<u32>> {
    let Some(suffix) = id.strip_prefix(prefix) else {
        return Ok(None);
    };
    if suffix.len() != 2 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedComplaintId { id: id.to_string() });
    }
    suffix
        .parse()
        .map(Some)
        .map_err(|_| Error::MalformedComplaintId { id: id.to_string() })
}

/// Generate the next complaint ID for the month containing `now`.
///
/// Records without a `Complaint ID` cell are ignored.
///
/// # Errors
///
/// Returns [`Error::MalformedComplaintId`] if a same-month ID has a bad
/// suffix, and [`Error::SerialExhausted`] once serial 99 has been issued.
pub fn generate_complaint_id(now: NaiveDateTime, records: &[Record]) -> Result<String> {
    let prefix = prefix_for(now);

    let mut highest = 0;
    for id in records.iter().filter_map(|r| r.get(COMPLAINT_ID)) {
        if let Some(serial) = serial_of(id, &prefix)? {
            highest = highest.max(serial);
        }
    }

    let next = highest + 1;
    if next > MAX_SERIAL {
        return Err(Error::SerialExhausted { prefix });
    }

    trace!(%prefix, next, "derived next complaint serial");
    Ok(format!("{prefix}{next:02}"))
}
