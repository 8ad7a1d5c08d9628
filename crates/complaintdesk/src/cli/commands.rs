//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::intake::ComplaintForm;
use crate::record::Severity;

/// Form command arguments.
#[derive(Debug, Args)]
pub struct FormCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Product the complaint is about
    #[arg(short, long, default_value = "")]
    pub product: String,

    /// How serious the complaint is
    #[arg(short, long, value_enum, default_value = "high")]
    pub severity: SeverityArg,

    /// Contact number of the complainant
    #[arg(short = 'n', long, default_value = "")]
    pub contact: String,

    /// Complaint details
    #[arg(short, long, default_value = "")]
    pub details: String,

    /// Name of the person submitting (optional)
    #[arg(short = 'b', long)]
    pub submitted_by: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl SubmitCommand {
    /// The form values entered on the command line.
    #[must_use]
    pub fn to_form(&self) -> ComplaintForm {
        ComplaintForm {
            product: self.product.clone(),
            severity: self.severity.into(),
            contact_number: self.contact.clone(),
            details: self.details.clone(),
            submitted_by: self.submitted_by.clone(),
        }
    }
}

/// Environment variable the records command reads the admin password from.
pub const ADMIN_PASSWORD_ENV: &str = "COMPLAINTDESK_ADMIN_PASSWORD";

/// Records command arguments.
#[derive(Debug, Args)]
pub struct RecordsCommand {
    /// Admin password; without it nothing is shown
    #[arg(
        short,
        long,
        env = ADMIN_PASSWORD_ENV,
        hide_env_values = true,
        default_value = "",
        hide_default_value = true
    )]
    pub password: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Spreadsheet management commands.
#[derive(Debug, Subcommand)]
pub enum SheetCommand {
    /// Create the configured spreadsheet and share it with the service account
    Init {
        /// Spreadsheet title
        #[arg(short, long, default_value = "Complaints")]
        title: String,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Severity argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    /// High severity
    High,
    /// Medium severity
    Medium,
    /// Low severity
    Low,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::High => Self::High,
            SeverityArg::Medium => Self::Medium,
            SeverityArg::Low => Self::Low,
        }
    }
}

/// Output format for the records view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table
    #[default]
    Table,
    /// Tab-separated rows
    Plain,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_arg_conversion() {
        assert_eq!(Severity::from(SeverityArg::High), Severity::High);
        assert_eq!(Severity::from(SeverityArg::Medium), Severity::Medium);
        assert_eq!(Severity::from(SeverityArg::Low), Severity::Low);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_submit_to_form() {
        let cmd = SubmitCommand {
            product: "Kettle".to_string(),
            severity: SeverityArg::Low,
            contact: "050".to_string(),
            details: "Leaks".to_string(),
            submitted_by: None,
            json: false,
        };
        let form = cmd.to_form();
        assert_eq!(form.product, "Kettle");
        assert_eq!(form.severity, Severity::Low);
        assert_eq!(form.contact_number, "050");
        assert!(form.submitted_by.is_none());
    }

    #[test]
    fn test_records_command_debug() {
        let cmd = RecordsCommand {
            password: String::new(),
            format: OutputFormat::Json,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Json"));
    }
}
