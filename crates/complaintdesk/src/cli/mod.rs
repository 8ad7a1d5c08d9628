//! Command-line interface for complaintdesk.
//!
//! Each invocation is one interaction with the complaint page: it renders the
//! form (checking the header row and deriving the next ID) and then performs
//! the requested action.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FormCommand, OutputFormat, RecordsCommand, SeverityArg, SheetCommand,
    StatusCommand, SubmitCommand,
};

/// complaintdesk - Record customer complaints in a shared spreadsheet
///
/// Every complaint gets a CcMMYYNN number. Admins can list all complaints
/// with the shared password.
#[derive(Debug, Parser)]
#[command(name = "complaintdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the complaint form with the next complaint number
    Form(FormCommand),

    /// Submit a complaint
    Submit(SubmitCommand),

    /// List all complaints (admin only)
    Records(RecordsCommand),

    /// Show store status
    Status(StatusCommand),

    /// Manage the complaint spreadsheet
    #[command(subcommand)]
    Sheet(SheetCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
