//! `complaintdesk` - CLI for the complaint intake desk
//!
//! Each invocation is one interaction with the complaint page.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use complaintdesk::cli::{
    Cli, Command, ConfigCommand, OutputFormat, RecordsCommand, SheetCommand, SubmitCommand,
};
use complaintdesk::complaint_id::{generate_complaint_id, prefix_for};
use complaintdesk::storage::Sheet;
use complaintdesk::{
    ensure_headers, init_logging, view_records, Clock, Config, CredentialSource, Error, FormPage,
    RecordView, SharedPasswordGate, SubmitOutcome, SystemClock, Workbook,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// Exit status for a failure, taken from the first crate error in the chain.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(1, Error::exit_code)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load_from(cli.config.clone())?;

    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(&config, config_cmd),
        command => command,
    };

    // Both secrets are required before the store is touched.
    let source = config
        .credential_source()
        .context("complaintdesk cannot start without its spreadsheet credentials")?;

    if let Command::Sheet(SheetCommand::Init { title }) = &command {
        return handle_sheet_init(&config, &source, title);
    }

    let mut workbook = Workbook::open(config.workbook_path(), &source)?;
    ensure_headers(&mut workbook)?;

    let clock = SystemClock;
    match command {
        Command::Form(form_cmd) => handle_form(&mut workbook, &clock, &config, form_cmd.json),
        Command::Submit(submit_cmd) => handle_submit(&mut workbook, &clock, &config, &submit_cmd),
        Command::Records(records_cmd) => handle_records(&workbook, &config, &records_cmd),
        Command::Status(status_cmd) => handle_status(&workbook, &clock, &source, status_cmd.json),
        Command::Sheet(_) | Command::Config(_) => Ok(ExitCode::SUCCESS),
    }
}

fn handle_form(
    workbook: &mut Workbook,
    clock: &SystemClock,
    config: &Config,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let page = FormPage::render(workbook, clock, &config.form)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        println!("{}", page.render_text());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_submit(
    workbook: &mut Workbook,
    clock: &SystemClock,
    config: &Config,
    cmd: &SubmitCommand,
) -> anyhow::Result<ExitCode> {
    let page = FormPage::render(workbook, clock, &config.form)?;
    if !cmd.json {
        println!("Complaint number (automatic): {}", page.complaint_id);
    }

    let outcome = page.submit(workbook, clock, cmd.to_form())?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        match &outcome {
            SubmitOutcome::Accepted { .. } => println!("{}", outcome.message()),
            SubmitOutcome::Rejected { .. } => eprintln!("{}", outcome.message()),
        }
    }

    Ok(if outcome.is_accepted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn handle_records(
    workbook: &Workbook,
    config: &Config,
    cmd: &RecordsCommand,
) -> anyhow::Result<ExitCode> {
    let gate = SharedPasswordGate::new(&config.admin.password);
    let view = view_records(workbook, &gate, &cmd.password)?;

    match (&view, cmd.format) {
        (RecordView::Hidden, _) => {}
        (RecordView::Denied, _) => {
            eprintln!("{}", view.notice().unwrap_or_default());
            return Ok(ExitCode::from(1));
        }
        (RecordView::Empty, OutputFormat::Json) => println!("[]"),
        (RecordView::Table(table), OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&table.to_records()?)?);
        }
        (RecordView::Empty, _) => {
            println!("Logged in as admin.");
            println!("{}", view.notice().unwrap_or_default());
        }
        (RecordView::Table(table), OutputFormat::Table) => {
            println!("Logged in as admin.");
            println!("{}", table.render_aligned());
        }
        (RecordView::Table(table), OutputFormat::Plain) => {
            println!("{}", table.render_plain());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_status(
    workbook: &Workbook,
    clock: &SystemClock,
    source: &CredentialSource,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let stats = workbook.stats()?;
    let now = clock.now();
    let complaints = stats.row_count.saturating_sub(1);
    let next_id = generate_complaint_id(now, &workbook.read_all_records()?)?;

    if json {
        let status = serde_json::json!({
            "workbook_path": workbook.path(),
            "spreadsheet_id": workbook.key(),
            "title": stats.title,
            "created_at": stats.created_at,
            "service_account": source.client_email(),
            "shared_with": stats.shared_with,
            "complaints": complaints,
            "current_prefix": prefix_for(now),
            "next_complaint_id": next_id,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("complaintdesk status");
        println!("--------------------");
        println!("Workbook:        {}", workbook.path().display());
        println!("Spreadsheet:     {} ({})", workbook.key(), stats.title);
        println!("Service account: {}", source.client_email());
        println!("Complaints:      {complaints}");
        println!("Current prefix:  {}", prefix_for(now));
        println!("Next ID:         {next_id}");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_sheet_init(
    config: &Config,
    source: &CredentialSource,
    title: &str,
) -> anyhow::Result<ExitCode> {
    let path = config.workbook_path();
    let mut workbook = Workbook::provision(&path, source, title)
        .with_context(|| format!("failed to provision workbook at {}", path.display()))?;
    let wrote_header = ensure_headers(&mut workbook)?;

    println!(
        "Spreadsheet '{}' is ready in {}",
        workbook.key(),
        workbook.path().display()
    );
    println!("Shared with:  {}", source.client_email());
    if wrote_header {
        println!("Header row written.");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                let mut value = serde_json::to_value(config)?;
                value["admin"]["password"] = serde_json::Value::from("<redacted>");
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                let unset = || "(not set)".to_string();
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Sheet]");
                println!("  Workbook path:      {}", config.workbook_path().display());
                println!(
                    "  Spreadsheet id:     {}",
                    config.sheet.spreadsheet_id.clone().unwrap_or_else(unset)
                );
                println!(
                    "  Credentials path:   {}",
                    config
                        .sheet
                        .credentials_path
                        .as_ref()
                        .map_or_else(unset, |p| p.display().to_string())
                );
                println!();
                println!("[Admin]");
                println!("  Password:           <redacted>");
                println!();
                println!("[Form]");
                println!("  Title:              {}", config.form.title);
                println!("  Header:             {}", config.form.header);
                println!(
                    "  Image URL:          {}",
                    config.form.image_url.clone().unwrap_or_else(unset)
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)).and_then(|c| c.credential_source()) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::from(1));
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
