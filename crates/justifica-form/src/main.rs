//! `justifica`: build and submit absence tickets from the command line.
//!
//! # Usage
//!
//! ```text
//! justifica ticket --name "Semana 3" --import faltas.xlsx --set 0:fecha=2024-03-01 --set 0:hora=08:00
//! justifica ticket --name "Semana 3" --entry "Ana García,A1,CS,2024-03-01,08:00"
//! justifica justifications --student A1
//! ```

mod client;
mod form;
mod import;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use form::{EntryField, TicketForm};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "justifica", about = "Absence ticket form for the Justifica API")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the record API (default: http://localhost:3000).
  #[arg(long, env = "JUSTIFICA_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fill in a ticket and submit it.
  Ticket {
    /// Ticket name.
    #[arg(long)]
    name: String,

    /// Replace the entries with the rows of a spreadsheet's first sheet.
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// An entry as `nombre,matricula,carrera,fecha,hora`; fills the first
    /// blank row, or appends one. Repeatable.
    #[arg(long = "entry", value_name = "CSV")]
    entries: Vec<String>,

    /// Edit one field as `index:field=value`. Repeatable.
    #[arg(long = "set", value_name = "EDIT")]
    edits: Vec<String>,

    /// Print the ticket JSON instead of sending it.
    #[arg(long)]
    dry_run: bool,
  },

  /// List stored justifications, newest first.
  Justifications {
    /// Only those covering this matricula.
    #[arg(long)]
    student: Option<String>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag (or env) overrides config file, which overrides the default.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
  };
  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Ticket { name, import, entries, edits, dry_run } => {
      let mut form = TicketForm::new();
      form.name = name;

      if let Some(path) = import {
        let count = form.import_spreadsheet(&path).await?;
        eprintln!("Imported {count} row(s) from {}", path.display());
      }
      for csv in &entries {
        fill_entry(&mut form, csv)?;
      }
      for edit in &edits {
        let (index, field, value) = parse_edit(edit)?;
        form.update_entry(index, field, value)?;
      }

      let ticket = form.ticket();
      if dry_run {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
        return Ok(ExitCode::SUCCESS);
      }

      match client.submit_ticket(&ticket).await {
        Ok(_) => {
          println!("Ticket sent successfully!");
          Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
          tracing::warn!(error = %e, "ticket submission failed");
          eprintln!("Error sending ticket.");
          Ok(ExitCode::FAILURE)
        }
      }
    }

    Command::Justifications { student } => {
      let found = client.list_justifications(student.as_deref()).await?;
      for j in &found {
        let students: Vec<_> = j.students.iter().map(|s| s.student_id.as_str()).collect();
        println!(
          "{}  {}  {}  [{}]",
          j.created_at.format("%Y-%m-%d %H:%M"),
          j.id,
          j.name,
          students.join(", ")
        );
      }
      Ok(ExitCode::SUCCESS)
    }
  }
}

// ─── Argument helpers ─────────────────────────────────────────────────────────

/// Write one `--entry` into the first entirely blank row, appending a row
/// when there is none.
fn fill_entry(form: &mut TicketForm, csv: &str) -> Result<()> {
  let index = match form.entries().iter().position(|e| *e == Default::default()) {
    Some(i) => i,
    None => {
      form.add_entry();
      form.entries().len() - 1
    }
  };
  for (field, value) in EntryField::ALL.into_iter().zip(csv.split(',')) {
    form.update_entry(index, field, value.trim())?;
  }
  Ok(())
}

/// Parse `index:field=value`.
fn parse_edit(edit: &str) -> Result<(usize, EntryField, String)> {
  let (index, rest) = edit
    .split_once(':')
    .ok_or_else(|| anyhow!("expected index:field=value, got {edit:?}"))?;
  let (field, value) = rest
    .split_once('=')
    .ok_or_else(|| anyhow!("expected index:field=value, got {edit:?}"))?;
  let index = index
    .trim()
    .parse()
    .with_context(|| format!("bad entry index in {edit:?}"))?;
  Ok((index, field.parse()?, value.to_string()))
}
