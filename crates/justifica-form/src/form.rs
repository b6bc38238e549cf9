//! Ticket form state.
//!
//! Mirrors what a user does on the form: type a ticket name, add rows, edit
//! single fields, or replace every row with a spreadsheet import. Nothing
//! here validates values; the server does that on submission.

use std::{path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow, bail};
use justifica_core::ticket::{Ticket, TicketEntry};

use crate::import;

/// An editable column of a ticket entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
  Nombre,
  Matricula,
  Carrera,
  Fecha,
  Hora,
}

impl EntryField {
  pub const ALL: [EntryField; 5] = [
    Self::Nombre,
    Self::Matricula,
    Self::Carrera,
    Self::Fecha,
    Self::Hora,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Self::Nombre => "nombre",
      Self::Matricula => "matricula",
      Self::Carrera => "carrera",
      Self::Fecha => "fecha",
      Self::Hora => "hora",
    }
  }

  fn slot(self, entry: &mut TicketEntry) -> &mut String {
    match self {
      Self::Nombre => &mut entry.nombre,
      Self::Matricula => &mut entry.matricula,
      Self::Carrera => &mut entry.carrera,
      Self::Fecha => &mut entry.fecha,
      Self::Hora => &mut entry.hora,
    }
  }
}

impl FromStr for EntryField {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    let wanted = s.trim().to_lowercase();
    Self::ALL
      .into_iter()
      .find(|f| f.name() == wanted)
      .ok_or_else(|| anyhow!("unknown field {s:?}; expected one of nombre, matricula, carrera, fecha, hora"))
  }
}

/// The in-memory ticket being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketForm {
  pub name: String,
  entries:  Vec<TicketEntry>,
}

impl Default for TicketForm {
  fn default() -> Self { Self::new() }
}

impl TicketForm {
  /// A fresh form starts with one blank entry.
  pub fn new() -> Self {
    Self {
      name:    String::new(),
      entries: vec![TicketEntry::default()],
    }
  }

  pub fn entries(&self) -> &[TicketEntry] { &self.entries }

  /// Append a blank entry.
  pub fn add_entry(&mut self) { self.entries.push(TicketEntry::default()); }

  /// Set one field of the entry at `index`.
  pub fn update_entry(
    &mut self,
    index: usize,
    field: EntryField,
    value: impl Into<String>,
  ) -> Result<()> {
    let len = self.entries.len();
    let Some(entry) = self.entries.get_mut(index) else {
      bail!("entry {index} does not exist (the ticket has {len})");
    };
    *field.slot(entry) = value.into();
    Ok(())
  }

  /// Replace every entry, discarding manual edits.
  pub fn replace_entries(&mut self, entries: Vec<TicketEntry>) { self.entries = entries; }

  /// Load the first worksheet of `path` and replace the entry list with its
  /// rows. Returns the number of imported entries.
  pub async fn import_spreadsheet(&mut self, path: impl Into<PathBuf>) -> Result<usize> {
    let entries = import::read_entries(path.into()).await?;
    let count = entries.len();
    self.replace_entries(entries);
    Ok(count)
  }

  /// The payload submitted to the server.
  pub fn ticket(&self) -> Ticket {
    Ticket {
      name:    self.name.clone(),
      entries: self.entries.clone(),
    }
  }
}
