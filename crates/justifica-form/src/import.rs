//! Spreadsheet import.
//!
//! The first worksheet's first row holds the headers; every later row that
//! is not entirely empty becomes one entry. Only `Nombre`, `Matricula` and
//! `Carrera` are read. Date and time are left for manual entry.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use calamine::{Data, Reader as _, open_workbook_auto};
use justifica_core::ticket::TicketEntry;

/// Read `path` on the blocking pool and map its first worksheet to entries.
pub async fn read_entries(path: PathBuf) -> Result<Vec<TicketEntry>> {
  tokio::task::spawn_blocking(move || read_entries_blocking(&path))
    .await
    .context("spreadsheet import task failed")?
}

fn read_entries_blocking(path: &Path) -> Result<Vec<TicketEntry>> {
  let mut workbook = open_workbook_auto(path)
    .with_context(|| format!("opening spreadsheet {}", path.display()))?;
  let sheet = workbook
    .worksheet_range_at(0)
    .ok_or_else(|| anyhow!("{} has no worksheets", path.display()))?
    .context("reading the first worksheet")?;

  let rows = sheet
    .rows()
    .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
  let entries = entries_from_rows(rows);
  tracing::debug!(count = entries.len(), path = %path.display(), "spreadsheet imported");
  Ok(entries)
}

fn cell_text(cell: &Data) -> String {
  match cell {
    Data::Empty => String::new(),
    Data::String(s) => s.trim().to_owned(),
    other => other.to_string(),
  }
}

/// Map a header row plus data rows to entries.
pub fn entries_from_rows<I>(rows: I) -> Vec<TicketEntry>
where
  I: IntoIterator<Item = Vec<String>>,
{
  let mut rows = rows.into_iter();
  let Some(headers) = rows.next() else {
    return Vec::new();
  };

  rows
    .filter(|row| row.iter().any(|cell| !cell.is_empty()))
    .map(|row| {
      let record: HashMap<&str, &str> = headers
        .iter()
        .map(|h| h.trim())
        .zip(row.iter().map(String::as_str))
        .collect();
      let get = |key: &str| record.get(key).copied().unwrap_or_default().to_owned();
      TicketEntry {
        nombre:    get("Nombre"),
        matricula: get("Matricula"),
        carrera:   get("Carrera"),
        fecha:     String::new(),
        hora:      String::new(),
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rows(table: &[&[&str]]) -> Vec<Vec<String>> {
    table
      .iter()
      .map(|r| r.iter().map(|c| (*c).to_owned()).collect())
      .collect()
  }

  #[test]
  fn maps_known_headers() {
    let entries = entries_from_rows(rows(&[
      &["Nombre", "Matricula", "Carrera"],
      &["Ana", "A1", "CS"],
    ]));
    assert_eq!(entries, vec![TicketEntry {
      nombre:    "Ana".into(),
      matricula: "A1".into(),
      carrera:   "CS".into(),
      fecha:     String::new(),
      hora:      String::new(),
    }]);
  }

  #[test]
  fn header_order_and_extra_columns_do_not_matter() {
    let entries = entries_from_rows(rows(&[
      &["Correo", "Carrera", "Nombre", "Matricula"],
      &["ana@example.com", "CS", "Ana", "A1"],
    ]));
    assert_eq!(entries[0].nombre, "Ana");
    assert_eq!(entries[0].carrera, "CS");
  }

  #[test]
  fn missing_headers_default_to_empty() {
    let entries = entries_from_rows(rows(&[&["Nombre"], &["Ana"], &["Luis"]]));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].nombre, "Luis");
    assert_eq!(entries[1].matricula, "");
  }

  #[test]
  fn blank_rows_are_skipped_and_short_rows_padded() {
    let entries = entries_from_rows(rows(&[
      &["Nombre", "Matricula", "Carrera"],
      &["", "", ""],
      &["Ana"],
    ]));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].carrera, "");
  }

  #[test]
  fn empty_sheet_yields_nothing() {
    assert!(entries_from_rows(Vec::<Vec<String>>::new()).is_empty());
    assert!(entries_from_rows(rows(&[&["Nombre", "Matricula"]])).is_empty());
  }
}
