//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that text order
//! equals time order. Documents are stored as compact JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use justifica_core::student::Student;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::Result;

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn encode_doc<T: Serialize>(doc: &T) -> Result<String> {
  Ok(serde_json::to_string(doc)?)
}

pub fn decode_doc<T: DeserializeOwned>(s: &str) -> Result<T> {
  Ok(serde_json::from_str(s)?)
}

pub fn decode_docs<T: DeserializeOwned>(raws: Vec<String>) -> Result<Vec<T>> {
  raws.iter().map(|s| decode_doc(s)).collect()
}

/// Lowercased form of a name, used for case-insensitive search.
pub fn fold_name(name: &str) -> String { name.to_lowercase() }

/// A `LIKE` pattern matching any value containing `needle`, with `%`, `_` and
/// the escape character itself taken literally. Use with `ESCAPE '\'`.
pub fn contains_pattern(needle: &str) -> String {
  let mut pattern = String::with_capacity(needle.len() + 2);
  pattern.push('%');
  for c in needle.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `alumnos` row.
pub struct RawStudent {
  pub matricula:     String,
  pub nombre:        String,
  pub carrera:       String,
  pub plan_estudios: String,
}

impl RawStudent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      matricula:     row.get(0)?,
      nombre:        row.get(1)?,
      carrera:       row.get(2)?,
      plan_estudios: row.get(3)?,
    })
  }

  pub fn into_student(self) -> Student {
    Student {
      name:            self.nombre,
      student_id:      self.matricula,
      program:         self.carrera,
      curriculum_plan: self.plan_estudios,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(contains_pattern("ana"), "%ana%");
    assert_eq!(contains_pattern("50%_a\\"), "%50\\%\\_a\\\\%");
  }

  #[test]
  fn timestamps_sort_as_text() {
    let a = DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z").unwrap().with_timezone(&Utc);
    let b = DateTime::parse_from_rfc3339("2024-03-01T10:00:00.5Z").unwrap().with_timezone(&Utc);
    assert!(encode_dt(a) < encode_dt(b));
    assert_eq!(encode_dt(a).len(), encode_dt(b).len());
  }
}
